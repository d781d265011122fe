//! Tax Report CLI
//!
//! Reads a CSV of sales records, applies a tax rate, and writes a JSON
//! report with aggregate statistics. A summary of the run is printed to
//! stderr so stdout stays a clean JSON stream.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- sales.csv > report.json
//! cargo run -- sales.csv --rate 0.21 --output report.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;
use tax_report::{Config, ReportEngine, Result};

fn main() {
    env_logger::init();

    if let Err(e) = run(Config::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    let file = File::open(&config.input)?;
    let reader = BufReader::new(file);

    let mut engine = ReportEngine::new(config.rate, config.source_label());
    engine.process_csv(reader, config.has_headers())?;

    let defects = engine.defects();
    if defects.total() > 0 {
        info!(
            "Dropped {} row(s): {} shape, {} conversion",
            defects.total(),
            defects.shape,
            defects.conversion
        );
    }

    let report = engine.into_report();

    match &config.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            report.write_json(writer)?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            report.write_json(stdout.lock())?;
        }
    }

    eprint!("{}", report.render_summary());

    Ok(())
}
