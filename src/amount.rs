//! Fixed-point monetary type with 2 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement to ensure
//! consistent monetary calculations without floating-point errors.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount that maintains exactly 2 decimal places of precision.
///
/// This type wraps `rust_decimal::Decimal` and rounds every result to
/// 2 decimal places, **half to even** (banker's rounding), which is the
/// rounding rule for the whole pipeline.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use tax_report::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value, also the statistics zero-state sentinel.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount` from a `Decimal`, rounding half-to-even
    /// to 2 decimal places.
    ///
    /// Rounding happens explicitly here; a bare `rescale` would round
    /// midpoints away from zero instead.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointNearestEven);
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Returns the underlying `Decimal` for unrounded intermediate math.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        Ok(Amount::new(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = Amount::new(self.0 + rhs.0);
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Amount::new(self.0 - rhs.0);
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", self.0))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
