use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

pub const DEFAULT_CURRENCY_CODE: &str = "USD";

//--------------------------------------        Cents        ---------------------------------------------------------
/// An amount of money in minor currency units. Serializes as a plain integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Cents(i64);

op!(binary Cents, Add, add);
op!(binary Cents, Sub, sub);

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, c| acc + c)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in cents: {0}")]
pub struct CentsConversionError(String);

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<f64> for Cents {
    type Error = CentsConversionError;

    /// Rounds to the nearest whole cent, half away from zero. Amounts beyond the `i64` range saturate at its bounds;
    /// only NaN and infinities are rejected.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(CentsConversionError(format!("{value} is not a finite amount")));
        }
        // `as` saturates for out-of-range floats
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(value.round() as i64))
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}¢", self.0)
    }
}

impl Cents {
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts an amount in major units (e.g. dollars) into cents, rounding to the nearest cent.
    pub fn from_major_units(amount: f64) -> Result<Self, CentsConversionError> {
        Self::try_from(amount * 100.0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Raises the amount to at least one cent.
    pub fn at_least_one(self) -> Self {
        Self(self.0.max(1))
    }
}
