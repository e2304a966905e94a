//! Gateway fee and user commission split.
//!
//! The fee ratio is held as an exact fraction so that `floor(total * ratio)` is computed in integer arithmetic. The
//! user's share is whatever is left over, so the two parts always add up to the total.
use std::{fmt::Display, str::FromStr};

use cpb_common::Cents;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::order_types::Commission;

pub const DEFAULT_FEE_RATIO: FeeRatio = FeeRatio { numerator: 7, denominator: 100 };

#[derive(Debug, Clone, Error)]
#[error("Invalid fee ratio: {0}")]
pub struct FeeRatioError(String);

/// A fee ratio in the closed interval [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRatio {
    numerator: u64,
    denominator: u64,
}

impl Default for FeeRatio {
    fn default() -> Self {
        DEFAULT_FEE_RATIO
    }
}

impl FeeRatio {
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, FeeRatioError> {
        if denominator == 0 {
            return Err(FeeRatioError("the denominator cannot be zero".into()));
        }
        if numerator > denominator {
            return Err(FeeRatioError(format!("{numerator}/{denominator} is greater than one")));
        }
        Ok(Self { numerator, denominator })
    }

    /// `floor(amount * ratio)`, for non-negative amounts.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn apply_floor(&self, amount: Cents) -> Cents {
        let amount = amount.value().max(0) as u128;
        let fee = amount * u128::from(self.numerator) / u128::from(self.denominator);
        // fee <= amount <= i64::MAX since the ratio is at most one
        Cents::from(fee as i64)
    }
}

impl FromStr for FeeRatio {
    type Err = FeeRatioError;

    /// Parses a plain decimal such as `0.07` or `1`. Scientific notation and signs are not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let valid_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !valid_digits(whole) || !valid_digits(frac) {
            return Err(FeeRatioError(format!("'{s}' is not a decimal number")));
        }
        if frac.len() > 18 {
            return Err(FeeRatioError(format!("'{s}' has too many decimal places")));
        }
        let denominator = 10u64.pow(frac.len() as u32);
        let digits = format!("{whole}{frac}");
        let numerator = digits.parse::<u64>().map_err(|e| FeeRatioError(format!("'{s}': {e}")))?;
        Self::new(numerator, denominator)
    }
}

impl Display for FeeRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Splits `total` into the gateway fee and the user's commission.
pub fn compute_commission(total: Cents, ratio: FeeRatio, currency: &str) -> Commission {
    let gateway_fee = ratio.apply_floor(total);
    let user_commission = total - gateway_fee;
    Commission {
        total_price_in_cents: total,
        gateway_fee_in_cents: gateway_fee,
        user_commission_in_cents: user_commission,
        currency: currency.to_string(),
    }
}
