//! Integer minor-unit money.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored and computed as `i64` cents; the major-unit string is
//! a presentation derivative produced only at the boundary.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// An amount in minor currency units (1/100 of the display unit).
///
/// `Display` renders the major-unit string with exactly two decimals and a
/// leading `-` for negative amounts: `Cents(7420)` is `"74.20"`,
/// `Cents(-1)` is `"-0.01"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    /// Returns the raw minor-unit amount.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Converts a major-unit decimal (e.g. `74.2`) to cents.
    ///
    /// Rounds half away from zero to two decimal places first, so `0.005`
    /// becomes one cent. Returns `None` if the result does not fit in `i64`.
    #[must_use]
    pub fn from_major(amount: Decimal) -> Option<Self> {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_i64())
            .map(Self)
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        // unsigned_abs keeps i64::MIN representable
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Formats a minor-unit amount as a major-unit string with two decimals.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    Cents(cents).to_string()
}
