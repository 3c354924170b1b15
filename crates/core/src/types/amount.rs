//! Lenient decimal amounts.
//!
//! Prices and order totals are kept as the strings the admin typed (or the
//! baseline file carried). Anything that sums them goes through [`Amount`],
//! which coerces missing or malformed text to zero instead of failing.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A decimal amount parsed from a number-like string.
///
/// ## Examples
///
/// ```
/// use storedash_core::Amount;
///
/// assert_eq!(Amount::coerce(Some("10")).to_string(), "10");
/// assert_eq!(Amount::coerce(Some(" 2.50 ")).to_string(), "2.5");
/// assert_eq!(Amount::coerce(Some("bad")).to_string(), "0");
/// assert_eq!(Amount::coerce(None).to_string(), "0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a number-like string strictly.
    ///
    /// Surrounding whitespace is ignored and the empty string reads as zero.
    /// Plain and scientific notation (`1e3`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a finite decimal number.
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
    }

    /// Parse an optional number-like string, treating anything unusable as zero.
    #[must_use]
    pub fn coerce(s: Option<&str>) -> Self {
        s.and_then(|s| Self::parse(s).ok()).unwrap_or(Self::ZERO)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl core::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl core::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, amount| acc + amount)
    }
}
