//! # Rate Value Object
//!
//! Non-negative percentage rate.
//!
//! This module provides the [`Rate`] type used for margin rates, the
//! overhead coefficient, and the retention-guarantee percentage. A rate of
//! zero is a valid, explicitly-set value: in margin resolution it counts as
//! "defined" and wins over lower-priority levels, and as a multiplier it is
//! a no-op (factor 1).
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::value_objects::percent::Rate;
//! use rust_decimal::Decimal;
//!
//! let margin = Rate::new(18.0).unwrap();
//! assert_eq!(margin.multiplier(), Decimal::new(118, 2)); // 1.18
//!
//! let zero = Rate::ZERO;
//! assert_eq!(zero.multiplier(), Decimal::ONE);
//! ```

use super::arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A validated percentage rate.
///
/// # Invariants
///
/// - Rate is always >= 0 (expressed in percent, e.g. `18` for 18%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(Decimal);

impl Rate {
    /// Zero rate constant (an explicitly-set zero, not "undefined").
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new rate from an f64 percentage value.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the value is negative or
    /// not representable as a decimal.
    #[must_use = "this returns a Result that should be handled"]
    pub fn new(value: f64) -> ArithmeticResult<Self> {
        let decimal =
            Decimal::try_from(value).map_err(|_| ArithmeticError::InvalidValue("invalid float"))?;
        Self::from_decimal(decimal)
    }

    /// Creates a new rate from a Decimal percentage value.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the value is negative.
    #[must_use = "this returns a Result that should be handled"]
    pub fn from_decimal(value: Decimal) -> ArithmeticResult<Self> {
        if value.is_sign_negative() {
            return Err(ArithmeticError::InvalidValue("rate cannot be negative"));
        }
        Ok(Self(value))
    }

    /// Returns the inner Decimal percentage value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Returns true if the rate is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns the markup multiplier `1 + rate/100`.
    ///
    /// A zero rate yields exactly `1`.
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        // rate/100 cannot fail: divisor is a non-zero constant
        Decimal::ONE + self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns the plain fraction `rate/100`.
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Applies this rate as a markup to a decimal base.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    #[inline]
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn apply_markup(self, base: Decimal) -> ArithmeticResult<Decimal> {
        base.safe_mul(self.multiplier())
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl PartialOrd for Rate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = ArithmeticError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl FromStr for Rate {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal =
            Decimal::from_str(s).map_err(|_| ArithmeticError::InvalidValue("invalid decimal"))?;
        Self::from_decimal(decimal)
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self::ZERO
    }
}
