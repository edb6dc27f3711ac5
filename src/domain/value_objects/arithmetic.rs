//! # Checked Arithmetic
//!
//! Safe arithmetic over [`Decimal`] values.
//!
//! All monetary computation in the engine flows through [`CheckedArithmetic`]
//! so that overflow, underflow, and division by zero surface as typed errors
//! instead of panics or silent wrap-around. Intermediate results are never
//! rounded; only [`round_currency`] reduces to currency precision, and only
//! where the domain explicitly asks for it (tax amounts).
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::value_objects::arithmetic::CheckedArithmetic;
//! use rust_decimal::Decimal;
//!
//! let a = Decimal::new(10050, 2); // 100.50
//! let b = Decimal::new(5025, 2);  // 50.25
//! assert_eq!(a.safe_add(b).unwrap().to_string(), "150.75");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error produced by a checked arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// The result would exceed the representable range.
    #[error("arithmetic overflow")]
    Overflow,

    /// The result would be negative where the domain forbids it.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The operand is not acceptable for the target type.
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

/// Result type for checked arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Checked arithmetic operations.
///
/// Implemented for [`Decimal`]; the monetary value objects delegate to this
/// trait rather than using the panicking operators.
pub trait CheckedArithmetic: Sized {
    /// Adds, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the result is not representable.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Subtracts, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the result is not representable.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Multiplies, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the result is not representable.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Divides, failing on division by zero or overflow.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] if `rhs` is zero and
    /// [`ArithmeticError::Overflow`] if the result is not representable.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Rounds a decimal to currency precision (2 decimals, half away from zero).
///
/// # Examples
///
/// ```
/// use devis_engine::domain::value_objects::arithmetic::round_currency;
/// use rust_decimal::Decimal;
///
/// let d = Decimal::new(550005, 3); // 550.005
/// assert_eq!(round_currency(d).to_string(), "550.01");
/// ```
#[must_use]
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Keep exactly two fractional digits so journal serialization is stable
    rounded.rescale(2);
    rounded
}
