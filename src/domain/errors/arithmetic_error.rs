//! # Arithmetic Errors
//!
//! Errors for checked arithmetic operations.
//!
//! This module re-exports [`ArithmeticError`] from the arithmetic module
//! for convenience.
//!
//! See [`crate::domain::value_objects::arithmetic`] for the full implementation.

pub use crate::domain::value_objects::arithmetic::ArithmeticError;
