//! # Domain Error Types
//!
//! Typed errors for domain operations.

pub mod arithmetic_error;
pub mod domain_error;

pub use arithmetic_error::ArithmeticError;
pub use domain_error::{DomainError, DomainResult};
