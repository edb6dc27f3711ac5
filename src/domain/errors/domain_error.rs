//! # Domain Errors
//!
//! Typed domain error definitions.
//!
//! This module provides the [`DomainError`] enum for representing
//! domain-level errors with numeric error codes.
//!
//! # Error Code Ranges
//!
//! - **1000-1999**: Validation errors (raised before any mutation)
//! - **2000-2999**: Not-found errors
//! - **3000-3999**: State and idempotency errors (workflow guards,
//!   conversion preconditions, duplicates)
//! - **4000-4999**: Arithmetic errors
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::errors::DomainError;
//!
//! let error = DomainError::EmptyLabel("lot label".to_string());
//! assert_eq!(error.code(), 1001);
//! assert!(error.is_validation_error());
//! ```

use crate::domain::services::workflow::{DenialReason, TransitionKind};
use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::domain::value_objects::vat::InvalidVatRateError;
use crate::domain::value_objects::{
    CostType, LineItemId, ProjectId, QuoteId, QuoteStatus, Role,
};
use rust_decimal::Decimal;
use thiserror::Error;

/// Domain-level error with numeric error codes.
///
/// Provides typed errors for domain operations with consistent error codes
/// for logging and API responses. All errors are raised synchronously,
/// before any mutation: an operation that fails leaves its aggregate
/// untouched.
///
/// # Error Code Ranges
///
/// | Range | Category |
/// |-------|----------|
/// | 1000-1999 | Validation errors |
/// | 2000-2999 | Not-found errors |
/// | 3000-3999 | State / idempotency errors |
/// | 4000-4999 | Arithmetic errors |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (1000-1999)
    // ========================================================================
    /// A required label is empty.
    #[error("empty label: {0}")]
    EmptyLabel(String),

    /// A refusal or loss transition is missing its justification.
    #[error("missing justification for transition {transition}")]
    MissingJustification {
        /// The transition that requires a justification.
        transition: TransitionKind,
    },

    /// The VAT rate is not one of the allowed statutory rates.
    #[error("invalid VAT rate: {0} (allowed: 5.5, 10, 20)")]
    InvalidVatRate(Decimal),

    /// Labor metadata supplied on a non-labor cost detail.
    #[error("labor metadata not allowed on cost type {0}")]
    LaborMetadataNotAllowed(CostType),

    /// A lot code is empty.
    #[error("empty lot code")]
    EmptyLotCode,

    /// Generic validation error.
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========================================================================
    // Not-Found Errors (2000-2999)
    // ========================================================================
    /// Quote not found.
    #[error("quote not found: {0}")]
    QuoteNotFound(String),

    /// Lot not found within the quote.
    #[error("lot not found: {0}")]
    LotNotFound(String),

    /// Line item not found within the lot.
    #[error("line item not found: {0}")]
    LineItemNotFound(String),

    /// Cost detail not found within the line item.
    #[error("cost detail not found: {0}")]
    CostDetailNotFound(String),

    /// Signature not found for the quote.
    #[error("signature not found for quote: {0}")]
    SignatureNotFound(String),

    // ========================================================================
    // State / Idempotency Errors (3000-3999)
    // ========================================================================
    /// A workflow transition was denied.
    #[error("transition {transition} not allowed from {status} for role {role}: {reason}")]
    TransitionNotAllowed {
        /// The attempted transition.
        transition: TransitionKind,
        /// The current quote status.
        status: QuoteStatus,
        /// The role of the acting user.
        role: Role,
        /// Why the transition was denied.
        reason: DenialReason,
    },

    /// The quote content cannot be edited in its current status.
    #[error("quote not modifiable in status {status}")]
    QuoteNotModifiable {
        /// The current quote status.
        status: QuoteStatus,
    },

    /// The line item quantity is locked.
    #[error("line item quantity is locked: {line_item_id}")]
    LineLocked {
        /// The locked line item.
        line_item_id: LineItemId,
    },

    /// The quote does not satisfy a conversion precondition.
    #[error("quote {quote_id} not convertible: status is {status}, expected ACCEPTED")]
    QuoteNotConvertible {
        /// The quote that was rejected.
        quote_id: QuoteId,
        /// Its current status.
        status: QuoteStatus,
    },

    /// Conversion requires a valid signature that the quote does not have.
    #[error("quote {quote_id} has no valid signature")]
    SignatureMissing {
        /// The quote missing its signature.
        quote_id: QuoteId,
    },

    /// The quote has already been converted into a project.
    #[error("quote {quote_id} already converted to project {project_id}")]
    QuoteAlreadyConverted {
        /// The quote that was already converted.
        quote_id: QuoteId,
        /// The project it was converted to.
        project_id: ProjectId,
    },

    /// A lot with the same code already exists in the quote.
    #[error("duplicate lot code: {code}")]
    DuplicateLotCode {
        /// The conflicting code.
        code: String,
    },

    // ========================================================================
    // Arithmetic Errors (4000-4999)
    // ========================================================================
    /// Arithmetic overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid arithmetic value.
    #[error("invalid arithmetic value: {0}")]
    InvalidArithmeticValue(String),
}

impl DomainError {
    /// Returns the numeric error code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            // Validation errors (1000-1999)
            Self::EmptyLabel(_) => 1001,
            Self::MissingJustification { .. } => 1002,
            Self::InvalidVatRate(_) => 1003,
            Self::LaborMetadataNotAllowed(_) => 1004,
            Self::EmptyLotCode => 1005,
            Self::ValidationError(_) => 1099,

            // Not-found errors (2000-2999)
            Self::QuoteNotFound(_) => 2001,
            Self::LotNotFound(_) => 2002,
            Self::LineItemNotFound(_) => 2003,
            Self::CostDetailNotFound(_) => 2004,
            Self::SignatureNotFound(_) => 2005,

            // State / idempotency errors (3000-3999)
            Self::TransitionNotAllowed { .. } => 3001,
            Self::QuoteNotModifiable { .. } => 3002,
            Self::LineLocked { .. } => 3003,
            Self::QuoteNotConvertible { .. } => 3004,
            Self::SignatureMissing { .. } => 3005,
            Self::QuoteAlreadyConverted { .. } => 3006,
            Self::DuplicateLotCode { .. } => 3007,

            // Arithmetic errors (4000-4999)
            Self::Overflow => 4001,
            Self::Underflow => 4002,
            Self::DivisionByZero => 4003,
            Self::InvalidArithmeticValue(_) => 4004,
        }
    }

    /// Returns the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.code() {
            1000..=1999 => "validation",
            2000..=2999 => "not_found",
            3000..=3999 => "state",
            4000..=4999 => "arithmetic",
            _ => "unknown",
        }
    }

    /// Returns true if this is a validation error.
    #[inline]
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self.code(), 1000..=1999)
    }

    /// Returns true if this is a not-found error.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.code(), 2000..=2999)
    }

    /// Returns true if this is a state or idempotency error.
    #[inline]
    #[must_use]
    pub const fn is_state_error(&self) -> bool {
        matches!(self.code(), 3000..=3999)
    }

    /// Returns true if this is an arithmetic error.
    #[inline]
    #[must_use]
    pub const fn is_arithmetic_error(&self) -> bool {
        matches!(self.code(), 4000..=4999)
    }
}

impl From<ArithmeticError> for DomainError {
    fn from(err: ArithmeticError) -> Self {
        match err {
            ArithmeticError::Overflow => Self::Overflow,
            ArithmeticError::Underflow => Self::Underflow,
            ArithmeticError::DivisionByZero => Self::DivisionByZero,
            ArithmeticError::InvalidValue(msg) => Self::InvalidArithmeticValue(msg.to_string()),
        }
    }
}

impl From<InvalidVatRateError> for DomainError {
    fn from(err: InvalidVatRateError) -> Self {
        Self::InvalidVatRate(err.0)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
