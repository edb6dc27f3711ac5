//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`QuoteId`], [`LotId`], [`LineItemId`], [`CostDetailId`]: aggregate identifiers
//! - [`SignatureId`], [`JournalEntryId`], [`ProjectId`], [`EventId`]: record identifiers
//! - [`UserId`], [`ArticleId`]: string-based identifiers
//!
//! ## Numeric Types
//!
//! - [`Amount`]: Non-negative decimal money with checked arithmetic
//! - [`Quantity`]: Non-negative decimal quantity
//! - [`Rate`]: Non-negative percentage (margins, overhead, retention)
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//! - [`round_currency`]: Currency-precision rounding
//!
//! ## Domain Enums
//!
//! - [`CostType`]: Closed cost-category enumeration
//! - [`QuoteStatus`]: Quote lifecycle state machine
//! - [`Role`] / [`Actor`]: Workflow authorization inputs
//! - [`VatRate`] / [`VatContext`] / [`WorkType`]: Statutory VAT resolution
//!
//! ## Time
//!
//! - [`Timestamp`]: UTC timestamp with RFC 3339 canonical form

pub mod arithmetic;
pub mod cost_type;
pub mod ids;
pub mod money;
pub mod percent;
pub mod quantity;
pub mod quote_status;
pub mod role;
pub mod timestamp;
pub mod vat;

pub use arithmetic::{round_currency, ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use cost_type::{CostType, InvalidCostTypeError, ParseCostTypeError};
pub use ids::{
    ArticleId, CostDetailId, EventId, JournalEntryId, LineItemId, LotId, ProjectId, QuoteId,
    SignatureId, UserId,
};
pub use money::Amount;
pub use percent::Rate;
pub use quantity::Quantity;
pub use quote_status::{InvalidQuoteStatusError, QuoteStatus};
pub use role::{Actor, Role};
pub use timestamp::Timestamp;
pub use vat::{InvalidVatRateError, VatContext, VatRate, WorkType};
