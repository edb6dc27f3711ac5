//! # Domain Services
//!
//! Pure services over the quote aggregate:
//!
//! - [`margin_resolver`]: Four-level margin priority resolution
//! - [`price_calculator`]: Raw cost → cost price → sale price → totals
//! - [`workflow`]: Guarded lifecycle transitions
//! - [`journal_recorder`]: Audit entry construction and field diffing

pub mod journal_recorder;
pub mod margin_resolver;
pub mod price_calculator;
#[cfg(test)]
mod proptests;
pub mod workflow;

pub use journal_recorder::FieldChange;
pub use margin_resolver::{dominant_cost_type, resolve_margin, MarginLevel, ResolvedMargin};
pub use price_calculator::QuoteTotals;
pub use workflow::{AvailableTransition, DenialReason, TransitionKind, WorkflowEngine};
