//! # Domain Entities
//!
//! Aggregate roots and entities representing core business concepts.
//!
//! ## Aggregates
//!
//! - [`Quote`]: Quote (devis) aggregate owning its lots, pricing
//!   configuration, lifecycle status, and totals
//!
//! ## Entities
//!
//! - [`Lot`]: Work package within a quote
//! - [`LineItem`]: Priced quantity line within a lot
//! - [`CostDetail`]: Raw cost component (débours) of a line
//! - [`Signature`]: Electronic signature for a quote
//! - [`JournalEntry`]: Append-only audit record

pub mod cost_detail;
pub mod journal;
pub mod line_item;
pub mod lot;
pub mod quote;
pub mod signature;

pub use cost_detail::{CostDetail, LaborMeta};
pub use journal::{FieldDiff, JournalAction, JournalEntry, JournalValue};
pub use line_item::LineItem;
pub use lot::Lot;
pub use quote::{ClientInfo, Quote, TypeMargins};
pub use signature::Signature;
