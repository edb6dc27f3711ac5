//! # Domain Events
//!
//! Events emitted during domain operations for downstream consumers
//! (notifications, reporting, project provisioning).
//!
//! ## Quote Events
//!
//! - [`QuoteStatusChanged`]: A lifecycle transition was applied
//! - [`QuoteConverted`]: A quote became a project

pub mod quote_events;

pub use quote_events::{QuoteConverted, QuoteEvent, QuoteStatusChanged};
