//! # Devis Engine
//!
//! Pricing and workflow engine for construction-company quotes (devis):
//! margin resolution through a four-level priority hierarchy, sell-price
//! computation from raw costs via chained percentage markups, statutory VAT
//! eligibility, a guarded lifecycle state machine, field-level audit
//! journaling, and one-shot conversion of an accepted quote into a project.
//!
//! ## Architecture
//!
//! This crate follows Domain-Driven Design with a layered architecture:
//!
//! - **Domain Layer** (`domain`): Entities, value objects, domain events, and
//!   the pure pricing/workflow services
//! - **Application Layer** (`application`): Use cases orchestrating domain
//!   services over injected ports
//! - **Infrastructure Layer** (`infrastructure`): Port definitions and
//!   in-memory adapters
//!
//! Persistence schemas, HTTP surfaces, PDF/CERFA rendering, and notification
//! delivery live outside this crate; the core only consumes their ports.
//!
//! ## Example
//!
//! ```
//! use devis_engine::domain::entities::quote::TypeMargins;
//! use devis_engine::domain::services::margin_resolver::{resolve_margin, MarginLevel};
//! use devis_engine::domain::value_objects::percent::Rate;
//!
//! let margins = TypeMargins::default();
//! let global = Rate::new(15.0).unwrap();
//!
//! // No overrides anywhere: the global rate applies.
//! let resolved = resolve_margin(None, None, &margins, global, &[]);
//! assert_eq!(resolved.level, MarginLevel::Global);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod application;
pub mod domain;
pub mod infrastructure;
