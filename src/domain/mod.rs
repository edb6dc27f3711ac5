//! # Domain Layer
//!
//! Core business logic for quote pricing and lifecycle management.
//!
//! This layer has no knowledge of persistence or transport. It contains:
//!
//! - [`entities`]: The [`Quote`](entities::Quote) aggregate and its parts
//! - [`value_objects`]: Validated primitives (amounts, rates, identifiers,
//!   statuses, VAT rates)
//! - [`services`]: Pure domain services (margin resolution, price
//!   calculation, workflow transitions, journal diffing)
//! - [`events`]: Domain events emitted on lifecycle changes
//! - [`errors`]: The [`DomainError`](errors::DomainError) taxonomy

pub mod entities;
pub mod errors;
pub mod events;
pub mod services;
pub mod value_objects;
