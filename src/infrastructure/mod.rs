//! # Infrastructure Layer
//!
//! External adapters and implementations of domain ports.
//!
//! ## Persistence
//!
//! Repository traits and their in-memory implementations.
//!
//! ## Events
//!
//! Domain event publisher implementations.

pub mod events;
pub mod persistence;

pub use persistence as repos;
