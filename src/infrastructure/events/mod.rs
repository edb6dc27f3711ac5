//! # Event Publishing
//!
//! Implementations of the [`EventPublisher`](crate::application::use_cases::EventPublisher)
//! port.

pub mod in_memory_publisher;

pub use in_memory_publisher::InMemoryEventPublisher;
