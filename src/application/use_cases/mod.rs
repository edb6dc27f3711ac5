//! # Use Cases
//!
//! Application use cases implementing business workflows.
//!
//! Each use case orchestrates domain objects to perform a specific
//! business operation, handling validation, persistence, journaling, and
//! events.

pub mod convert_quote;
pub mod transition_quote;
pub mod update_quote;

#[cfg(test)]
mod tests;

pub use convert_quote::ConvertQuoteUseCase;
pub use transition_quote::{EventPublisher, TransitionQuoteUseCase};
pub use update_quote::UpdateQuoteUseCase;
