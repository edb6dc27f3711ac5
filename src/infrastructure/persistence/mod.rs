//! # Persistence Layer
//!
//! Repository traits and implementations.

pub mod in_memory;
pub mod traits;

pub use in_memory::{
    InMemoryJournalRepository, InMemoryQuoteRepository, InMemorySignatureRepository,
};
pub use traits::{
    JournalRepository, QuoteRepository, RepositoryError, RepositoryResult, SignatureRepository,
};
