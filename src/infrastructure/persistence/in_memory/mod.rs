//! # In-Memory Repositories
//!
//! Thread-safe in-memory repository implementations, used for testing and
//! local development.

pub mod journal_repository;
pub mod quote_repository;
pub mod signature_repository;

pub use journal_repository::InMemoryJournalRepository;
pub use quote_repository::InMemoryQuoteRepository;
pub use signature_repository::InMemorySignatureRepository;
