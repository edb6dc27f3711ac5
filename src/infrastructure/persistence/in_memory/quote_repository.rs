//! # In-Memory Quote Repository
//!
//! In-memory implementation of [`QuoteRepository`] for testing.
//!
//! This implementation uses a thread-safe `HashMap` for storage,
//! making it suitable for unit tests without database dependencies. The
//! optimistic-locking check on save is the same one a SQL implementation
//! performs with a `WHERE version < $n` clause, so exactly-once guarantees
//! can be exercised against it.
//!
//! # Examples
//!
//! ```
//! use devis_engine::infrastructure::persistence::in_memory::InMemoryQuoteRepository;
//!
//! let repo = InMemoryQuoteRepository::new();
//! assert!(repo.is_empty());
//! ```

use crate::domain::entities::quote::Quote;
use crate::domain::value_objects::QuoteId;
use crate::infrastructure::persistence::traits::{
    QuoteRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`QuoteRepository`].
///
/// # Thread Safety
///
/// Uses `Arc<RwLock<HashMap>>` for thread-safe access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteRepository {
    storage: Arc<RwLock<HashMap<QuoteId, Quote>>>,
}

impl InMemoryQuoteRepository {
    /// Creates a new empty in-memory quote repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        // Use try_read to avoid blocking in sync context
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all quotes from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn save(&self, quote: &Quote) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;

        // Optimistic locking: the write must carry a newer version
        if let Some(existing) = storage.get(&quote.id()) {
            if existing.version() >= quote.version() {
                return Err(RepositoryError::version_conflict(
                    "Quote",
                    quote.id().to_string(),
                    quote.version(),
                    existing.version(),
                ));
            }
        }

        storage.insert(quote.id(), quote.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteId) -> RepositoryResult<Option<Quote>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> RepositoryResult<Option<Quote>> {
        let storage = self.storage.read().await;
        Ok(storage
            .values()
            .find(|q| q.reference() == reference)
            .cloned())
    }

    async fn delete(&self, id: &QuoteId) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Quote", id.to_string()))
    }
}
