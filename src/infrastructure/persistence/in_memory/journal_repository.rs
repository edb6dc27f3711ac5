//! # In-Memory Journal Repository
//!
//! In-memory implementation of [`JournalRepository`] for testing.
//!
//! Entries are kept in arrival order per quote; the journal is append-only
//! so there is no update or delete path.

use crate::domain::entities::journal::JournalEntry;
use crate::domain::value_objects::QuoteId;
use crate::infrastructure::persistence::traits::{JournalRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`JournalRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryJournalRepository {
    storage: Arc<RwLock<HashMap<QuoteId, Vec<JournalEntry>>>>,
}

impl InMemoryJournalRepository {
    /// Creates a new empty in-memory journal repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries across all quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Returns true if the journal is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl JournalRepository for InMemoryJournalRepository {
    async fn append(&self, entry: &JournalEntry) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage
            .entry(entry.quote_id())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn find_by_quote_id(&self, quote_id: &QuoteId) -> RepositoryResult<Vec<JournalEntry>> {
        let storage = self.storage.read().await;
        Ok(storage.get(quote_id).cloned().unwrap_or_default())
    }
}
