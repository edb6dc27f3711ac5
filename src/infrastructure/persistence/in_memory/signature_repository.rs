//! # In-Memory Signature Repository
//!
//! In-memory implementation of [`SignatureRepository`] for testing. A quote
//! holds at most one signature; saving again replaces it.

use crate::domain::entities::signature::Signature;
use crate::domain::value_objects::QuoteId;
use crate::infrastructure::persistence::traits::{RepositoryResult, SignatureRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`SignatureRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemorySignatureRepository {
    storage: Arc<RwLock<HashMap<QuoteId, Signature>>>,
}

impl InMemorySignatureRepository {
    /// Creates a new empty in-memory signature repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignatureRepository for InMemorySignatureRepository {
    async fn save(&self, signature: &Signature) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(signature.quote_id(), signature.clone());
        Ok(())
    }

    async fn find_by_quote_id(&self, quote_id: &QuoteId) -> RepositoryResult<Option<Signature>> {
        let storage = self.storage.read().await;
        Ok(storage.get(quote_id).cloned())
    }
}
