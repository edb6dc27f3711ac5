//! # Repository Traits
//!
//! Persistence ports for the quote aggregate, its audit journal, and
//! signatures. Implementations must be safe to share across tasks; saves
//! are guarded by optimistic locking on the aggregate version.

use crate::domain::entities::journal::JournalEntry;
use crate::domain::entities::quote::Quote;
use crate::domain::entities::signature::Signature;
use crate::domain::value_objects::QuoteId;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error produced by a repository operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind.
        entity: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// An entity with the same identifier already exists.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// Entity kind.
        entity: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Optimistic locking detected a concurrent write.
    #[error("{entity} {id}: version conflict (attempted {attempted}, current {current})")]
    VersionConflict {
        /// Entity kind.
        entity: &'static str,
        /// Entity identifier.
        id: String,
        /// The version the caller tried to write.
        attempted: u64,
        /// The version currently stored.
        current: u64,
    },

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Creates an already-exists error.
    #[must_use]
    pub fn already_exists(entity: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.into(),
        }
    }

    /// Creates a version-conflict error.
    #[must_use]
    pub fn version_conflict(
        entity: &'static str,
        id: impl Into<String>,
        attempted: u64,
        current: u64,
    ) -> Self {
        Self::VersionConflict {
            entity,
            id: id.into(),
            attempted,
            current,
        }
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Returns true if this is a version conflict.
    #[inline]
    #[must_use]
    pub const fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for quote persistence.
#[async_trait]
pub trait QuoteRepository: Send + Sync + fmt::Debug {
    /// Saves a quote, enforcing optimistic locking on its version.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::VersionConflict`] if the stored version is
    /// not older than the one being written.
    async fn save(&self, quote: &Quote) -> RepositoryResult<()>;

    /// Finds a quote by id. Soft-deleted quotes are still returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_by_id(&self, id: &QuoteId) -> RepositoryResult<Option<Quote>>;

    /// Finds a quote by its human-readable reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_by_reference(&self, reference: &str) -> RepositoryResult<Option<Quote>>;

    /// Removes a quote from storage.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the quote does not exist.
    async fn delete(&self, id: &QuoteId) -> RepositoryResult<()>;
}

/// Repository for the append-only audit journal.
#[async_trait]
pub trait JournalRepository: Send + Sync + fmt::Debug {
    /// Appends an entry. Entries are never updated or removed.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    async fn append(&self, entry: &JournalEntry) -> RepositoryResult<()>;

    /// Returns the entries for a quote, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_by_quote_id(&self, quote_id: &QuoteId) -> RepositoryResult<Vec<JournalEntry>>;
}

/// Repository for electronic signatures.
#[async_trait]
pub trait SignatureRepository: Send + Sync + fmt::Debug {
    /// Saves a signature.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    async fn save(&self, signature: &Signature) -> RepositoryResult<()>;

    /// Finds the signature attached to a quote, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn find_by_quote_id(&self, quote_id: &QuoteId) -> RepositoryResult<Option<Signature>>;
}
