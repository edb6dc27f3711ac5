//! # In-Memory Event Publisher
//!
//! In-memory implementation of [`EventPublisher`] for testing and local
//! development. Published events are retained in order and can be inspected
//! by tests.

use crate::application::use_cases::EventPublisher;
use crate::domain::events::quote_events::QuoteEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`EventPublisher`].
///
/// # Thread Safety
///
/// Uses `Arc<RwLock<Vec>>` for thread-safe access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventPublisher {
    published: Arc<RwLock<Vec<QuoteEvent>>>,
}

impl InMemoryEventPublisher {
    /// Creates a new empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events published so far, in publication order.
    pub async fn published(&self) -> Vec<QuoteEvent> {
        self.published.read().await.clone()
    }

    /// Returns the number of published events.
    ///
    /// Returns 0 if the lock is contended.
    #[must_use]
    pub fn len(&self) -> usize {
        self.published.try_read().map(|events| events.len()).unwrap_or(0)
    }

    /// Returns true if no events have been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all published events.
    pub async fn clear(&self) {
        self.published.write().await.clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: QuoteEvent) -> Result<(), String> {
        self.published.write().await.push(event);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::events::quote_events::QuoteStatusChanged;
    use crate::domain::value_objects::{Actor, QuoteId, QuoteStatus, Role};

    fn status_event(quote_id: QuoteId) -> QuoteEvent {
        QuoteStatusChanged::new(
            quote_id,
            QuoteStatus::Draft,
            QuoteStatus::Sent,
            Actor::new("u-1", Role::Sales),
            None,
        )
        .into()
    }

    #[tokio::test]
    async fn publish_retains_order() {
        let publisher = InMemoryEventPublisher::new();
        let first = QuoteId::new_v4();
        let second = QuoteId::new_v4();

        publisher.publish(status_event(first)).await.unwrap();
        publisher.publish(status_event(second)).await.unwrap();

        let events = publisher.published().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].quote_id(), first);
        assert_eq!(events[1].quote_id(), second);
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let publisher = InMemoryEventPublisher::new();
        publisher.publish(status_event(QuoteId::new_v4())).await.unwrap();
        assert!(!publisher.is_empty());

        publisher.clear().await;
        assert!(publisher.is_empty());
    }
}
