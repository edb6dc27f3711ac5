//! # Transition Quote Use Case
//!
//! Use case for applying workflow transitions to quotes.
//!
//! This use case orchestrates a lifecycle change, including:
//! - Request validation
//! - Guard evaluation through the workflow engine
//! - Audit journal recording
//! - Quote persistence
//! - Domain event publishing
//!
//! The guards run in the engine's fixed order, so a refusal without a motif
//! fails before the quote's state is even inspected.

use crate::application::dto::quote_dto::{TransitionQuoteRequest, TransitionQuoteResponse};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::events::quote_events::{QuoteEvent, QuoteStatusChanged};
use crate::domain::services::journal_recorder;
use crate::domain::services::workflow::WorkflowEngine;
use crate::infrastructure::persistence::traits::{JournalRepository, QuoteRepository};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

/// Publisher for domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync + fmt::Debug {
    /// Publishes a quote event.
    ///
    /// # Errors
    ///
    /// Returns an error if publishing fails.
    async fn publish(&self, event: QuoteEvent) -> Result<(), String>;
}

/// Use case for applying a workflow transition to a quote.
#[derive(Debug)]
pub struct TransitionQuoteUseCase {
    quote_repository: Arc<dyn QuoteRepository>,
    journal_repository: Arc<dyn JournalRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    workflow: WorkflowEngine,
}

impl TransitionQuoteUseCase {
    /// Creates a new TransitionQuoteUseCase with all dependencies.
    #[must_use]
    pub fn new(
        quote_repository: Arc<dyn QuoteRepository>,
        journal_repository: Arc<dyn JournalRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        workflow: WorkflowEngine,
    ) -> Self {
        Self {
            quote_repository,
            journal_repository,
            event_publisher,
            workflow,
        }
    }

    /// Executes the transition quote use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Request validation fails
    /// - The quote does not exist
    /// - A workflow guard denies the transition
    /// - Persistence fails
    /// - Event publishing fails
    #[instrument(skip_all, fields(quote_id = %request.quote_id, transition = %request.transition))]
    pub async fn execute(
        &self,
        request: TransitionQuoteRequest,
    ) -> ApplicationResult<TransitionQuoteResponse> {
        // 1. Validate request
        request.validate().map_err(ApplicationError::validation)?;

        // 2. Load quote
        let mut quote = self
            .quote_repository
            .find_by_id(&request.quote_id)
            .await?
            .ok_or_else(|| ApplicationError::quote_not_found(request.quote_id))?;

        let from = quote.status();
        let actor = request.actor();

        // 3. Run the workflow guards and apply the transition
        let to = self.workflow.apply(
            &mut quote,
            request.transition,
            &actor,
            request.justification.as_deref(),
        )?;

        // 4. Record the journal entry
        let entry = journal_recorder::record_status_change(
            quote.id(),
            &actor.user_id,
            from,
            to,
            request.justification.clone(),
        );
        self.journal_repository.append(&entry).await?;

        // 5. Persist quote
        self.quote_repository.save(&quote).await?;

        // 6. Publish domain event
        let event = QuoteStatusChanged::new(
            quote.id(),
            from,
            to,
            actor,
            request.justification,
        );
        self.event_publisher
            .publish(event.into())
            .await
            .map_err(ApplicationError::event_publish)?;

        info!(from = %from, to = %to, "quote transitioned");

        // 7. Return response
        Ok(TransitionQuoteResponse {
            quote_id: quote.id(),
            from,
            to,
            version: quote.version(),
        })
    }
}
