//! # Convert Quote Use Case
//!
//! Use case for converting an accepted quote into a project.
//!
//! This use case orchestrates the conversion, including:
//! - Precondition checks (accepted status, valid signature, not yet converted)
//! - Building the project provisioning payload from the quote's lots
//! - Marking the quote converted under optimistic locking
//! - Audit journal recording
//! - Domain event publishing
//!
//! Conversion is exactly-once: the converted marker plus the version guard
//! at save time ensure that of two concurrent conversions one wins and one
//! fails with a conflict, and a quote is never converted twice.

use crate::application::dto::quote_dto::{
    ConvertQuoteRequest, ConvertQuoteResponse, ProjectLot, ProjectPayload,
};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::use_cases::transition_quote::EventPublisher;
use crate::domain::entities::quote::Quote;
use crate::domain::errors::DomainError;
use crate::domain::events::quote_events::QuoteConverted;
use crate::domain::services::journal_recorder;
use crate::domain::value_objects::{ProjectId, QuoteStatus};
use crate::infrastructure::persistence::traits::{
    JournalRepository, QuoteRepository, SignatureRepository,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Use case for converting an accepted quote into a project.
#[derive(Debug)]
pub struct ConvertQuoteUseCase {
    quote_repository: Arc<dyn QuoteRepository>,
    signature_repository: Arc<dyn SignatureRepository>,
    journal_repository: Arc<dyn JournalRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ConvertQuoteUseCase {
    /// Creates a new ConvertQuoteUseCase with all dependencies.
    #[must_use]
    pub fn new(
        quote_repository: Arc<dyn QuoteRepository>,
        signature_repository: Arc<dyn SignatureRepository>,
        journal_repository: Arc<dyn JournalRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            quote_repository,
            signature_repository,
            journal_repository,
            event_publisher,
        }
    }

    /// Executes the convert quote use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Request validation fails
    /// - The quote does not exist
    /// - The quote is not accepted
    /// - The quote has no valid signature
    /// - The quote was already converted
    /// - A concurrent conversion won the version race
    /// - Persistence or event publishing fails
    #[instrument(skip_all, fields(quote_id = %request.quote_id))]
    pub async fn execute(
        &self,
        request: ConvertQuoteRequest,
    ) -> ApplicationResult<ConvertQuoteResponse> {
        // 1. Validate request
        request.validate().map_err(ApplicationError::validation)?;

        // 2. Load quote
        let mut quote = self
            .quote_repository
            .find_by_id(&request.quote_id)
            .await?
            .ok_or_else(|| ApplicationError::quote_not_found(request.quote_id))?;

        // 3. Preconditions, in a fixed order: status, signature, idempotency
        if quote.status() != QuoteStatus::Accepted {
            return Err(DomainError::QuoteNotConvertible {
                quote_id: quote.id(),
                status: quote.status(),
            }
            .into());
        }

        let signature = self
            .signature_repository
            .find_by_quote_id(&quote.id())
            .await?;
        let signed = signature.as_ref().map(|s| s.is_valid()).unwrap_or(false);
        if !signed {
            return Err(DomainError::SignatureMissing {
                quote_id: quote.id(),
            }
            .into());
        }

        // 4. Mark converted; fails if a project reference is already recorded
        let project_id = ProjectId::new_v4();
        quote.mark_converted(project_id)?;

        // 5. Build the provisioning payload
        let payload = build_payload(&quote, project_id)?;

        // 6. Persist under the version guard; a concurrent conversion that
        //    saved first makes this a conflict, not a double conversion
        self.quote_repository.save(&quote).await?;

        // 7. Record the journal entry
        let actor = request.actor();
        let entry = journal_recorder::record_conversion(quote.id(), &actor.user_id, project_id);
        self.journal_repository.append(&entry).await?;

        // 8. Publish domain event
        let event = QuoteConverted::new(quote.id(), project_id, actor);
        self.event_publisher
            .publish(event.into())
            .await
            .map_err(ApplicationError::event_publish)?;

        info!(project_id = %project_id, "quote converted");

        // 9. Return response
        Ok(ConvertQuoteResponse {
            quote_id: quote.id(),
            project_id,
            payload,
        })
    }
}

fn build_payload(quote: &Quote, project_id: ProjectId) -> ApplicationResult<ProjectPayload> {
    let mut lots = Vec::with_capacity(quote.lots().len());
    for lot in quote.lots() {
        lots.push(ProjectLot {
            code: lot.code().to_string(),
            label: lot.label().to_string(),
            contracted_amount: lot.contracted_amount()?,
        });
    }

    Ok(ProjectPayload {
        project_id,
        source_quote: quote.id(),
        reference: quote.reference().to_string(),
        client: quote.client().clone(),
        lots,
        total_excl_tax: quote.total_excl_tax(),
        retention: quote.retention(),
    })
}
