//! # Update Quote Use Case
//!
//! Use case for updating a quote's pricing configuration.
//!
//! This use case orchestrates a pricing update, including:
//! - Request validation
//! - Modifiability checks (delegated to the aggregate)
//! - Field-level diffing for the audit journal
//! - Totals recomputation through the price chain
//! - Quote persistence
//!
//! A request in which every field matches the current value is a no-op: the
//! totals are still recomputed and saved, but no journal entry is written.

use crate::application::dto::quote_dto::{UpdateQuoteRequest, UpdateQuoteResponse};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::services::journal_recorder::{self, FieldChange};
use crate::domain::services::price_calculator;
use crate::infrastructure::persistence::traits::{JournalRepository, QuoteRepository};
use std::sync::Arc;
use tracing::{info, instrument};

/// Use case for updating a quote's pricing configuration.
#[derive(Debug)]
pub struct UpdateQuoteUseCase {
    quote_repository: Arc<dyn QuoteRepository>,
    journal_repository: Arc<dyn JournalRepository>,
}

impl UpdateQuoteUseCase {
    /// Creates a new UpdateQuoteUseCase with all dependencies.
    #[must_use]
    pub fn new(
        quote_repository: Arc<dyn QuoteRepository>,
        journal_repository: Arc<dyn JournalRepository>,
    ) -> Self {
        Self {
            quote_repository,
            journal_repository,
        }
    }

    /// Executes the update quote use case.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Request validation fails
    /// - The quote does not exist
    /// - The quote is not in a modifiable state
    /// - Recomputation overflows
    /// - Persistence fails
    #[instrument(skip_all, fields(quote_id = %request.quote_id))]
    pub async fn execute(
        &self,
        request: UpdateQuoteRequest,
    ) -> ApplicationResult<UpdateQuoteResponse> {
        // 1. Validate request
        request.validate().map_err(ApplicationError::validation)?;

        // 2. Convert to domain types
        let update = request
            .to_domain_types()
            .map_err(ApplicationError::validation)?;

        // 3. Load quote
        let mut quote = self
            .quote_repository
            .find_by_id(&request.quote_id)
            .await?
            .ok_or_else(|| ApplicationError::quote_not_found(request.quote_id))?;

        // 4. Apply fields, collecting before/after pairs for the journal
        let mut changes = Vec::new();

        if let Some(rate) = update.global_margin {
            changes.push(FieldChange::new(
                "global_margin",
                quote.global_margin(),
                rate,
            ));
            quote.set_global_margin(rate)?;
        }

        if let Some(rate) = update.overhead {
            changes.push(FieldChange::new("overhead", quote.overhead(), rate));
            quote.set_overhead(rate)?;
        }

        if let Some(rate) = update.retention {
            changes.push(FieldChange::new("retention", quote.retention(), rate));
            quote.set_retention(rate)?;
        }

        if let Some(vat) = update.default_vat {
            changes.push(FieldChange::new("default_vat", quote.default_vat(), vat));
            quote.set_default_vat(vat)?;
        }

        for (cost_type, rate) in update.type_margins {
            changes.push(FieldChange::new(
                format!("type_margin.{}", cost_type),
                quote.type_margins().for_type(cost_type),
                rate,
            ));
            quote.set_type_margin(cost_type, rate)?;
        }

        // 5. Recompute totals through the price chain
        let totals = price_calculator::recalculate(&mut quote)?;

        // 6. Journal the real changes, if any
        let actor = request.actor();
        let entry = journal_recorder::record_update(quote.id(), &actor.user_id, changes);
        let journaled = entry.is_some();
        if let Some(entry) = &entry {
            self.journal_repository.append(entry).await?;
        }

        // 7. Persist quote
        self.quote_repository.save(&quote).await?;

        info!(
            version = quote.version(),
            journaled,
            total_excl_tax = %totals.excl_tax,
            "quote updated"
        );

        // 8. Return response
        Ok(UpdateQuoteResponse {
            quote_id: quote.id(),
            version: quote.version(),
            total_excl_tax: totals.excl_tax,
            total_incl_tax: totals.incl_tax,
            journaled,
        })
    }
}
