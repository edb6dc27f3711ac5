//! # Use Case Integration Tests
//!
//! This module provides tests for application use cases, including reusable
//! mock implementations and integration scenarios.
//!
//! # Test Categories
//!
//! - **UpdateQuote**: Pricing update and journal diffing tests
//! - **TransitionQuote**: Workflow guard and event tests
//! - **ConvertQuote**: Conversion precondition and exactly-once tests
//! - **Integration**: End-to-end quote lifecycle

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::dto::quote_dto::{
    ConvertQuoteRequest, TransitionQuoteRequest, TypeMarginUpdate, UpdateQuoteRequest,
};
use crate::application::error::ApplicationError;
use crate::application::use_cases::convert_quote::ConvertQuoteUseCase;
use crate::application::use_cases::transition_quote::{EventPublisher, TransitionQuoteUseCase};
use crate::application::use_cases::update_quote::UpdateQuoteUseCase;
use crate::domain::entities::cost_detail::CostDetail;
use crate::domain::entities::journal::{JournalAction, JournalEntry};
use crate::domain::entities::line_item::LineItem;
use crate::domain::entities::lot::Lot;
use crate::domain::entities::quote::{ClientInfo, Quote};
use crate::domain::entities::signature::Signature;
use crate::domain::errors::DomainError;
use crate::domain::events::quote_events::QuoteEvent;
use crate::domain::services::workflow::{TransitionKind, WorkflowEngine};
use crate::domain::value_objects::{
    Amount, CostType, Quantity, QuoteId, QuoteStatus, Rate, Role, VatRate,
};
use crate::infrastructure::persistence::traits::{
    JournalRepository, QuoteRepository, RepositoryError, RepositoryResult, SignatureRepository,
};

// ============================================================================
// Reusable Mock Implementations
// ============================================================================

/// Mock quote repository with configurable behavior.
#[derive(Debug, Default)]
pub struct MockQuoteRepository {
    quotes: Mutex<HashMap<QuoteId, Quote>>,
    save_count: AtomicUsize,
    fail_save_with_conflict: AtomicBool,
}

impl MockQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(quote: Quote) -> Self {
        let repo = Self::new();
        repo.quotes.lock().unwrap().insert(quote.id(), quote);
        repo
    }

    pub fn set_fail_save_with_conflict(&self, fail: bool) {
        self.fail_save_with_conflict.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub fn get_quote(&self, id: QuoteId) -> Option<Quote> {
        self.quotes.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl QuoteRepository for MockQuoteRepository {
    async fn save(&self, quote: &Quote) -> RepositoryResult<()> {
        if self.fail_save_with_conflict.load(Ordering::SeqCst) {
            return Err(RepositoryError::version_conflict(
                "Quote",
                quote.id().to_string(),
                quote.version(),
                quote.version() + 1,
            ));
        }
        self.save_count.fetch_add(1, Ordering::SeqCst);
        self.quotes
            .lock()
            .unwrap()
            .insert(quote.id(), quote.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuoteId) -> RepositoryResult<Option<Quote>> {
        Ok(self.quotes.lock().unwrap().get(id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> RepositoryResult<Option<Quote>> {
        Ok(self
            .quotes
            .lock()
            .unwrap()
            .values()
            .find(|q| q.reference() == reference)
            .cloned())
    }

    async fn delete(&self, id: &QuoteId) -> RepositoryResult<()> {
        self.quotes
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Quote", id.to_string()))
    }
}

/// Mock journal repository recording appended entries.
#[derive(Debug, Default)]
pub struct MockJournalRepository {
    entries: Mutex<Vec<JournalEntry>>,
}

impl MockJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl JournalRepository for MockJournalRepository {
    async fn append(&self, entry: &JournalEntry) -> RepositoryResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn find_by_quote_id(&self, quote_id: &QuoteId) -> RepositoryResult<Vec<JournalEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.quote_id() == *quote_id)
            .cloned()
            .collect())
    }
}

/// Mock signature repository.
#[derive(Debug, Default)]
pub struct MockSignatureRepository {
    signatures: Mutex<HashMap<QuoteId, Signature>>,
}

impl MockSignatureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signature(signature: Signature) -> Self {
        let repo = Self::new();
        repo.signatures
            .lock()
            .unwrap()
            .insert(signature.quote_id(), signature);
        repo
    }
}

#[async_trait]
impl SignatureRepository for MockSignatureRepository {
    async fn save(&self, signature: &Signature) -> RepositoryResult<()> {
        self.signatures
            .lock()
            .unwrap()
            .insert(signature.quote_id(), signature.clone());
        Ok(())
    }

    async fn find_by_quote_id(&self, quote_id: &QuoteId) -> RepositoryResult<Option<Signature>> {
        Ok(self.signatures.lock().unwrap().get(quote_id).cloned())
    }
}

/// Mock event publisher recording published events.
#[derive(Debug, Default)]
pub struct MockEventPublisher {
    events: Mutex<Vec<QuoteEvent>>,
    should_fail: AtomicBool,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<QuoteEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: QuoteEvent) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("broker unavailable".to_string());
        }
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

// ============================================================================
// Test Fixtures
// ============================================================================

fn rate(value: f64) -> Rate {
    Rate::new(value).unwrap()
}

fn detail(cost_type: CostType, qty: f64, price: f64) -> CostDetail {
    CostDetail::new(
        cost_type,
        "detail",
        Quantity::new(qty).unwrap(),
        Amount::new(price).unwrap(),
    )
    .unwrap()
}

/// A draft quote with one lot: labor 40h × 42 and materials 100 × 35.
fn draft_quote() -> Quote {
    let mut quote = Quote::new(
        "DEV-2024-001",
        ClientInfo::new("SCI Les Tilleuls", "12 rue des Lilas"),
        rate(15.0),
        rate(8.0),
        VatRate::Standard,
    )
    .unwrap();

    let mut lot = Lot::new("LOT-01", "Plâtrerie", 1).unwrap();
    let mut line = LineItem::new(
        "Cloison placo",
        "m²",
        Quantity::new(1.0).unwrap(),
        Amount::new(6265.73).unwrap(),
    )
    .unwrap();
    line.add_cost_detail(detail(CostType::Labor, 40.0, 42.0)); // 1680
    line.add_cost_detail(detail(CostType::Materials, 100.0, 35.0)); // 3500
    lot.add_line_item(line);
    quote.add_lot(lot).unwrap();
    quote
}

fn accepted_quote() -> Quote {
    let mut quote = draft_quote();
    let engine = WorkflowEngine::default();
    let sales = crate::domain::value_objects::Actor::new("u-sales", Role::Sales);
    engine
        .apply(&mut quote, TransitionKind::Send, &sales, None)
        .unwrap();
    engine
        .apply(&mut quote, TransitionKind::Accept, &sales, None)
        .unwrap();
    quote
}

fn update_use_case(
    quote_repo: Arc<MockQuoteRepository>,
    journal_repo: Arc<MockJournalRepository>,
) -> UpdateQuoteUseCase {
    UpdateQuoteUseCase::new(quote_repo, journal_repo)
}

fn transition_use_case(
    quote_repo: Arc<MockQuoteRepository>,
    journal_repo: Arc<MockJournalRepository>,
    publisher: Arc<MockEventPublisher>,
) -> TransitionQuoteUseCase {
    TransitionQuoteUseCase::new(quote_repo, journal_repo, publisher, WorkflowEngine::default())
}

fn convert_use_case(
    quote_repo: Arc<MockQuoteRepository>,
    signature_repo: Arc<MockSignatureRepository>,
    journal_repo: Arc<MockJournalRepository>,
    publisher: Arc<MockEventPublisher>,
) -> ConvertQuoteUseCase {
    ConvertQuoteUseCase::new(quote_repo, signature_repo, journal_repo, publisher)
}

// ============================================================================
// UpdateQuote Tests
// ============================================================================

mod update_quote {
    use super::*;

    #[tokio::test]
    async fn update_recalculates_totals_with_type_margin() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let use_case = update_use_case(quote_repo.clone(), journal_repo.clone());

        // Materials dominate (3500 > 1680), so their 12% beats the 15% global
        let mut request = UpdateQuoteRequest::new(quote_id, "u-1", Role::Sales);
        request.type_margins = vec![TypeMarginUpdate {
            cost_type: CostType::Materials,
            rate: Some(12.0),
        }];

        let response = use_case.execute(request).await.unwrap();
        // raw 5180 × 1.08 (overhead) × 1.12 (materials margin) = 6265.728
        assert_eq!(response.total_excl_tax.get().to_string(), "6265.73");
        assert!(response.journaled);
        assert_eq!(journal_repo.entry_count(), 1);
    }

    #[tokio::test]
    async fn noop_update_writes_no_journal_entry() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let use_case = update_use_case(quote_repo.clone(), journal_repo.clone());

        // Same global margin as the current one
        let mut request = UpdateQuoteRequest::new(quote_id, "u-1", Role::Sales);
        request.global_margin = Some(15.0);

        let response = use_case.execute(request).await.unwrap();
        assert!(!response.journaled);
        assert_eq!(journal_repo.entry_count(), 0);
        assert_eq!(quote_repo.save_count(), 1);
    }

    #[tokio::test]
    async fn journal_entry_keeps_only_real_diffs() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let use_case = update_use_case(quote_repo, journal_repo.clone());

        let mut request = UpdateQuoteRequest::new(quote_id, "u-1", Role::Sales);
        request.global_margin = Some(18.0); // changed
        request.overhead = Some(8.0); // unchanged
        request.retention = Some(5.0); // changed

        use_case.execute(request).await.unwrap();
        let entries = journal_repo.entries();
        assert_eq!(entries.len(), 1);
        match entries[0].action() {
            JournalAction::Updated { diffs } => {
                let fields: Vec<&str> = diffs.iter().map(|d| d.field.as_str()).collect();
                assert_eq!(fields, vec!["global_margin", "retention"]);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[tokio::test]
    async fn sent_quote_is_not_modifiable() {
        let mut quote = draft_quote();
        WorkflowEngine::default()
            .apply(
                &mut quote,
                TransitionKind::Send,
                &crate::domain::value_objects::Actor::new("u-1", Role::Sales),
                None,
            )
            .unwrap();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let use_case = update_use_case(quote_repo, journal_repo);

        let mut request = UpdateQuoteRequest::new(quote_id, "u-1", Role::Sales);
        request.global_margin = Some(20.0);

        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::DomainError(DomainError::QuoteNotModifiable { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_quote_is_not_found() {
        let quote_repo = Arc::new(MockQuoteRepository::new());
        let journal_repo = Arc::new(MockJournalRepository::new());
        let use_case = update_use_case(quote_repo, journal_repo);

        let request = UpdateQuoteRequest::new(QuoteId::new_v4(), "u-1", Role::Sales);
        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(err, ApplicationError::QuoteNotFound(_)));
    }

    #[tokio::test]
    async fn negative_margin_fails_validation() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let use_case = update_use_case(quote_repo, journal_repo);

        let mut request = UpdateQuoteRequest::new(quote_id, "u-1", Role::Sales);
        request.global_margin = Some(-1.0);

        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }
}

// ============================================================================
// TransitionQuote Tests
// ============================================================================

mod transition_quote {
    use super::*;

    #[tokio::test]
    async fn send_publishes_event_and_journals() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let use_case =
            transition_use_case(quote_repo.clone(), journal_repo.clone(), publisher.clone());

        let request =
            TransitionQuoteRequest::new(quote_id, "u-1", Role::Sales, TransitionKind::Send);
        let response = use_case.execute(request).await.unwrap();

        assert_eq!(response.from, QuoteStatus::Draft);
        assert_eq!(response.to, QuoteStatus::Sent);
        assert_eq!(
            quote_repo.get_quote(quote_id).unwrap().status(),
            QuoteStatus::Sent
        );

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].quote_id(), quote_id);

        let entries = journal_repo.entries();
        assert!(matches!(
            entries[0].action(),
            JournalAction::StatusChanged {
                from: QuoteStatus::Draft,
                to: QuoteStatus::Sent,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn refuse_without_motif_changes_nothing() {
        let mut quote = draft_quote();
        WorkflowEngine::default()
            .apply(
                &mut quote,
                TransitionKind::Send,
                &crate::domain::value_objects::Actor::new("u-1", Role::Sales),
                None,
            )
            .unwrap();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let use_case =
            transition_use_case(quote_repo.clone(), journal_repo.clone(), publisher.clone());

        let request =
            TransitionQuoteRequest::new(quote_id, "u-1", Role::Sales, TransitionKind::Refuse);
        let err = use_case.execute(request).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::DomainError(DomainError::MissingJustification { .. })
        ));
        assert_eq!(
            quote_repo.get_quote(quote_id).unwrap().status(),
            QuoteStatus::Sent
        );
        assert_eq!(journal_repo.entry_count(), 0);
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn large_quote_validation_needs_elevated_role() {
        let mut quote = draft_quote();
        quote.set_totals(
            Amount::new(75_000.0).unwrap(),
            Amount::new(90_000.0).unwrap(),
        );
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let use_case =
            transition_use_case(quote_repo.clone(), journal_repo.clone(), publisher.clone());

        // Submit for validation, then a sales user may not validate
        use_case
            .execute(TransitionQuoteRequest::new(
                quote_id,
                "u-1",
                Role::Sales,
                TransitionKind::Submit,
            ))
            .await
            .unwrap();

        let err = use_case
            .execute(TransitionQuoteRequest::new(
                quote_id,
                "u-1",
                Role::Sales,
                TransitionKind::Validate,
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::DomainError(DomainError::TransitionNotAllowed { .. })
        ));

        // A manager may
        let response = use_case
            .execute(TransitionQuoteRequest::new(
                quote_id,
                "u-2",
                Role::Manager,
                TransitionKind::Validate,
            ))
            .await
            .unwrap();
        assert_eq!(response.to, QuoteStatus::Sent);
    }

    #[tokio::test]
    async fn lose_records_justification_in_journal() {
        let mut quote = draft_quote();
        WorkflowEngine::default()
            .apply(
                &mut quote,
                TransitionKind::Send,
                &crate::domain::value_objects::Actor::new("u-1", Role::Sales),
                None,
            )
            .unwrap();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let use_case = transition_use_case(quote_repo, journal_repo.clone(), publisher);

        let request =
            TransitionQuoteRequest::new(quote_id, "u-1", Role::Sales, TransitionKind::Lose)
                .with_justification("concurrent moins-disant");
        use_case.execute(request).await.unwrap();

        match journal_repo.entries()[0].action() {
            JournalAction::StatusChanged { justification, .. } => {
                assert_eq!(justification.as_deref(), Some("concurrent moins-disant"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[tokio::test]
    async fn publisher_failure_surfaces() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        publisher.set_fail(true);
        let use_case = transition_use_case(quote_repo, journal_repo, publisher);

        let request =
            TransitionQuoteRequest::new(quote_id, "u-1", Role::Sales, TransitionKind::Send);
        let err = use_case.execute(request).await.unwrap_err();
        assert!(matches!(err, ApplicationError::EventPublishError(_)));
    }
}

// ============================================================================
// ConvertQuote Tests
// ============================================================================

mod convert_quote {
    use super::*;

    #[tokio::test]
    async fn conversion_builds_payload_and_marks_quote() {
        let quote = accepted_quote();
        let quote_id = quote.id();
        let signature = Signature::new(quote_id, "M. Dupont", "payload", "sha256:abc");
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let signature_repo = Arc::new(MockSignatureRepository::with_signature(signature));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let use_case = convert_use_case(
            quote_repo.clone(),
            signature_repo,
            journal_repo.clone(),
            publisher.clone(),
        );

        let request = ConvertQuoteRequest::new(quote_id, "u-1", Role::Manager);
        let response = use_case.execute(request).await.unwrap();

        assert_eq!(response.payload.lots.len(), 1);
        assert_eq!(response.payload.lots[0].code, "LOT-01");
        // Contracted amount of the lot is the sum of quantity × unit_price
        assert_eq!(
            response.payload.lots[0].contracted_amount,
            Amount::new(6265.73).unwrap()
        );
        assert_eq!(response.payload.client.name, "SCI Les Tilleuls");

        let stored = quote_repo.get_quote(quote_id).unwrap();
        assert_eq!(stored.converted_to(), Some(response.project_id));

        assert!(matches!(
            journal_repo.entries()[0].action(),
            JournalAction::Converted { .. }
        ));
        assert_eq!(publisher.events().len(), 1);
    }

    #[tokio::test]
    async fn only_accepted_quotes_convert() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let use_case = convert_use_case(
            quote_repo,
            Arc::new(MockSignatureRepository::new()),
            Arc::new(MockJournalRepository::new()),
            Arc::new(MockEventPublisher::new()),
        );

        let err = use_case
            .execute(ConvertQuoteRequest::new(quote_id, "u-1", Role::Manager))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::DomainError(DomainError::QuoteNotConvertible { .. })
        ));
    }

    #[tokio::test]
    async fn missing_signature_blocks_conversion() {
        let quote = accepted_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let use_case = convert_use_case(
            quote_repo,
            Arc::new(MockSignatureRepository::new()),
            Arc::new(MockJournalRepository::new()),
            Arc::new(MockEventPublisher::new()),
        );

        let err = use_case
            .execute(ConvertQuoteRequest::new(quote_id, "u-1", Role::Manager))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::DomainError(DomainError::SignatureMissing { .. })
        ));
    }

    #[tokio::test]
    async fn invalidated_signature_blocks_conversion() {
        let quote = accepted_quote();
        let quote_id = quote.id();
        let mut signature = Signature::new(quote_id, "M. Dupont", "payload", "sha256:abc");
        signature.invalidate();
        let use_case = convert_use_case(
            Arc::new(MockQuoteRepository::with_quote(quote)),
            Arc::new(MockSignatureRepository::with_signature(signature)),
            Arc::new(MockJournalRepository::new()),
            Arc::new(MockEventPublisher::new()),
        );

        let err = use_case
            .execute(ConvertQuoteRequest::new(quote_id, "u-1", Role::Manager))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::DomainError(DomainError::SignatureMissing { .. })
        ));
    }

    #[tokio::test]
    async fn second_conversion_is_rejected() {
        let quote = accepted_quote();
        let quote_id = quote.id();
        let signature = Signature::new(quote_id, "M. Dupont", "payload", "sha256:abc");
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let use_case = convert_use_case(
            quote_repo.clone(),
            Arc::new(MockSignatureRepository::with_signature(signature)),
            Arc::new(MockJournalRepository::new()),
            Arc::new(MockEventPublisher::new()),
        );

        let first = use_case
            .execute(ConvertQuoteRequest::new(quote_id, "u-1", Role::Manager))
            .await
            .unwrap();

        let err = use_case
            .execute(ConvertQuoteRequest::new(quote_id, "u-2", Role::Manager))
            .await
            .unwrap_err();
        match err {
            ApplicationError::DomainError(DomainError::QuoteAlreadyConverted {
                project_id,
                ..
            }) => assert_eq!(project_id, first.project_id),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn losing_the_version_race_is_a_conflict() {
        let quote = accepted_quote();
        let quote_id = quote.id();
        let signature = Signature::new(quote_id, "M. Dupont", "payload", "sha256:abc");
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        quote_repo.set_fail_save_with_conflict(true);
        let journal_repo = Arc::new(MockJournalRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());
        let use_case = convert_use_case(
            quote_repo,
            Arc::new(MockSignatureRepository::with_signature(signature)),
            journal_repo.clone(),
            publisher.clone(),
        );

        let err = use_case
            .execute(ConvertQuoteRequest::new(quote_id, "u-1", Role::Manager))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        // The loser must not journal or publish
        assert_eq!(journal_repo.entry_count(), 0);
        assert!(publisher.events().is_empty());
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

mod integration {
    use super::*;

    #[tokio::test]
    async fn full_lifecycle_draft_to_project() {
        let quote = draft_quote();
        let quote_id = quote.id();
        let quote_repo = Arc::new(MockQuoteRepository::with_quote(quote));
        let journal_repo = Arc::new(MockJournalRepository::new());
        let signature_repo = Arc::new(MockSignatureRepository::new());
        let publisher = Arc::new(MockEventPublisher::new());

        let update = update_use_case(quote_repo.clone(), journal_repo.clone());
        let transition =
            transition_use_case(quote_repo.clone(), journal_repo.clone(), publisher.clone());
        let convert = convert_use_case(
            quote_repo.clone(),
            signature_repo.clone(),
            journal_repo.clone(),
            publisher.clone(),
        );

        // Price: materials dominate, 12% type margin beats 15% global
        let mut pricing = UpdateQuoteRequest::new(quote_id, "u-sales", Role::Sales);
        pricing.type_margins = vec![TypeMarginUpdate {
            cost_type: CostType::Materials,
            rate: Some(12.0),
        }];
        let priced = update.execute(pricing).await.unwrap();
        assert_eq!(priced.total_excl_tax.get().to_string(), "6265.73");

        // Send, negotiate, accept
        for (transition_kind, role) in [
            (TransitionKind::Send, Role::Sales),
            (TransitionKind::Negotiate, Role::Sales),
            (TransitionKind::Accept, Role::Sales),
        ] {
            transition
                .execute(TransitionQuoteRequest::new(
                    quote_id,
                    "u-sales",
                    role,
                    transition_kind,
                ))
                .await
                .unwrap();
        }

        // Sign and convert
        signature_repo
            .save(&Signature::new(quote_id, "M. Dupont", "payload", "sha256:abc"))
            .await
            .unwrap();
        let converted = convert
            .execute(ConvertQuoteRequest::new(quote_id, "u-manager", Role::Manager))
            .await
            .unwrap();

        assert_eq!(converted.payload.reference, "DEV-2024-001");
        let stored = quote_repo.get_quote(quote_id).unwrap();
        assert!(stored.is_converted());
        assert_eq!(stored.status(), QuoteStatus::Accepted);

        // Journal: 1 update + 3 transitions + 1 conversion
        assert_eq!(journal_repo.entry_count(), 5);
        // Events: 3 transitions + 1 conversion
        assert_eq!(publisher.events().len(), 4);
    }
}
