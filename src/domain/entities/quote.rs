//! # Quote Aggregate (Devis)
//!
//! The quote aggregate root: client data, pricing configuration, lots,
//! lifecycle status, totals, and the converted-project link.
//!
//! Status never changes through this type directly: the field is only
//! writable by the workflow engine, which evaluates the state machine and
//! its guards first. Content mutation is gated on
//! [`QuoteStatus::is_modifiable`].
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::entities::lot::Lot;
//! use devis_engine::domain::entities::quote::{ClientInfo, Quote};
//! use devis_engine::domain::value_objects::{Rate, VatRate};
//!
//! let mut quote = Quote::new(
//!     "DEV-2024-001",
//!     ClientInfo::new("SCI Les Tilleuls", "12 rue des Lilas, Nantes"),
//!     Rate::new(15.0).unwrap(),
//!     Rate::new(12.0).unwrap(),
//!     VatRate::Standard,
//! )
//! .unwrap();
//!
//! quote.add_lot(Lot::new("LOT-01", "Gros œuvre", 0).unwrap()).unwrap();
//! assert_eq!(quote.lots().len(), 1);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Amount, CostType, LotId, ProjectId, QuoteId, QuoteStatus, Rate, Timestamp, VatRate,
};
use crate::domain::entities::lot::Lot;
use serde::{Deserialize, Serialize};

/// Client identity carried by a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client display name.
    pub name: String,

    /// Postal address of the client or the work site.
    pub address: String,

    /// Contact email, if known.
    pub email: Option<String>,

    /// Contact phone number, if known.
    pub phone: Option<String>,
}

impl ClientInfo {
    /// Creates client info with the mandatory fields.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            email: None,
            phone: None,
        }
    }
}

/// Optional per-cost-type margin overrides configured on a quote.
///
/// A rate that is `Some`, including an explicit zero, counts as configured
/// during margin resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeMargins {
    /// Margin override for labor costs.
    pub labor: Option<Rate>,

    /// Margin override for materials costs.
    pub materials: Option<Rate>,

    /// Margin override for subcontracting costs.
    pub subcontracting: Option<Rate>,

    /// Margin override for equipment costs.
    pub equipment: Option<Rate>,

    /// Margin override for travel costs.
    pub travel: Option<Rate>,
}

impl TypeMargins {
    /// Returns the configured rate for a cost type, if any.
    #[must_use]
    pub const fn for_type(&self, cost_type: CostType) -> Option<Rate> {
        match cost_type {
            CostType::Labor => self.labor,
            CostType::Materials => self.materials,
            CostType::Subcontracting => self.subcontracting,
            CostType::Equipment => self.equipment,
            CostType::Travel => self.travel,
        }
    }

    /// Sets the rate for a cost type. `None` clears it.
    pub fn set_for_type(&mut self, cost_type: CostType, rate: Option<Rate>) {
        match cost_type {
            CostType::Labor => self.labor = rate,
            CostType::Materials => self.materials = rate,
            CostType::Subcontracting => self.subcontracting = rate,
            CostType::Equipment => self.equipment = rate,
            CostType::Travel => self.travel = rate,
        }
    }
}

/// The quote (devis) aggregate root.
///
/// # Invariants
///
/// - Monetary fields are >= 0 (value objects)
/// - Lot codes are unique within the quote
/// - Status changes only via the workflow engine
/// - Destroyed only via soft delete
/// - Immutable once converted to a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    id: QuoteId,
    reference: String,
    client: ClientInfo,
    status: QuoteStatus,
    global_margin: Rate,
    type_margins: TypeMargins,
    overhead: Rate,
    default_vat: VatRate,
    retention: Rate,
    lots: Vec<Lot>,
    total_excl_tax: Amount,
    total_incl_tax: Amount,
    converted_to: Option<ProjectId>,
    deleted_at: Option<Timestamp>,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Quote {
    /// Creates a new quote in [`QuoteStatus::Draft`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValidationError`] if the reference is blank.
    pub fn new(
        reference: impl Into<String>,
        client: ClientInfo,
        global_margin: Rate,
        overhead: Rate,
        default_vat: VatRate,
    ) -> DomainResult<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "quote reference cannot be empty".to_string(),
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id: QuoteId::new_v4(),
            reference,
            client,
            status: QuoteStatus::Draft,
            global_margin,
            type_margins: TypeMargins::default(),
            overhead,
            default_vat,
            retention: Rate::ZERO,
            lots: Vec::new(),
            total_excl_tax: Amount::ZERO,
            total_incl_tax: Amount::ZERO,
            converted_to: None,
            deleted_at: None,
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstructs a quote from stored state.
    ///
    /// Bypasses validation; only for trusted storage.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: QuoteId,
        reference: String,
        client: ClientInfo,
        status: QuoteStatus,
        global_margin: Rate,
        type_margins: TypeMargins,
        overhead: Rate,
        default_vat: VatRate,
        retention: Rate,
        lots: Vec<Lot>,
        total_excl_tax: Amount,
        total_incl_tax: Amount,
        converted_to: Option<ProjectId>,
        deleted_at: Option<Timestamp>,
        version: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            reference,
            client,
            status,
            global_margin,
            type_margins,
            overhead,
            default_vat,
            retention,
            lots,
            total_excl_tax,
            total_incl_tax,
            converted_to,
            deleted_at,
            version,
            created_at,
            updated_at,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the quote identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> QuoteId {
        self.id
    }

    /// Returns the human-readable reference.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Returns the client info.
    #[must_use]
    pub const fn client(&self) -> &ClientInfo {
        &self.client
    }

    /// Returns the lifecycle status.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> QuoteStatus {
        self.status
    }

    /// Returns the global margin rate.
    #[inline]
    #[must_use]
    pub const fn global_margin(&self) -> Rate {
        self.global_margin
    }

    /// Returns the per-cost-type margin overrides.
    #[inline]
    #[must_use]
    pub const fn type_margins(&self) -> &TypeMargins {
        &self.type_margins
    }

    /// Returns the overhead coefficient.
    #[inline]
    #[must_use]
    pub const fn overhead(&self) -> Rate {
        self.overhead
    }

    /// Returns the default VAT rate.
    #[inline]
    #[must_use]
    pub const fn default_vat(&self) -> VatRate {
        self.default_vat
    }

    /// Returns the retention-guarantee percentage.
    #[inline]
    #[must_use]
    pub const fn retention(&self) -> Rate {
        self.retention
    }

    /// Returns the lots of this quote.
    #[must_use]
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Returns the total excluding tax.
    #[inline]
    #[must_use]
    pub const fn total_excl_tax(&self) -> Amount {
        self.total_excl_tax
    }

    /// Returns the total including tax.
    #[inline]
    #[must_use]
    pub const fn total_incl_tax(&self) -> Amount {
        self.total_incl_tax
    }

    /// Returns the project this quote was converted to, if any.
    #[inline]
    #[must_use]
    pub const fn converted_to(&self) -> Option<ProjectId> {
        self.converted_to
    }

    /// Returns true if the quote has been converted.
    #[inline]
    #[must_use]
    pub const fn is_converted(&self) -> bool {
        self.converted_to.is_some()
    }

    /// Returns true if the quote has been soft-deleted.
    #[inline]
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns the optimistic-locking version.
    #[inline]
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[inline]
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true if quote content may currently be edited.
    #[inline]
    #[must_use]
    pub fn is_modifiable(&self) -> bool {
        self.status.is_modifiable() && !self.is_converted() && !self.is_deleted()
    }

    // ========================================================================
    // Content mutation (gated on modifiable states)
    // ========================================================================

    /// Adds a lot, enforcing code uniqueness within the quote.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable
    /// statuses and [`DomainError::DuplicateLotCode`] if a lot with the
    /// same code exists.
    pub fn add_lot(&mut self, lot: Lot) -> DomainResult<()> {
        self.ensure_modifiable()?;
        if self.lots.iter().any(|l| l.code() == lot.code()) {
            return Err(DomainError::DuplicateLotCode {
                code: lot.code().to_string(),
            });
        }
        self.lots.push(lot);
        self.touch();
        Ok(())
    }

    /// Removes a lot by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable
    /// statuses and [`DomainError::LotNotFound`] if no lot has this id.
    pub fn remove_lot(&mut self, id: LotId) -> DomainResult<Lot> {
        self.ensure_modifiable()?;
        let index = self
            .lots
            .iter()
            .position(|l| l.id() == id)
            .ok_or_else(|| DomainError::LotNotFound(id.to_string()))?;
        let lot = self.lots.remove(index);
        self.touch();
        Ok(lot)
    }

    /// Returns a lot by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LotNotFound`] if no lot has this id.
    pub fn lot(&self, id: LotId) -> DomainResult<&Lot> {
        self.lots
            .iter()
            .find(|l| l.id() == id)
            .ok_or_else(|| DomainError::LotNotFound(id.to_string()))
    }

    /// Returns a lot by code.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LotNotFound`] if no lot has this code.
    pub fn lot_by_code(&self, code: &str) -> DomainResult<&Lot> {
        self.lots
            .iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| DomainError::LotNotFound(code.to_string()))
    }

    /// Returns a mutable reference to a lot by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable
    /// statuses and [`DomainError::LotNotFound`] if no lot has this id.
    pub fn lot_mut(&mut self, id: LotId) -> DomainResult<&mut Lot> {
        self.ensure_modifiable()?;
        self.lots
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or_else(|| DomainError::LotNotFound(id.to_string()))
    }

    /// Updates the global margin rate.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable statuses.
    pub fn set_global_margin(&mut self, rate: Rate) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.global_margin = rate;
        self.touch();
        Ok(())
    }

    /// Updates a per-cost-type margin override. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable statuses.
    pub fn set_type_margin(&mut self, cost_type: CostType, rate: Option<Rate>) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.type_margins.set_for_type(cost_type, rate);
        self.touch();
        Ok(())
    }

    /// Updates the overhead coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable statuses.
    pub fn set_overhead(&mut self, rate: Rate) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.overhead = rate;
        self.touch();
        Ok(())
    }

    /// Updates the default VAT rate.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable statuses.
    pub fn set_default_vat(&mut self, vat: VatRate) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.default_vat = vat;
        self.touch();
        Ok(())
    }

    /// Updates the retention-guarantee percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable statuses.
    pub fn set_retention(&mut self, rate: Rate) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.retention = rate;
        self.touch();
        Ok(())
    }

    /// Updates the client info.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteNotModifiable`] outside modifiable statuses.
    pub fn set_client(&mut self, client: ClientInfo) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.client = client;
        self.touch();
        Ok(())
    }

    /// Stores freshly computed totals.
    ///
    /// Totals are computed by the price calculator; the aggregate only
    /// records the result.
    pub fn set_totals(&mut self, excl_tax: Amount, incl_tax: Amount) {
        self.total_excl_tax = excl_tax;
        self.total_incl_tax = incl_tax;
        self.touch();
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Applies a status already validated by the workflow engine.
    ///
    /// Crate-private so that status only ever changes through the engine.
    pub(crate) fn apply_status(&mut self, status: QuoteStatus) {
        self.status = status;
        self.touch();
    }

    /// Marks the quote as converted into a project.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::QuoteAlreadyConverted`] if a conversion was
    /// already recorded.
    pub fn mark_converted(&mut self, project_id: ProjectId) -> DomainResult<()> {
        if let Some(existing) = self.converted_to {
            return Err(DomainError::QuoteAlreadyConverted {
                quote_id: self.id,
                project_id: existing,
            });
        }
        self.converted_to = Some(project_id);
        self.touch();
        Ok(())
    }

    /// Soft-deletes the quote. Idempotent.
    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Timestamp::now());
            self.touch();
        }
    }

    fn ensure_modifiable(&self) -> DomainResult<()> {
        if !self.is_modifiable() {
            return Err(DomainError::QuoteNotModifiable {
                status: self.status,
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
        self.version = self.version.saturating_add(1);
    }
}
