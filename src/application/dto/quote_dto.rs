//! # Quote DTOs
//!
//! Data transfer objects for quote operations.
//!
//! These DTOs decouple callers from the domain layer, providing validation
//! and serialization for pricing updates, workflow transitions, and
//! quote-to-project conversion.

use crate::domain::entities::quote::ClientInfo;
use crate::domain::services::workflow::TransitionKind;
use crate::domain::value_objects::{
    Actor, Amount, CostType, ProjectId, QuoteId, QuoteStatus, Rate, Role, VatRate,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One per-cost-type margin override in an update request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TypeMarginUpdate {
    /// The cost type whose override changes.
    pub cost_type: CostType,
    /// The new rate in percent; `None` clears the override.
    pub rate: Option<f64>,
}

/// Pricing fields converted to domain types, ready to apply.
#[derive(Debug, Clone)]
pub struct QuoteUpdate {
    /// New global margin, if requested.
    pub global_margin: Option<Rate>,
    /// New overhead coefficient, if requested.
    pub overhead: Option<Rate>,
    /// New retention percentage, if requested.
    pub retention: Option<Rate>,
    /// New default VAT rate, if requested.
    pub default_vat: Option<VatRate>,
    /// Per-cost-type overrides to set or clear.
    pub type_margins: Vec<(CostType, Option<Rate>)>,
}

/// Request to update a quote's pricing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuoteRequest {
    /// The quote to update.
    pub quote_id: QuoteId,
    /// The acting user.
    pub user_id: String,
    /// The acting user's role.
    pub role: Role,
    /// New global margin in percent.
    pub global_margin: Option<f64>,
    /// New overhead coefficient in percent.
    pub overhead: Option<f64>,
    /// New retention-guarantee percentage.
    pub retention: Option<f64>,
    /// New default VAT rate in percent (must be statutory).
    pub default_vat: Option<f64>,
    /// Per-cost-type margin overrides.
    pub type_margins: Vec<TypeMarginUpdate>,
}

impl UpdateQuoteRequest {
    /// Creates a request that changes nothing; set fields as needed.
    #[must_use]
    pub fn new(quote_id: QuoteId, user_id: impl Into<String>, role: Role) -> Self {
        Self {
            quote_id,
            user_id: user_id.into(),
            role,
            global_margin: None,
            overhead: None,
            retention: None,
            default_vat: None,
            type_margins: Vec::new(),
        }
    }

    /// Validates the request fields.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("user_id cannot be empty".to_string());
        }

        for (name, value) in [
            ("global_margin", self.global_margin),
            ("overhead", self.overhead),
            ("retention", self.retention),
        ] {
            if let Some(v) = value {
                if v < 0.0 {
                    return Err(format!("{} must be non-negative", name));
                }
            }
        }

        for update in &self.type_margins {
            if let Some(v) = update.rate {
                if v < 0.0 {
                    return Err("type margin must be non-negative".to_string());
                }
            }
        }

        Ok(())
    }

    /// Converts the request to domain types.
    ///
    /// # Errors
    ///
    /// Returns an error if a rate is not representable or the VAT rate is
    /// not statutory.
    pub fn to_domain_types(&self) -> Result<QuoteUpdate, String> {
        let to_rate =
            |value: f64| -> Result<Rate, String> { Rate::new(value).map_err(|e| e.to_string()) };

        let global_margin = self.global_margin.map(to_rate).transpose()?;
        let overhead = self.overhead.map(to_rate).transpose()?;
        let retention = self.retention.map(to_rate).transpose()?;

        let default_vat = match self.default_vat {
            Some(value) => {
                let decimal =
                    Decimal::try_from(value).map_err(|_| "invalid VAT rate".to_string())?;
                Some(VatRate::try_from_decimal(decimal).map_err(|e| e.to_string())?)
            }
            None => None,
        };

        let mut type_margins = Vec::with_capacity(self.type_margins.len());
        for update in &self.type_margins {
            let rate = update.rate.map(to_rate).transpose()?;
            type_margins.push((update.cost_type, rate));
        }

        Ok(QuoteUpdate {
            global_margin,
            overhead,
            retention,
            default_vat,
            type_margins,
        })
    }

    /// Returns the acting user as a domain actor.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.as_str(), self.role)
    }
}

/// Response after updating a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuoteResponse {
    /// The updated quote.
    pub quote_id: QuoteId,
    /// The new aggregate version.
    pub version: u64,
    /// Recomputed total excluding tax.
    pub total_excl_tax: Amount,
    /// Recomputed total including tax.
    pub total_incl_tax: Amount,
    /// True if the update produced a journal entry (false for a no-op).
    pub journaled: bool,
}

/// Request to apply a workflow transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionQuoteRequest {
    /// The quote to transition.
    pub quote_id: QuoteId,
    /// The acting user.
    pub user_id: String,
    /// The acting user's role.
    pub role: Role,
    /// The requested transition.
    pub transition: TransitionKind,
    /// Motif, required for refusals and losses.
    pub justification: Option<String>,
}

impl TransitionQuoteRequest {
    /// Creates a transition request without justification.
    #[must_use]
    pub fn new(
        quote_id: QuoteId,
        user_id: impl Into<String>,
        role: Role,
        transition: TransitionKind,
    ) -> Self {
        Self {
            quote_id,
            user_id: user_id.into(),
            role,
            transition,
            justification: None,
        }
    }

    /// Attaches a justification.
    #[must_use]
    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }

    /// Validates the request fields.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("user_id cannot be empty".to_string());
        }
        Ok(())
    }

    /// Returns the acting user as a domain actor.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.as_str(), self.role)
    }
}

impl fmt::Display for TransitionQuoteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransitionQuoteRequest {{ quote: {}, transition: {}, role: {} }}",
            self.quote_id, self.transition, self.role
        )
    }
}

/// Response after a workflow transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionQuoteResponse {
    /// The transitioned quote.
    pub quote_id: QuoteId,
    /// Status before the transition.
    pub from: QuoteStatus,
    /// Status after the transition.
    pub to: QuoteStatus,
    /// The new aggregate version.
    pub version: u64,
}

/// Request to convert an accepted quote into a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertQuoteRequest {
    /// The quote to convert.
    pub quote_id: QuoteId,
    /// The acting user.
    pub user_id: String,
    /// The acting user's role.
    pub role: Role,
}

impl ConvertQuoteRequest {
    /// Creates a conversion request.
    #[must_use]
    pub fn new(quote_id: QuoteId, user_id: impl Into<String>, role: Role) -> Self {
        Self {
            quote_id,
            user_id: user_id.into(),
            role,
        }
    }

    /// Validates the request fields.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("user_id cannot be empty".to_string());
        }
        Ok(())
    }

    /// Returns the acting user as a domain actor.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.as_str(), self.role)
    }
}

/// One lot carried into the created project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLot {
    /// Lot code, unique within the quote.
    pub code: String,
    /// Lot label.
    pub label: String,
    /// Contracted amount for the lot (`Σ quantity × unit_price`).
    pub contracted_amount: Amount,
}

/// The payload handed to project provisioning on conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
    /// Identifier assigned to the new project.
    pub project_id: ProjectId,
    /// The source quote.
    pub source_quote: QuoteId,
    /// The quote reference, kept for traceability.
    pub reference: String,
    /// Client information carried over.
    pub client: ClientInfo,
    /// Lots with their contracted amounts.
    pub lots: Vec<ProjectLot>,
    /// Contract total excluding tax.
    pub total_excl_tax: Amount,
    /// Retention-guarantee percentage carried over.
    pub retention: Rate,
}

/// Response after converting a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertQuoteResponse {
    /// The converted quote.
    pub quote_id: QuoteId,
    /// The created project.
    pub project_id: ProjectId,
    /// The provisioning payload.
    pub payload: ProjectPayload,
}
