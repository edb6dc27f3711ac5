//! # Line Item (Ligne)
//!
//! A priced quantity line within a lot.
//!
//! A line item either derives its price from its cost details (raw cost →
//! overhead → margin) or, when it has none, sells at `quantity ×
//! unit_price` directly. The quantity can be locked, after which it is
//! immutable until unlocked.

use crate::domain::entities::cost_detail::CostDetail;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    Amount, ArticleId, CostDetailId, LineItemId, Quantity, Rate,
};
use serde::{Deserialize, Serialize};

/// A priced quantity line within a lot.
///
/// # Invariants
///
/// - `quantity >= 0` and `unit_price >= 0` (enforced by the value objects)
/// - Label is never empty
/// - `amount() = quantity × unit_price`
/// - Quantity immutable while `locked`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineItemId,
    label: String,
    unit: String,
    quantity: Quantity,
    unit_price: Amount,
    margin: Option<Rate>,
    locked: bool,
    article_id: Option<ArticleId>,
    cost_details: Vec<CostDetail>,
}

impl LineItem {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyLabel`] if the label is blank.
    pub fn new(
        label: impl Into<String>,
        unit: impl Into<String>,
        quantity: Quantity,
        unit_price: Amount,
    ) -> DomainResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::EmptyLabel("line item label".to_string()));
        }
        Ok(Self {
            id: LineItemId::new_v4(),
            label,
            unit: unit.into(),
            quantity,
            unit_price,
            margin: None,
            locked: false,
            article_id: None,
            cost_details: Vec::new(),
        })
    }

    /// Returns the line item identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> LineItemId {
        self.id
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the unit of measure (e.g. "m²", "h", "u").
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the quantity.
    #[inline]
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the unit price.
    #[inline]
    #[must_use]
    pub const fn unit_price(&self) -> Amount {
        self.unit_price
    }

    /// Returns the line-level margin override, if set.
    ///
    /// An explicitly-set zero counts as defined in margin resolution.
    #[inline]
    #[must_use]
    pub const fn margin(&self) -> Option<Rate> {
        self.margin
    }

    /// Returns true if the quantity is locked.
    #[inline]
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the linked catalog article, if any.
    #[must_use]
    pub fn article_id(&self) -> Option<&ArticleId> {
        self.article_id.as_ref()
    }

    /// Returns the cost details of this line.
    #[must_use]
    pub fn cost_details(&self) -> &[CostDetail] {
        &self.cost_details
    }

    /// Returns `quantity × unit_price`.
    #[must_use]
    pub fn amount(&self) -> Amount {
        self.quantity.times(self.unit_price).unwrap_or(Amount::ZERO)
    }

    /// Sets the line-level margin override. `None` clears it.
    pub fn set_margin(&mut self, margin: Option<Rate>) {
        self.margin = margin;
    }

    /// Links the line to a catalog article.
    pub fn set_article_id(&mut self, article_id: Option<ArticleId>) {
        self.article_id = article_id;
    }

    /// Updates the quantity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LineLocked`] if the quantity is locked.
    pub fn set_quantity(&mut self, quantity: Quantity) -> DomainResult<()> {
        if self.locked {
            return Err(DomainError::LineLocked {
                line_item_id: self.id,
            });
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Updates the unit price.
    pub fn set_unit_price(&mut self, unit_price: Amount) {
        self.unit_price = unit_price;
    }

    /// Locks the quantity against further edits.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Unlocks the quantity.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Adds a cost detail to this line.
    pub fn add_cost_detail(&mut self, detail: CostDetail) {
        self.cost_details.push(detail);
    }

    /// Removes a cost detail by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CostDetailNotFound`] if no detail has this id.
    pub fn remove_cost_detail(&mut self, id: CostDetailId) -> DomainResult<CostDetail> {
        let index = self
            .cost_details
            .iter()
            .position(|d| d.id() == id)
            .ok_or_else(|| DomainError::CostDetailNotFound(id.to_string()))?;
        Ok(self.cost_details.remove(index))
    }

    /// Returns a mutable reference to a cost detail by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CostDetailNotFound`] if no detail has this id.
    pub fn cost_detail_mut(&mut self, id: CostDetailId) -> DomainResult<&mut CostDetail> {
        self.cost_details
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or_else(|| DomainError::CostDetailNotFound(id.to_string()))
    }
}
