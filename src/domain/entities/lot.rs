//! # Lot
//!
//! A named work package within a quote.
//!
//! Lots are owned exclusively by their quote; their codes are unique within
//! it (enforced by [`Quote::add_lot`](crate::domain::entities::quote::Quote::add_lot)).

use crate::domain::entities::line_item::LineItem;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Amount, CheckedArithmetic, LineItemId, LotId, Rate};
use serde::{Deserialize, Serialize};

/// A work package (lot) within a quote.
///
/// # Invariants
///
/// - Code and label are never empty
/// - Order index (`position`) places the lot within the quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    id: LotId,
    code: String,
    label: String,
    position: u32,
    margin: Option<Rate>,
    line_items: Vec<LineItem>,
}

impl Lot {
    /// Creates a new lot.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyLotCode`] if the code is blank and
    /// [`DomainError::EmptyLabel`] if the label is blank.
    pub fn new(code: impl Into<String>, label: impl Into<String>, position: u32) -> DomainResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(DomainError::EmptyLotCode);
        }
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::EmptyLabel("lot label".to_string()));
        }
        Ok(Self {
            id: LotId::new_v4(),
            code,
            label,
            position,
            margin: None,
            line_items: Vec::new(),
        })
    }

    /// Returns the lot identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> LotId {
        self.id
    }

    /// Returns the code (unique within the quote).
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the order index within the quote.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the lot-level margin override, if set.
    ///
    /// An explicitly-set zero counts as defined in margin resolution.
    #[inline]
    #[must_use]
    pub const fn margin(&self) -> Option<Rate> {
        self.margin
    }

    /// Returns the line items of this lot.
    #[must_use]
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Sets the lot-level margin override. `None` clears it.
    pub fn set_margin(&mut self, margin: Option<Rate>) {
        self.margin = margin;
    }

    /// Updates the order index.
    pub fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    /// Renames the lot.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyLabel`] if the label is blank.
    pub fn set_label(&mut self, label: impl Into<String>) -> DomainResult<()> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::EmptyLabel("lot label".to_string()));
        }
        self.label = label;
        Ok(())
    }

    /// Adds a line item.
    pub fn add_line_item(&mut self, line_item: LineItem) {
        self.line_items.push(line_item);
    }

    /// Removes a line item by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LineItemNotFound`] if no line has this id.
    pub fn remove_line_item(&mut self, id: LineItemId) -> DomainResult<LineItem> {
        let index = self
            .line_items
            .iter()
            .position(|l| l.id() == id)
            .ok_or_else(|| DomainError::LineItemNotFound(id.to_string()))?;
        Ok(self.line_items.remove(index))
    }

    /// Returns a line item by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LineItemNotFound`] if no line has this id.
    pub fn line_item(&self, id: LineItemId) -> DomainResult<&LineItem> {
        self.line_items
            .iter()
            .find(|l| l.id() == id)
            .ok_or_else(|| DomainError::LineItemNotFound(id.to_string()))
    }

    /// Returns a mutable reference to a line item by id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LineItemNotFound`] if no line has this id.
    pub fn line_item_mut(&mut self, id: LineItemId) -> DomainResult<&mut LineItem> {
        self.line_items
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or_else(|| DomainError::LineItemNotFound(id.to_string()))
    }

    /// Sums `quantity × unit_price` over all line items.
    ///
    /// This is the contracted amount used when converting a quote into a
    /// project; full price computation (overhead, margins) lives in the
    /// price calculator.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error if the sum overflows.
    pub fn contracted_amount(&self) -> DomainResult<Amount> {
        let mut total = Amount::ZERO;
        for line in &self.line_items {
            let line_amount = line.quantity().get().safe_mul(line.unit_price().get())?;
            total = Amount::from_decimal(total.get().safe_add(line_amount)?)?;
        }
        Ok(total)
    }
}
