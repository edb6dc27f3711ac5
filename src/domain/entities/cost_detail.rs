//! # Cost Detail (Débours)
//!
//! A raw cost component underlying a line item.
//!
//! Each cost detail carries one [`CostType`] and contributes
//! `quantity × unit_price` of raw cost to its line. Labor details may carry
//! trade metadata; any other type rejects it at construction.
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::entities::cost_detail::CostDetail;
//! use devis_engine::domain::value_objects::{Amount, CostType, Quantity};
//!
//! let detail = CostDetail::new(
//!     CostType::Materials,
//!     "Placo BA13",
//!     Quantity::new(100.0).unwrap(),
//!     Amount::new(35.0).unwrap(),
//! )
//! .unwrap();
//!
//! assert_eq!(detail.raw_cost().get().to_string(), "3500");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Amount, CostDetailId, CostType, Quantity};
use serde::{Deserialize, Serialize};

/// Trade metadata attached to a labor cost detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborMeta {
    /// Trade of the workers (e.g. "plaquiste", "électricien").
    pub trade: String,

    /// Hourly labor rate used when the detail was priced.
    pub hourly_rate: Amount,
}

impl LaborMeta {
    /// Creates labor metadata.
    #[must_use]
    pub fn new(trade: impl Into<String>, hourly_rate: Amount) -> Self {
        Self {
            trade: trade.into(),
            hourly_rate,
        }
    }
}

/// A raw cost component (débours) of a line item.
///
/// # Invariants
///
/// - `quantity >= 0` and `unit_price >= 0` (enforced by the value objects)
/// - Label is never empty
/// - Labor metadata only on [`CostType::Labor`] details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostDetail {
    id: CostDetailId,
    cost_type: CostType,
    label: String,
    quantity: Quantity,
    unit_price: Amount,
    labor: Option<LaborMeta>,
}

impl CostDetail {
    /// Creates a new cost detail without labor metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyLabel`] if the label is blank.
    pub fn new(
        cost_type: CostType,
        label: impl Into<String>,
        quantity: Quantity,
        unit_price: Amount,
    ) -> DomainResult<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DomainError::EmptyLabel("cost detail label".to_string()));
        }
        Ok(Self {
            id: CostDetailId::new_v4(),
            cost_type,
            label,
            quantity,
            unit_price,
            labor: None,
        })
    }

    /// Creates a labor cost detail with trade metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LaborMetadataNotAllowed`] if `cost_type` is
    /// not [`CostType::Labor`], or [`DomainError::EmptyLabel`] if the label
    /// is blank.
    pub fn with_labor_meta(
        cost_type: CostType,
        label: impl Into<String>,
        quantity: Quantity,
        unit_price: Amount,
        labor: LaborMeta,
    ) -> DomainResult<Self> {
        if !cost_type.is_labor() {
            return Err(DomainError::LaborMetadataNotAllowed(cost_type));
        }
        let mut detail = Self::new(cost_type, label, quantity, unit_price)?;
        detail.labor = Some(labor);
        Ok(detail)
    }

    /// Returns the cost detail identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> CostDetailId {
        self.id
    }

    /// Returns the cost type.
    #[inline]
    #[must_use]
    pub const fn cost_type(&self) -> CostType {
        self.cost_type
    }

    /// Returns the label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
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

    /// Returns the labor metadata, if any.
    #[must_use]
    pub fn labor(&self) -> Option<&LaborMeta> {
        self.labor.as_ref()
    }

    /// Returns the raw cost `quantity × unit_price`.
    ///
    /// Falls back to zero on overflow only in the pathological case of
    /// values near `Decimal::MAX`; whole-quote pricing uses the checked
    /// path in the price calculator.
    #[must_use]
    pub fn raw_cost(&self) -> Amount {
        self.quantity.times(self.unit_price).unwrap_or(Amount::ZERO)
    }

    /// Updates the quantity.
    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Updates the unit price.
    pub fn set_unit_price(&mut self, unit_price: Amount) {
        self.unit_price = unit_price;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn materials_detail() -> CostDetail {
        CostDetail::new(
            CostType::Materials,
            "Placo BA13",
            Quantity::new(100.0).unwrap(),
            Amount::new(35.0).unwrap(),
        )
        .unwrap()
    }

    mod construction {
        use super::*;

        #[test]
        fn valid_detail_succeeds() {
            let detail = materials_detail();
            assert_eq!(detail.cost_type(), CostType::Materials);
            assert_eq!(detail.label(), "Placo BA13");
        }

        #[test]
        fn empty_label_fails() {
            let result = CostDetail::new(
                CostType::Labor,
                "   ",
                Quantity::ZERO,
                Amount::ZERO,
            );
            assert!(matches!(result, Err(DomainError::EmptyLabel(_))));
        }

        #[test]
        fn labor_meta_on_labor_succeeds() {
            let detail = CostDetail::with_labor_meta(
                CostType::Labor,
                "Pose cloisons",
                Quantity::new(40.0).unwrap(),
                Amount::new(42.0).unwrap(),
                LaborMeta::new("plaquiste", Amount::new(42.0).unwrap()),
            )
            .unwrap();
            assert_eq!(detail.labor().unwrap().trade, "plaquiste");
        }

        #[test]
        fn labor_meta_on_materials_fails() {
            let result = CostDetail::with_labor_meta(
                CostType::Materials,
                "Placo",
                Quantity::ZERO,
                Amount::ZERO,
                LaborMeta::new("plaquiste", Amount::ZERO),
            );
            assert_eq!(
                result,
                Err(DomainError::LaborMetadataNotAllowed(CostType::Materials))
            );
        }
    }

    mod raw_cost {
        use super::*;

        #[test]
        fn quantity_times_unit_price() {
            let detail = materials_detail();
            assert_eq!(detail.raw_cost(), Amount::new(3500.0).unwrap());
        }

        #[test]
        fn zero_quantity_is_zero_cost() {
            let detail = CostDetail::new(
                CostType::Travel,
                "Déplacement",
                Quantity::ZERO,
                Amount::new(120.0).unwrap(),
            )
            .unwrap();
            assert!(detail.raw_cost().is_zero());
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn set_quantity_updates_raw_cost() {
            let mut detail = materials_detail();
            detail.set_quantity(Quantity::new(50.0).unwrap());
            assert_eq!(detail.raw_cost(), Amount::new(1750.0).unwrap());
        }
    }
}
