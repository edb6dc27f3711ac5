//! # Margin Resolver
//!
//! Resolves the margin rate applicable to a line through the four-level
//! priority hierarchy:
//!
//! 1. line-level override
//! 2. lot-level override
//! 3. the quote's per-cost-type rate for the line's **dominant** cost type
//! 4. the quote's global rate
//!
//! "Defined" means explicitly set, including zero: an explicit 0% at a
//! higher level wins over any rate at a lower level. The dominant cost type
//! is the one whose summed raw cost is largest; on an exact tie the first
//! tied type in [`CostType::ALL`] declaration order wins. A line without
//! cost details skips level 3 entirely.
//!
//! The resolver is a pure function of its explicit inputs: no hidden
//! configuration, safe to call from any thread.
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::entities::cost_detail::CostDetail;
//! use devis_engine::domain::entities::quote::TypeMargins;
//! use devis_engine::domain::services::margin_resolver::{resolve_margin, MarginLevel};
//! use devis_engine::domain::value_objects::{Amount, CostType, Quantity, Rate};
//!
//! let details = vec![
//!     CostDetail::new(CostType::Labor, "Pose", Quantity::new(40.0).unwrap(),
//!         Amount::new(42.0).unwrap()).unwrap(),
//!     CostDetail::new(CostType::Materials, "Placo", Quantity::new(100.0).unwrap(),
//!         Amount::new(35.0).unwrap()).unwrap(),
//! ];
//!
//! let mut margins = TypeMargins::default();
//! margins.materials = Some(Rate::new(12.0).unwrap());
//!
//! // Materials dominate (3500 > 1680): the type-level rate wins over global.
//! let resolved = resolve_margin(None, None, &margins, Rate::new(15.0).unwrap(), &details);
//! assert_eq!(resolved.rate, Rate::new(12.0).unwrap());
//! assert_eq!(resolved.level, MarginLevel::Type);
//! ```

use crate::domain::entities::cost_detail::CostDetail;
use crate::domain::entities::quote::TypeMargins;
use crate::domain::value_objects::{CostType, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which level of the hierarchy supplied the resolved rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginLevel {
    /// Line-level override.
    Line,

    /// Lot-level override.
    Lot,

    /// Per-cost-type rate for the dominant cost type.
    Type,

    /// Quote global rate.
    Global,
}

impl fmt::Display for MarginLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Line => "line",
            Self::Lot => "lot",
            Self::Type => "type",
            Self::Global => "global",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of margin resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMargin {
    /// The applicable margin rate.
    pub rate: Rate,

    /// The hierarchy level that supplied it.
    pub level: MarginLevel,

    /// The dominant cost type, when level 3 was evaluated against one.
    pub dominant_type: Option<CostType>,
}

/// Returns the dominant cost type among the details, if any.
///
/// The dominant type is the one with the largest summed raw cost
/// (`quantity × unit_price` aggregated per type). On an exact tie the first
/// tied type in [`CostType::ALL`] declaration order wins. Returns `None`
/// for an empty slice.
#[must_use]
pub fn dominant_cost_type(cost_details: &[CostDetail]) -> Option<CostType> {
    if cost_details.is_empty() {
        return None;
    }

    let mut best: Option<(CostType, Decimal)> = None;
    for cost_type in CostType::ALL {
        let present = cost_details.iter().any(|d| d.cost_type() == cost_type);
        if !present {
            continue;
        }
        let sum: Decimal = cost_details
            .iter()
            .filter(|d| d.cost_type() == cost_type)
            .map(|d| d.raw_cost().get())
            .sum();
        match best {
            // Strict comparison keeps the earlier type on ties
            Some((_, best_sum)) if sum <= best_sum => {}
            _ => best = Some((cost_type, sum)),
        }
    }
    best.map(|(cost_type, _)| cost_type)
}

/// Resolves the applicable margin rate for a line.
///
/// See the module documentation for the priority rules.
#[must_use]
pub fn resolve_margin(
    line_margin: Option<Rate>,
    lot_margin: Option<Rate>,
    type_margins: &TypeMargins,
    global_margin: Rate,
    cost_details: &[CostDetail],
) -> ResolvedMargin {
    if let Some(rate) = line_margin {
        return ResolvedMargin {
            rate,
            level: MarginLevel::Line,
            dominant_type: None,
        };
    }

    if let Some(rate) = lot_margin {
        return ResolvedMargin {
            rate,
            level: MarginLevel::Lot,
            dominant_type: None,
        };
    }

    if let Some(dominant) = dominant_cost_type(cost_details) {
        if let Some(rate) = type_margins.for_type(dominant) {
            return ResolvedMargin {
                rate,
                level: MarginLevel::Type,
                dominant_type: Some(dominant),
            };
        }
        return ResolvedMargin {
            rate: global_margin,
            level: MarginLevel::Global,
            dominant_type: Some(dominant),
        };
    }

    ResolvedMargin {
        rate: global_margin,
        level: MarginLevel::Global,
        dominant_type: None,
    }
}
