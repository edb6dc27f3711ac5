//! # Property-Based Tests for Pricing and Margin Resolution
//!
//! Uses proptest to verify the pricing invariants over generated inputs.
//!
//! # Test Coverage
//!
//! - Margin resolution priority (line > lot > type > global)
//! - Dominant cost type maximality
//! - Markup chain monotonicity for non-negative rates
//! - Currency rounding bounds
//! - Totals reconciliation at currency precision

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::domain::entities::cost_detail::CostDetail;
use crate::domain::entities::line_item::LineItem;
use crate::domain::entities::lot::Lot;
use crate::domain::entities::quote::{ClientInfo, Quote, TypeMargins};
use crate::domain::services::margin_resolver::{resolve_margin, MarginLevel};
use crate::domain::services::price_calculator::{compute_totals, cost_price, sale_price};
use crate::domain::value_objects::{
    round_currency, Amount, CostType, Quantity, Rate, VatRate,
};

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

// ============================================================================
// Margin Resolution Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn line_margin_always_wins(
        line in 0.0f64..100.0,
        lot in 0.0f64..100.0,
        type_rate in 0.0f64..100.0,
        global in 0.0f64..100.0,
    ) {
        let mut type_margins = TypeMargins::default();
        type_margins.set_for_type(CostType::Materials, Some(rate(type_rate)));
        let details = [detail(CostType::Materials, 10.0, 5.0)];

        let resolved = resolve_margin(
            Some(rate(line)),
            Some(rate(lot)),
            &type_margins,
            rate(global),
            &details,
        );
        prop_assert_eq!(resolved.level, MarginLevel::Line);
        prop_assert_eq!(resolved.rate, rate(line));
    }

    #[test]
    fn no_overrides_means_global(
        global in 0.0f64..100.0,
        qty in 0.01f64..1000.0,
        price in 0.01f64..1000.0,
    ) {
        let details = [detail(CostType::Labor, qty, price)];
        let resolved = resolve_margin(
            None,
            None,
            &TypeMargins::default(),
            rate(global),
            &details,
        );
        prop_assert_eq!(resolved.level, MarginLevel::Global);
        prop_assert_eq!(resolved.rate, rate(global));
    }

    #[test]
    fn dominant_type_has_maximal_summed_cost(
        labor_qty in 0.01f64..1000.0,
        labor_price in 0.01f64..1000.0,
        materials_qty in 0.01f64..1000.0,
        materials_price in 0.01f64..1000.0,
    ) {
        let labor = detail(CostType::Labor, labor_qty, labor_price);
        let materials = detail(CostType::Materials, materials_qty, materials_price);
        let labor_sum = labor.raw_cost().get();
        let materials_sum = materials.raw_cost().get();
        let details = [labor, materials];

        let dominant = crate::domain::services::margin_resolver::dominant_cost_type(&details)
            .unwrap();
        let (dominant_sum, other_sum) = if dominant == CostType::Labor {
            (labor_sum, materials_sum)
        } else {
            (materials_sum, labor_sum)
        };
        prop_assert!(dominant_sum >= other_sum);
    }
}

// ============================================================================
// Price Chain Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn markup_chain_is_monotone(
        raw_cents in 1i64..100_000_000,
        overhead in 0.0f64..100.0,
        margin in 0.0f64..100.0,
    ) {
        let raw = Decimal::new(raw_cents, 2);
        let cost = cost_price(raw, rate(overhead)).unwrap();
        let sale = sale_price(cost, rate(margin)).unwrap();
        prop_assert!(cost >= raw);
        prop_assert!(sale >= cost);
    }

    #[test]
    fn zero_rates_leave_the_price_unchanged(raw_cents in 0i64..100_000_000) {
        let raw = Decimal::new(raw_cents, 2);
        let cost = cost_price(raw, Rate::ZERO).unwrap();
        let sale = sale_price(cost, Rate::ZERO).unwrap();
        prop_assert_eq!(sale, raw);
    }

    #[test]
    fn rounding_is_bounded_by_half_a_cent(mantissa in 0i64..1_000_000_000_000, scale in 0u32..10) {
        let value = Decimal::new(mantissa, scale);
        let rounded = round_currency(value);
        prop_assert!(rounded.scale() <= 2);
        let delta = (value - rounded).abs();
        prop_assert!(delta <= Decimal::new(5, 3));
    }
}

// ============================================================================
// Totals Reconciliation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn totals_reconcile_at_currency_precision(
        qty in 0.01f64..500.0,
        price in 0.01f64..500.0,
        overhead in 0.0f64..50.0,
        margin in 0.0f64..50.0,
    ) {
        let mut quote = Quote::new(
            "DEV-PROP",
            ClientInfo::new("client", "address"),
            rate(margin),
            rate(overhead),
            VatRate::Standard,
        )
        .unwrap();
        let mut lot = Lot::new("LOT-01", "lot", 0).unwrap();
        let mut line = LineItem::new("line", "u", Quantity::new(1.0).unwrap(), Amount::ZERO)
            .unwrap();
        line.add_cost_detail(detail(CostType::Materials, qty, price));
        lot.add_line_item(line);
        quote.add_lot(lot).unwrap();

        let totals = compute_totals(&quote).unwrap();
        prop_assert_eq!(
            totals.incl_tax.get(),
            totals.excl_tax.get() + totals.tax.get()
        );
        prop_assert!(totals.excl_tax.get().scale() <= 2);
        prop_assert!(totals.tax.get().scale() <= 2);
    }
}
