//! # Price Calculator
//!
//! The price chain: raw cost (débours) to cost price to sale price to
//! quote totals.
//!
//! For a line carrying cost details the chain is
//!
//! ```text
//! raw_cost   = Σ quantity × unit_price        (per detail)
//! cost_price = raw_cost × (1 + overhead/100)
//! sale_price = cost_price × (1 + margin/100)
//! ```
//!
//! where the margin comes from the four-level resolution in
//! [`margin_resolver`](super::margin_resolver). A line without details is
//! priced directly as `quantity × unit_price`. Intermediate results keep
//! their full decimal precision; rounding to currency precision happens
//! once, on the aggregated totals and the tax amount.
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::services::price_calculator::{cost_price, sale_price};
//! use devis_engine::domain::value_objects::Rate;
//! use rust_decimal::Decimal;
//!
//! let raw = Decimal::new(8010, 0);
//! let cost = cost_price(raw, Rate::new(12.0).unwrap()).unwrap();
//! assert_eq!(cost.to_string(), "8971.20");
//!
//! let sale = sale_price(cost, Rate::new(18.0).unwrap()).unwrap();
//! assert_eq!(sale.to_string(), "10586.0160");
//! ```

use super::margin_resolver::resolve_margin;
use crate::domain::entities::line_item::LineItem;
use crate::domain::entities::lot::Lot;
use crate::domain::entities::quote::Quote;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::arithmetic::{round_currency, ArithmeticResult, CheckedArithmetic};
use crate::domain::value_objects::{Amount, Rate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computed totals for a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    /// Total excluding tax, at currency precision.
    pub excl_tax: Amount,

    /// Tax amount, at currency precision.
    pub tax: Amount,

    /// Total including tax, at currency precision.
    pub incl_tax: Amount,
}

/// Applies the overhead coefficient to a raw cost.
///
/// # Errors
///
/// Returns an arithmetic error if the markup overflows.
#[inline]
pub fn cost_price(raw_cost: Decimal, overhead: Rate) -> ArithmeticResult<Decimal> {
    overhead.apply_markup(raw_cost)
}

/// Applies the margin rate to a cost price.
///
/// # Errors
///
/// Returns an arithmetic error if the markup overflows.
#[inline]
pub fn sale_price(cost: Decimal, margin: Rate) -> ArithmeticResult<Decimal> {
    margin.apply_markup(cost)
}

/// Computes the sale amount of one line, unrounded.
///
/// A line with cost details goes through the full chain with its resolved
/// margin; a line without details is already priced and yields
/// `quantity × unit_price`.
///
/// # Errors
///
/// Returns an arithmetic error if any step overflows.
pub fn line_sale_amount(
    line: &LineItem,
    lot_margin: Option<Rate>,
    quote: &Quote,
) -> ArithmeticResult<Decimal> {
    if line.cost_details().is_empty() {
        return line.quantity().get().safe_mul(line.unit_price().get());
    }

    let mut raw = Decimal::ZERO;
    for detail in line.cost_details() {
        raw = raw.safe_add(detail.raw_cost().get())?;
    }

    let resolved = resolve_margin(
        line.margin(),
        lot_margin,
        quote.type_margins(),
        quote.global_margin(),
        line.cost_details(),
    );

    let cost = cost_price(raw, quote.overhead())?;
    sale_price(cost, resolved.rate)
}

/// Computes the sale amount of one lot, unrounded.
///
/// # Errors
///
/// Returns an arithmetic error if any step overflows.
pub fn lot_sale_amount(lot: &Lot, quote: &Quote) -> ArithmeticResult<Decimal> {
    let mut total = Decimal::ZERO;
    for line in lot.line_items() {
        total = total.safe_add(line_sale_amount(line, lot.margin(), quote)?)?;
    }
    Ok(total)
}

/// Computes the quote totals.
///
/// The tax amount is derived from the rounded total excluding tax using the
/// quote's default VAT rate, so that `incl_tax = excl_tax + tax` holds
/// exactly at currency precision.
///
/// # Errors
///
/// Returns a [`DomainError`](crate::domain::errors::DomainError) arithmetic
/// variant if any step overflows.
pub fn compute_totals(quote: &Quote) -> DomainResult<QuoteTotals> {
    let mut total = Decimal::ZERO;
    for lot in quote.lots() {
        total = total.safe_add(lot_sale_amount(lot, quote)?)?;
    }

    let excl_tax = round_currency(total);
    let tax = quote.default_vat().compute_tax_amount(excl_tax);
    let incl_tax = excl_tax.safe_add(tax)?;

    Ok(QuoteTotals {
        excl_tax: Amount::from_decimal(excl_tax)?,
        tax: Amount::from_decimal(tax)?,
        incl_tax: Amount::from_decimal(incl_tax)?,
    })
}

/// Recomputes and stores the quote totals.
///
/// # Errors
///
/// Same as [`compute_totals`].
pub fn recalculate(quote: &mut Quote) -> DomainResult<QuoteTotals> {
    let totals = compute_totals(quote)?;
    quote.set_totals(totals.excl_tax, totals.incl_tax);
    Ok(totals)
}
