//! # VAT Rate
//!
//! Statutory VAT rates, attestation requirements, and context defaults.
//!
//! French construction work is invoiced at one of three VAT rates. The
//! reduced rates are conditional on the nature of the work and require a
//! client attestation on a CERFA form:
//!
//! | Rate | Attestation | CERFA form |
//! |------|-------------|------------|
//! | 5.5% | required    | 1301-SD    |
//! | 10%  | required    | 1300-SD    |
//! | 20%  | none        | —          |
//!
//! Any other percentage is rejected at construction, including 0 and
//! negative values.
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::value_objects::vat::VatRate;
//! use rust_decimal::Decimal;
//!
//! let vat = VatRate::try_from_decimal(Decimal::new(55, 1)).unwrap();
//! assert!(vat.requires_attestation());
//! assert_eq!(vat.cerfa_form(), Some("1301-SD"));
//!
//! let base = Decimal::new(10000, 0);
//! assert_eq!(vat.compute_tax_amount(base).to_string(), "550.00");
//! ```

use super::arithmetic::round_currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a percentage is not an allowed VAT rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid VAT rate: {0} (allowed: 5.5, 10, 20)")]
pub struct InvalidVatRateError(pub Decimal);

/// An allowed VAT rate.
///
/// Immutable value; the attestation requirement and CERFA form identifier
/// derive from the rate itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum VatRate {
    /// 5.5% — energy renovation work (attestation CERFA 1301-SD).
    Reduced,

    /// 10% — renovation work on older residential buildings (attestation
    /// CERFA 1300-SD).
    Intermediate,

    /// 20% — standard rate, no attestation.
    Standard,
}

impl VatRate {
    /// Creates a VAT rate from a decimal percentage.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidVatRateError`] for any value outside {5.5, 10, 20},
    /// including 0 and negative values.
    pub fn try_from_decimal(value: Decimal) -> Result<Self, InvalidVatRateError> {
        if value == Decimal::new(55, 1) {
            Ok(Self::Reduced)
        } else if value == Decimal::new(10, 0) {
            Ok(Self::Intermediate)
        } else if value == Decimal::new(20, 0) {
            Ok(Self::Standard)
        } else {
            Err(InvalidVatRateError(value))
        }
    }

    /// Returns the rate as a decimal percentage.
    #[must_use]
    pub fn rate(self) -> Decimal {
        match self {
            Self::Reduced => Decimal::new(55, 1),
            Self::Intermediate => Decimal::new(10, 0),
            Self::Standard => Decimal::new(20, 0),
        }
    }

    /// Returns true if this rate requires a client attestation.
    #[inline]
    #[must_use]
    pub const fn requires_attestation(self) -> bool {
        matches!(self, Self::Reduced | Self::Intermediate)
    }

    /// Returns the CERFA form identifier justifying this rate, if any.
    #[must_use]
    pub const fn cerfa_form(self) -> Option<&'static str> {
        match self {
            Self::Reduced => Some("1301-SD"),
            Self::Intermediate => Some("1300-SD"),
            Self::Standard => None,
        }
    }

    /// Computes the tax amount for a base, rounded to currency precision.
    ///
    /// `tax = round(base × rate / 100, 2)`.
    #[must_use]
    pub fn compute_tax_amount(self, base: Decimal) -> Decimal {
        round_currency(base * self.rate() / Decimal::ONE_HUNDRED)
    }

    /// Resolves the default rate for a work context.
    ///
    /// - Energy renovation on a residential building older than two years
    ///   qualifies for 5.5%.
    /// - Other renovation on a residential building older than two years
    ///   qualifies for 10%.
    /// - Everything else — new construction, recent buildings,
    ///   non-residential use, or any unknown input — defaults to the safe
    ///   20% rate.
    #[must_use]
    pub fn default_for(context: &VatContext) -> Self {
        match (
            context.work_type,
            context.building_older_than_two_years,
            context.residential_use,
        ) {
            (Some(WorkType::EnergyRenovation), Some(true), Some(true)) => Self::Reduced,
            (Some(WorkType::Renovation), Some(true), Some(true)) => Self::Intermediate,
            _ => Self::Standard,
        }
    }
}

impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.rate())
    }
}

impl TryFrom<Decimal> for VatRate {
    type Error = InvalidVatRateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_from_decimal(value)
    }
}

impl From<VatRate> for Decimal {
    fn from(rate: VatRate) -> Self {
        rate.rate()
    }
}

impl Default for VatRate {
    fn default() -> Self {
        Self::Standard
    }
}

/// Nature of the contracted work, as far as VAT eligibility cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkType {
    /// New construction.
    NewConstruction,

    /// Renovation work without an energy-performance component.
    Renovation,

    /// Energy renovation (insulation, heating, etc.).
    EnergyRenovation,
}

/// Inputs to default VAT rate resolution.
///
/// Fields are optional: a missing answer is treated as "does not qualify"
/// and resolution falls back to the standard rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VatContext {
    /// Nature of the work, if known.
    pub work_type: Option<WorkType>,

    /// Whether the building was completed more than two years ago.
    pub building_older_than_two_years: Option<bool>,

    /// Whether the building is used as a dwelling.
    pub residential_use: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn allowed_rates_succeed() {
            assert_eq!(
                VatRate::try_from_decimal(Decimal::new(55, 1)).unwrap(),
                VatRate::Reduced
            );
            assert_eq!(
                VatRate::try_from_decimal(Decimal::new(10, 0)).unwrap(),
                VatRate::Intermediate
            );
            assert_eq!(
                VatRate::try_from_decimal(Decimal::new(20, 0)).unwrap(),
                VatRate::Standard
            );
        }

        #[test]
        fn zero_is_rejected() {
            assert!(VatRate::try_from_decimal(Decimal::ZERO).is_err());
        }

        #[test]
        fn negative_is_rejected() {
            assert!(VatRate::try_from_decimal(Decimal::new(-10, 0)).is_err());
        }

        #[test]
        fn seven_is_rejected() {
            let err = VatRate::try_from_decimal(Decimal::new(7, 0)).unwrap_err();
            assert_eq!(err, InvalidVatRateError(Decimal::new(7, 0)));
        }

        #[test]
        fn scale_does_not_matter() {
            // 10.0 and 10 are the same decimal value
            assert_eq!(
                VatRate::try_from_decimal(Decimal::new(100, 1)).unwrap(),
                VatRate::Intermediate
            );
        }
    }

    mod attestation {
        use super::*;

        #[test]
        fn reduced_rates_require_attestation() {
            assert!(VatRate::Reduced.requires_attestation());
            assert!(VatRate::Intermediate.requires_attestation());
            assert!(!VatRate::Standard.requires_attestation());
        }

        #[test]
        fn cerfa_forms() {
            assert_eq!(VatRate::Reduced.cerfa_form(), Some("1301-SD"));
            assert_eq!(VatRate::Intermediate.cerfa_form(), Some("1300-SD"));
            assert_eq!(VatRate::Standard.cerfa_form(), None);
        }
    }

    mod tax_amount {
        use super::*;

        #[test]
        fn reduced_rate_on_ten_thousand() {
            let tax = VatRate::Reduced.compute_tax_amount(Decimal::new(10000, 0));
            assert_eq!(tax.to_string(), "550.00");
        }

        #[test]
        fn standard_rate_on_ten_thousand() {
            let tax = VatRate::Standard.compute_tax_amount(Decimal::new(10000, 0));
            assert_eq!(tax.to_string(), "2000.00");
        }

        #[test]
        fn rounds_to_two_decimals() {
            // 123.45 × 5.5% = 6.78975 → 6.79
            let tax = VatRate::Reduced.compute_tax_amount(Decimal::new(12345, 2));
            assert_eq!(tax.to_string(), "6.79");
        }

        #[test]
        fn linear_in_base() {
            let base = Decimal::new(200, 0);
            let double = VatRate::Standard.compute_tax_amount(base + base);
            let single = VatRate::Standard.compute_tax_amount(base);
            assert_eq!(double, single + single);
        }
    }

    mod default_matrix {
        use super::*;

        fn context(
            work_type: Option<WorkType>,
            older: Option<bool>,
            residential: Option<bool>,
        ) -> VatContext {
            VatContext {
                work_type,
                building_older_than_two_years: older,
                residential_use: residential,
            }
        }

        #[test]
        fn energy_renovation_old_residential_gets_reduced() {
            let ctx = context(Some(WorkType::EnergyRenovation), Some(true), Some(true));
            assert_eq!(VatRate::default_for(&ctx), VatRate::Reduced);
        }

        #[test]
        fn renovation_old_residential_gets_intermediate() {
            let ctx = context(Some(WorkType::Renovation), Some(true), Some(true));
            assert_eq!(VatRate::default_for(&ctx), VatRate::Intermediate);
        }

        #[test]
        fn new_construction_gets_standard() {
            let ctx = context(Some(WorkType::NewConstruction), Some(true), Some(true));
            assert_eq!(VatRate::default_for(&ctx), VatRate::Standard);
        }

        #[test]
        fn recent_building_gets_standard() {
            let ctx = context(Some(WorkType::EnergyRenovation), Some(false), Some(true));
            assert_eq!(VatRate::default_for(&ctx), VatRate::Standard);
        }

        #[test]
        fn non_residential_gets_standard() {
            let ctx = context(Some(WorkType::Renovation), Some(true), Some(false));
            assert_eq!(VatRate::default_for(&ctx), VatRate::Standard);
        }

        #[test]
        fn missing_inputs_get_standard() {
            assert_eq!(VatRate::default_for(&VatContext::default()), VatRate::Standard);

            let ctx = context(Some(WorkType::EnergyRenovation), None, Some(true));
            assert_eq!(VatRate::default_for(&ctx), VatRate::Standard);
        }
    }

    mod serde {
        use super::*;

        #[test]
        fn serializes_as_decimal() {
            let json = serde_json::to_string(&VatRate::Reduced).unwrap();
            assert_eq!(json, "\"5.5\"");
        }

        #[test]
        fn deserializes_from_decimal() {
            let rate: VatRate = serde_json::from_str("\"20\"").unwrap();
            assert_eq!(rate, VatRate::Standard);
        }

        #[test]
        fn rejects_invalid_decimal() {
            let result: Result<VatRate, _> = serde_json::from_str("\"7\"");
            assert!(result.is_err());
        }
    }
}
