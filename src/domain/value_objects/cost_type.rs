//! # Cost Type
//!
//! Closed enumeration of raw cost categories (débours).
//!
//! Every [`CostDetail`](crate::domain::entities::cost_detail::CostDetail)
//! carries exactly one cost type. The enum is deliberately closed and
//! matched exhaustively in the dominant-type and per-type-margin lookups,
//! so adding a category is a compile-time-visible change everywhere it
//! matters.
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::value_objects::cost_type::CostType;
//!
//! assert_eq!(CostType::ALL.len(), 5);
//! assert_eq!(CostType::Labor.to_string(), "LABOR");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a raw cost component.
///
/// Declaration order is significant: it is the stable iteration order of
/// [`CostType::ALL`] and the deterministic tie-break when two types
/// aggregate to the same raw cost during margin resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum CostType {
    /// Labor (main d'œuvre).
    Labor = 0,

    /// Materials (fournitures).
    Materials = 1,

    /// Subcontracting (sous-traitance).
    Subcontracting = 2,

    /// Equipment (matériel).
    Equipment = 3,

    /// Travel (déplacements).
    Travel = 4,
}

impl CostType {
    /// All cost types in stable declaration order.
    pub const ALL: [Self; 5] = [
        Self::Labor,
        Self::Materials,
        Self::Subcontracting,
        Self::Equipment,
        Self::Travel,
    ];

    /// Returns true if this cost type may carry labor metadata.
    #[inline]
    #[must_use]
    pub const fn is_labor(&self) -> bool {
        matches!(self, Self::Labor)
    }

    /// Returns the numeric value of this cost type.
    #[inline]
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Labor => "LABOR",
            Self::Materials => "MATERIALS",
            Self::Subcontracting => "SUBCONTRACTING",
            Self::Equipment => "EQUIPMENT",
            Self::Travel => "TRAVEL",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<u8> for CostType {
    type Error = InvalidCostTypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Labor),
            1 => Ok(Self::Materials),
            2 => Ok(Self::Subcontracting),
            3 => Ok(Self::Equipment),
            4 => Ok(Self::Travel),
            _ => Err(InvalidCostTypeError(value)),
        }
    }
}

impl FromStr for CostType {
    type Err = ParseCostTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LABOR" => Ok(Self::Labor),
            "MATERIALS" => Ok(Self::Materials),
            "SUBCONTRACTING" => Ok(Self::Subcontracting),
            "EQUIPMENT" => Ok(Self::Equipment),
            "TRAVEL" => Ok(Self::Travel),
            _ => Err(ParseCostTypeError(s.to_string())),
        }
    }
}

/// Error returned when converting an invalid u8 to CostType.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCostTypeError(pub u8);

impl fmt::Display for InvalidCostTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cost type value: {}", self.0)
    }
}

impl std::error::Error for InvalidCostTypeError {}

/// Error returned when parsing an unknown cost type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCostTypeError(pub String);

impl fmt::Display for ParseCostTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cost type: {}", self.0)
    }
}

impl std::error::Error for ParseCostTypeError {}
