//! # Journal Entry
//!
//! Append-only audit records for quote mutations.
//!
//! Every observable change to a quote produces exactly one entry: an update
//! carries the per-field before/after diffs, a lifecycle action carries the
//! status pair (plus the justification for refusals and losses), and a
//! conversion carries the created project reference. Entries are never
//! mutated after creation; diff computation lives in
//! [`journal_recorder`](crate::domain::services::journal_recorder).

use crate::domain::value_objects::{
    Amount, JournalEntryId, ProjectId, Quantity, QuoteId, QuoteStatus, Rate, Timestamp, UserId,
    VatRate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A field value in its canonical journal form.
///
/// Serialization is canonical and stable: numbers render as their decimal
/// string, dates as RFC 3339, null explicitly as `null`, and composite
/// values as compact JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum JournalValue {
    /// Explicit absence of a value.
    Null,

    /// Free text.
    Text(String),

    /// Decimal number (amounts, quantities, rates).
    Number(rust_decimal::Decimal),

    /// Boolean flag.
    Bool(bool),

    /// Date/time value.
    Date(Timestamp),

    /// Composite value rendered as stable JSON.
    Composite(serde_json::Value),
}

impl JournalValue {
    /// Renders the canonical textual form used for diff comparison.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Text(s) => s.clone(),
            Self::Number(d) => d.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Date(ts) => ts.to_rfc3339(),
            Self::Composite(v) => v.to_string(),
        }
    }
}

impl fmt::Display for JournalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl From<Option<Rate>> for JournalValue {
    fn from(value: Option<Rate>) -> Self {
        match value {
            Some(rate) => Self::Number(rate.get()),
            None => Self::Null,
        }
    }
}

impl From<Rate> for JournalValue {
    fn from(value: Rate) -> Self {
        Self::Number(value.get())
    }
}

impl From<Amount> for JournalValue {
    fn from(value: Amount) -> Self {
        Self::Number(value.get())
    }
}

impl From<Quantity> for JournalValue {
    fn from(value: Quantity) -> Self {
        Self::Number(value.get())
    }
}

impl From<VatRate> for JournalValue {
    fn from(value: VatRate) -> Self {
        Self::Number(value.rate())
    }
}

impl From<&str> for JournalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for JournalValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for JournalValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One field's observed change within an update entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// Name of the mutated field.
    pub field: String,

    /// Canonical value before the update.
    pub before: JournalValue,

    /// Canonical value after the update.
    pub after: JournalValue,
}

/// What a journal entry records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum JournalAction {
    /// Quote created.
    Created,

    /// Field-level update with its diffs.
    Updated {
        /// Observed per-field changes, in the order they were supplied.
        diffs: Vec<FieldDiff>,
    },

    /// Lifecycle transition.
    StatusChanged {
        /// Status before the transition.
        from: QuoteStatus,
        /// Status after the transition.
        to: QuoteStatus,
        /// Justification for refusals and losses.
        justification: Option<String>,
    },

    /// Quote converted into a project.
    Converted {
        /// The created project.
        project_id: ProjectId,
    },

    /// Quote soft-deleted.
    Deleted,

    /// Free-form detail for actions outside the structured kinds.
    Detail {
        /// Human-readable description.
        message: String,
    },
}

/// An append-only audit record.
///
/// # Invariants
///
/// - Never mutated after creation (no setters)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    id: JournalEntryId,
    quote_id: QuoteId,
    action: JournalAction,
    author: UserId,
    recorded_at: Timestamp,
}

impl JournalEntry {
    /// Creates a new journal entry.
    #[must_use]
    pub fn new(quote_id: QuoteId, action: JournalAction, author: UserId) -> Self {
        Self {
            id: JournalEntryId::new_v4(),
            quote_id,
            action,
            author,
            recorded_at: Timestamp::now(),
        }
    }

    /// Returns the entry identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> JournalEntryId {
        self.id
    }

    /// Returns the quote this entry concerns.
    #[inline]
    #[must_use]
    pub const fn quote_id(&self) -> QuoteId {
        self.quote_id
    }

    /// Returns what was recorded.
    #[must_use]
    pub const fn action(&self) -> &JournalAction {
        &self.action
    }

    /// Returns the author of the change.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns when the entry was recorded.
    #[inline]
    #[must_use]
    pub const fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }
}
