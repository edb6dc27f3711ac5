//! # Journal Recorder
//!
//! Builds audit journal entries from observed changes.
//!
//! Field updates are diffed before recording: a change whose before and
//! after values are equal is dropped, and an update in which every change
//! collapses produces no entry at all. Decimal values compare numerically,
//! so rewriting `12` as `12.00` is not a change. Lifecycle transitions,
//! conversions, and deletions each produce exactly one entry.

use crate::domain::entities::journal::{FieldDiff, JournalAction, JournalEntry, JournalValue};
use crate::domain::value_objects::{ProjectId, QuoteId, QuoteStatus, UserId};

/// One proposed field change, prior to diffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Name of the field.
    pub field: String,

    /// Value before the update.
    pub before: JournalValue,

    /// Value after the update.
    pub after: JournalValue,
}

impl FieldChange {
    /// Creates a field change.
    pub fn new(
        field: impl Into<String>,
        before: impl Into<JournalValue>,
        after: impl Into<JournalValue>,
    ) -> Self {
        Self {
            field: field.into(),
            before: before.into(),
            after: after.into(),
        }
    }
}

/// Records an update, keeping only the changes that actually changed.
///
/// Returns `None` when every proposed change is a no-op: a no-op update
/// must not pollute the journal.
#[must_use]
pub fn record_update(
    quote_id: QuoteId,
    author: &UserId,
    changes: Vec<FieldChange>,
) -> Option<JournalEntry> {
    let diffs: Vec<FieldDiff> = changes
        .into_iter()
        .filter(|change| change.before != change.after)
        .map(|change| FieldDiff {
            field: change.field,
            before: change.before,
            after: change.after,
        })
        .collect();

    if diffs.is_empty() {
        return None;
    }
    Some(JournalEntry::new(
        quote_id,
        JournalAction::Updated { diffs },
        author.clone(),
    ))
}

/// Records the creation of a quote.
#[must_use]
pub fn record_creation(quote_id: QuoteId, author: &UserId) -> JournalEntry {
    JournalEntry::new(quote_id, JournalAction::Created, author.clone())
}

/// Records a lifecycle transition.
#[must_use]
pub fn record_status_change(
    quote_id: QuoteId,
    author: &UserId,
    from: QuoteStatus,
    to: QuoteStatus,
    justification: Option<String>,
) -> JournalEntry {
    JournalEntry::new(
        quote_id,
        JournalAction::StatusChanged {
            from,
            to,
            justification,
        },
        author.clone(),
    )
}

/// Records the conversion of a quote into a project.
#[must_use]
pub fn record_conversion(
    quote_id: QuoteId,
    author: &UserId,
    project_id: ProjectId,
) -> JournalEntry {
    JournalEntry::new(
        quote_id,
        JournalAction::Converted { project_id },
        author.clone(),
    )
}

/// Records the soft deletion of a quote.
#[must_use]
pub fn record_deletion(quote_id: QuoteId, author: &UserId) -> JournalEntry {
    JournalEntry::new(quote_id, JournalAction::Deleted, author.clone())
}
