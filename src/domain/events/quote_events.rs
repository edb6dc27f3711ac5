//! # Quote Events
//!
//! Events emitted when a quote changes lifecycle status or is converted
//! into a project. Events are immutable facts: they carry their own
//! identifier and occurrence time and are published after the aggregate
//! mutation has been persisted.

use crate::domain::value_objects::{
    Actor, EventId, ProjectId, QuoteId, QuoteStatus, Timestamp,
};
use serde::{Deserialize, Serialize};

/// A quote moved to a new lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteStatusChanged {
    /// Unique event identifier.
    pub event_id: EventId,

    /// The quote that transitioned.
    pub quote_id: QuoteId,

    /// Status before the transition.
    pub from: QuoteStatus,

    /// Status after the transition.
    pub to: QuoteStatus,

    /// Who requested the transition.
    pub actor: Actor,

    /// Justification, for refusals and losses.
    pub justification: Option<String>,

    /// When the transition happened.
    pub occurred_at: Timestamp,
}

impl QuoteStatusChanged {
    /// Creates the event with a fresh identifier and the current time.
    #[must_use]
    pub fn new(
        quote_id: QuoteId,
        from: QuoteStatus,
        to: QuoteStatus,
        actor: Actor,
        justification: Option<String>,
    ) -> Self {
        Self {
            event_id: EventId::new_v4(),
            quote_id,
            from,
            to,
            actor,
            justification,
            occurred_at: Timestamp::now(),
        }
    }
}

/// A quote was converted into a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteConverted {
    /// Unique event identifier.
    pub event_id: EventId,

    /// The converted quote.
    pub quote_id: QuoteId,

    /// The created project.
    pub project_id: ProjectId,

    /// Who triggered the conversion.
    pub actor: Actor,

    /// When the conversion happened.
    pub occurred_at: Timestamp,
}

impl QuoteConverted {
    /// Creates the event with a fresh identifier and the current time.
    #[must_use]
    pub fn new(quote_id: QuoteId, project_id: ProjectId, actor: Actor) -> Self {
        Self {
            event_id: EventId::new_v4(),
            quote_id,
            project_id,
            actor,
            occurred_at: Timestamp::now(),
        }
    }
}

/// Union of the events the engine publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum QuoteEvent {
    /// A lifecycle transition.
    StatusChanged(QuoteStatusChanged),

    /// A quote-to-project conversion.
    Converted(QuoteConverted),
}

impl QuoteEvent {
    /// Returns the event identifier.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        match self {
            Self::StatusChanged(e) => e.event_id,
            Self::Converted(e) => e.event_id,
        }
    }

    /// Returns the quote the event concerns.
    #[must_use]
    pub const fn quote_id(&self) -> QuoteId {
        match self {
            Self::StatusChanged(e) => e.quote_id,
            Self::Converted(e) => e.quote_id,
        }
    }

    /// Returns when the event occurred.
    #[must_use]
    pub const fn occurred_at(&self) -> Timestamp {
        match self {
            Self::StatusChanged(e) => e.occurred_at,
            Self::Converted(e) => e.occurred_at,
        }
    }
}

impl From<QuoteStatusChanged> for QuoteEvent {
    fn from(event: QuoteStatusChanged) -> Self {
        Self::StatusChanged(event)
    }
}

impl From<QuoteConverted> for QuoteEvent {
    fn from(event: QuoteConverted) -> Self {
        Self::Converted(event)
    }
}
