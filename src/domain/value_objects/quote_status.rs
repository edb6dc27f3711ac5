//! # Quote Status
//!
//! Quote lifecycle state machine.
//!
//! This module provides the [`QuoteStatus`] enum representing the lifecycle
//! of a quote (devis) with enforced state transitions. Guard evaluation
//! (roles, amount threshold, justification) lives in
//! [`workflow`](crate::domain::services::workflow); this enum only answers
//! which status edges exist.
//!
//! # State Machine
//!
//! ```text
//! Draft → InValidation → Sent → {Viewed, InNegotiation} → {Accepted, Refused, Lost, Expired}
//!   └───────────────────→ Sent (direct dispatch below the validation threshold)
//! ```
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::value_objects::quote_status::QuoteStatus;
//!
//! let status = QuoteStatus::Draft;
//! assert!(status.can_transition_to(QuoteStatus::InValidation));
//! assert!(!status.can_transition_to(QuoteStatus::Accepted));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quote lifecycle status.
///
/// State transitions are enforced via
/// [`can_transition_to`](QuoteStatus::can_transition_to) and only applied
/// through the workflow engine.
///
/// # Terminal States
///
/// The following states are terminal (no further transitions allowed):
/// - [`Accepted`](QuoteStatus::Accepted) - Client accepted; additionally
///   becomes immutable once converted to a project
/// - [`Refused`](QuoteStatus::Refused) - Client refused
/// - [`Lost`](QuoteStatus::Lost) - Deal lost
/// - [`Expired`](QuoteStatus::Expired) - Validity period elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum QuoteStatus {
    /// Quote is being drafted.
    #[default]
    Draft = 0,

    /// Quote awaits internal validation.
    InValidation = 1,

    /// Quote has been sent to the client.
    Sent = 2,

    /// Client opened the quote.
    Viewed = 3,

    /// Terms are being negotiated with the client.
    InNegotiation = 4,

    /// Client accepted the quote (terminal).
    Accepted = 5,

    /// Client refused the quote (terminal).
    Refused = 6,

    /// Deal was lost (terminal).
    Lost = 7,

    /// Quote expired without an answer (terminal).
    Expired = 8,
}

impl QuoteStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Draft,
        Self::InValidation,
        Self::Sent,
        Self::Viewed,
        Self::InNegotiation,
        Self::Accepted,
        Self::Refused,
        Self::Lost,
        Self::Expired,
    ];

    /// Returns true if this is a terminal status.
    ///
    /// Terminal statuses cannot transition to any other status.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Accepted | Self::Refused | Self::Lost | Self::Expired
        )
    }

    /// Returns true if quote content (lots, lines, cost details) may be
    /// edited in this status.
    #[inline]
    #[must_use]
    pub const fn is_modifiable(&self) -> bool {
        matches!(self, Self::Draft | Self::InNegotiation)
    }

    /// Returns true if this status means the client has the quote in hand.
    #[inline]
    #[must_use]
    pub const fn is_client_facing(&self) -> bool {
        matches!(self, Self::Sent | Self::Viewed | Self::InNegotiation)
    }

    /// Returns true if this status can transition to the target status.
    ///
    /// Enforces the quote state machine edges:
    /// - Draft → InValidation, Sent
    /// - InValidation → Sent
    /// - Sent → Viewed, InNegotiation, Accepted, Refused, Lost, Expired
    /// - Viewed → InNegotiation, Accepted, Refused, Lost, Expired
    /// - InNegotiation → Accepted, Refused, Lost, Expired
    /// - Terminal statuses → (none)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            // From Draft
            (Self::Draft, Self::InValidation)
                | (Self::Draft, Self::Sent)
                // From InValidation
                | (Self::InValidation, Self::Sent)
                // From Sent
                | (Self::Sent, Self::Viewed)
                | (Self::Sent, Self::InNegotiation)
                | (Self::Sent, Self::Accepted)
                | (Self::Sent, Self::Refused)
                | (Self::Sent, Self::Lost)
                | (Self::Sent, Self::Expired)
                // From Viewed
                | (Self::Viewed, Self::InNegotiation)
                | (Self::Viewed, Self::Accepted)
                | (Self::Viewed, Self::Refused)
                | (Self::Viewed, Self::Lost)
                | (Self::Viewed, Self::Expired)
                // From InNegotiation
                | (Self::InNegotiation, Self::Accepted)
                | (Self::InNegotiation, Self::Refused)
                | (Self::InNegotiation, Self::Lost)
                | (Self::InNegotiation, Self::Expired)
        )
    }

    /// Returns the numeric value of this status.
    #[inline]
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "DRAFT",
            Self::InValidation => "IN_VALIDATION",
            Self::Sent => "SENT",
            Self::Viewed => "VIEWED",
            Self::InNegotiation => "IN_NEGOTIATION",
            Self::Accepted => "ACCEPTED",
            Self::Refused => "REFUSED",
            Self::Lost => "LOST",
            Self::Expired => "EXPIRED",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<u8> for QuoteStatus {
    type Error = InvalidQuoteStatusError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Draft),
            1 => Ok(Self::InValidation),
            2 => Ok(Self::Sent),
            3 => Ok(Self::Viewed),
            4 => Ok(Self::InNegotiation),
            5 => Ok(Self::Accepted),
            6 => Ok(Self::Refused),
            7 => Ok(Self::Lost),
            8 => Ok(Self::Expired),
            _ => Err(InvalidQuoteStatusError(value)),
        }
    }
}

/// Error returned when converting an invalid u8 to QuoteStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidQuoteStatusError(pub u8);

impl fmt::Display for InvalidQuoteStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid quote status value: {}", self.0)
    }
}

impl std::error::Error for InvalidQuoteStatusError {}
