//! # Workflow Engine
//!
//! Guarded lifecycle transitions for quotes.
//!
//! Every status change goes through [`WorkflowEngine::apply`], which checks,
//! in order:
//!
//! 1. the justification requirement (refusals and losses must carry a
//!    non-blank motif),
//! 2. that the transition is legal from the quote's current status,
//! 3. that the acting role is authorized,
//! 4. the validation amount threshold.
//!
//! A denied transition leaves the quote untouched and reports the precise
//! [`DenialReason`]. Quotes at or above the validation threshold cannot be
//! sent directly from draft; they must go through validation, and the
//! validation itself requires an elevated role ([`Role::is_elevated`]). The
//! threshold is inclusive.
//!
//! # Examples
//!
//! ```
//! use devis_engine::domain::entities::quote::{ClientInfo, Quote};
//! use devis_engine::domain::services::workflow::{TransitionKind, WorkflowEngine};
//! use devis_engine::domain::value_objects::{Actor, Rate, Role, VatRate};
//!
//! let mut quote = Quote::new(
//!     "DEV-2024-001",
//!     ClientInfo::new("SCI Les Tilleuls", "12 rue des Lilas"),
//!     Rate::new(15.0).unwrap(),
//!     Rate::new(8.0).unwrap(),
//!     VatRate::Standard,
//! ).unwrap();
//!
//! let engine = WorkflowEngine::default();
//! let actor = Actor::new("u-42", Role::Sales);
//! engine.apply(&mut quote, TransitionKind::Send, &actor, None).unwrap();
//! assert_eq!(quote.status().to_string(), "SENT");
//! ```

use crate::domain::entities::quote::Quote;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Actor, QuoteStatus, Role};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The named workflow transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionKind {
    /// Draft → In validation: request internal approval.
    Submit,

    /// In validation → Sent: approve and release to the client.
    Validate,

    /// Draft → Sent: send directly, below the validation threshold.
    Send,

    /// Sent → Viewed: the client opened the quote (system-recorded).
    MarkViewed,

    /// Sent/Viewed → In negotiation: the client asked for changes.
    Negotiate,

    /// Client-facing → Accepted.
    Accept,

    /// Client-facing → Refused; requires a motif.
    Refuse,

    /// Client-facing → Lost; requires a motif.
    Lose,

    /// Client-facing → Expired: validity period elapsed.
    Expire,
}

impl TransitionKind {
    /// All transitions, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Submit,
        Self::Validate,
        Self::Send,
        Self::MarkViewed,
        Self::Negotiate,
        Self::Accept,
        Self::Refuse,
        Self::Lose,
        Self::Expire,
    ];

    /// The status the transition leads to.
    #[must_use]
    pub const fn target(self) -> QuoteStatus {
        match self {
            Self::Submit => QuoteStatus::InValidation,
            Self::Validate | Self::Send => QuoteStatus::Sent,
            Self::MarkViewed => QuoteStatus::Viewed,
            Self::Negotiate => QuoteStatus::InNegotiation,
            Self::Accept => QuoteStatus::Accepted,
            Self::Refuse => QuoteStatus::Refused,
            Self::Lose => QuoteStatus::Lost,
            Self::Expire => QuoteStatus::Expired,
        }
    }

    /// The statuses the transition may start from.
    #[must_use]
    pub const fn sources(self) -> &'static [QuoteStatus] {
        match self {
            Self::Submit | Self::Send => &[QuoteStatus::Draft],
            Self::Validate => &[QuoteStatus::InValidation],
            Self::MarkViewed => &[QuoteStatus::Sent],
            Self::Negotiate => &[QuoteStatus::Sent, QuoteStatus::Viewed],
            Self::Accept | Self::Refuse | Self::Lose | Self::Expire => &[
                QuoteStatus::Sent,
                QuoteStatus::Viewed,
                QuoteStatus::InNegotiation,
            ],
        }
    }

    /// Returns true if the transition must carry a justification.
    #[inline]
    #[must_use]
    pub const fn requires_justification(self) -> bool {
        matches!(self, Self::Refuse | Self::Lose)
    }

    /// Returns true if the given role may request this transition.
    ///
    /// Only the system records client views; expiry is reserved for the
    /// scheduled sweep and administrators; every other transition is open to
    /// human roles (the amount threshold is checked separately).
    #[must_use]
    pub const fn role_allowed(self, role: Role) -> bool {
        match self {
            Self::MarkViewed => role.is_system(),
            Self::Expire => role.is_system() || matches!(role, Role::Admin),
            _ => !role.is_system(),
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Submit => "SUBMIT",
            Self::Validate => "VALIDATE",
            Self::Send => "SEND",
            Self::MarkViewed => "MARK_VIEWED",
            Self::Negotiate => "NEGOTIATE",
            Self::Accept => "ACCEPT",
            Self::Refuse => "REFUSE",
            Self::Lose => "LOSE",
            Self::Expire => "EXPIRE",
        };
        write!(f, "{}", s)
    }
}

/// Why a transition was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    /// The transition is not legal from the current status.
    InvalidStatus,

    /// The acting role may not request this transition.
    RoleNotAuthorized,

    /// The quote total hits the validation threshold.
    AmountThreshold {
        /// The configured threshold (inclusive).
        threshold: Decimal,
        /// The quote total that was checked.
        total: Decimal,
    },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStatus => write!(f, "transition not legal from current status"),
            Self::RoleNotAuthorized => write!(f, "role not authorized"),
            Self::AmountThreshold { threshold, total } => {
                write!(f, "total {} requires validation (threshold {})", total, threshold)
            }
        }
    }
}

/// A transition currently offered by a quote, with its requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTransition {
    /// The transition.
    pub transition: TransitionKind,

    /// The status it leads to.
    pub target: QuoteStatus,

    /// Roles that may request it; empty means any human role.
    pub required_roles: Vec<Role>,

    /// Whether a justification must accompany it.
    pub justification_required: bool,
}

/// Applies guarded lifecycle transitions to quotes.
///
/// Stateless apart from the configured validation threshold; safe to share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEngine {
    validation_threshold: Decimal,
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self {
            validation_threshold: Decimal::from(50_000),
        }
    }
}

impl WorkflowEngine {
    /// Creates an engine with a custom validation threshold (inclusive).
    #[must_use]
    pub const fn new(validation_threshold: Decimal) -> Self {
        Self {
            validation_threshold,
        }
    }

    /// Returns the configured validation threshold.
    #[inline]
    #[must_use]
    pub const fn validation_threshold(&self) -> Decimal {
        self.validation_threshold
    }

    /// Applies a transition to the quote, returning the new status.
    ///
    /// Checks run in a fixed order (justification, status, role, amount) and
    /// a failure at any step leaves the quote untouched.
    ///
    /// # Errors
    ///
    /// - [`DomainError::MissingJustification`] for a refusal or loss without
    ///   a non-blank motif
    /// - [`DomainError::TransitionNotAllowed`] with the precise
    ///   [`DenialReason`] for every other denial
    pub fn apply(
        &self,
        quote: &mut Quote,
        transition: TransitionKind,
        actor: &Actor,
        justification: Option<&str>,
    ) -> DomainResult<QuoteStatus> {
        let target = self.check(quote, transition, actor, justification)?;
        quote.apply_status(target);
        Ok(target)
    }

    /// Runs every guard without mutating the quote.
    ///
    /// # Errors
    ///
    /// Same as [`WorkflowEngine::apply`].
    pub fn check(
        &self,
        quote: &Quote,
        transition: TransitionKind,
        actor: &Actor,
        justification: Option<&str>,
    ) -> DomainResult<QuoteStatus> {
        // Input validation comes before any state inspection
        if transition.requires_justification() {
            let motif = justification.map(str::trim).unwrap_or_default();
            if motif.is_empty() {
                return Err(DomainError::MissingJustification { transition });
            }
        }

        let status = quote.status();
        let target = transition.target();

        let legal = !quote.is_deleted()
            && !quote.is_converted()
            && transition.sources().contains(&status)
            && status.can_transition_to(target);
        if !legal {
            return Err(denied(transition, status, actor, DenialReason::InvalidStatus));
        }

        if !transition.role_allowed(actor.role) {
            return Err(denied(transition, status, actor, DenialReason::RoleNotAuthorized));
        }

        let total = quote.total_excl_tax().get();
        match transition {
            // Direct send is reserved for quotes below the threshold
            TransitionKind::Send if total >= self.validation_threshold => {
                Err(denied(
                    transition,
                    status,
                    actor,
                    DenialReason::AmountThreshold {
                        threshold: self.validation_threshold,
                        total,
                    },
                ))
            }
            // Validating at or above the threshold needs an elevated role
            TransitionKind::Validate
                if total >= self.validation_threshold && !actor.role.is_elevated() =>
            {
                Err(denied(
                    transition,
                    status,
                    actor,
                    DenialReason::AmountThreshold {
                        threshold: self.validation_threshold,
                        total,
                    },
                ))
            }
            _ => Ok(target),
        }
    }

    /// Lists the transitions the quote currently offers.
    ///
    /// A deleted or converted quote offers none. Role and threshold
    /// requirements are reported, not filtered.
    #[must_use]
    pub fn available_transitions(&self, quote: &Quote) -> Vec<AvailableTransition> {
        if quote.is_deleted() || quote.is_converted() {
            return Vec::new();
        }
        let status = quote.status();
        let total = quote.total_excl_tax().get();

        TransitionKind::ALL
            .into_iter()
            .filter(|t| t.sources().contains(&status))
            .filter(|t| !matches!(t, TransitionKind::Send) || total < self.validation_threshold)
            .map(|transition| {
                let required_roles = match transition {
                    TransitionKind::MarkViewed => vec![Role::System],
                    TransitionKind::Expire => vec![Role::System, Role::Admin],
                    TransitionKind::Validate if total >= self.validation_threshold => {
                        vec![Role::Manager, Role::Director, Role::Admin]
                    }
                    _ => Vec::new(),
                };
                AvailableTransition {
                    transition,
                    target: transition.target(),
                    required_roles,
                    justification_required: transition.requires_justification(),
                }
            })
            .collect()
    }
}

const fn denied(
    transition: TransitionKind,
    status: QuoteStatus,
    actor: &Actor,
    reason: DenialReason,
) -> DomainError {
    DomainError::TransitionNotAllowed {
        transition,
        status,
        role: actor.role,
        reason,
    }
}
