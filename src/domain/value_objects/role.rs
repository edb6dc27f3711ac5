//! # Roles
//!
//! Actor roles used by workflow authorization.
//!
//! Roles form a coarse hierarchy: [`Role::is_elevated`] marks the roles
//! allowed to validate quotes at or above the amount threshold. The
//! [`Role::System`] role represents automated actors (view tracking,
//! expiry sweeps), not humans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the actor attempting a workflow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Role {
    /// Sales representative (commercial).
    Sales = 0,

    /// Sales manager (responsable commercial).
    Manager = 1,

    /// Company director (direction).
    Director = 2,

    /// Back-office administrator.
    Admin = 3,

    /// Automated system actor (tracking, scheduled expiry).
    System = 4,
}

impl Role {
    /// Returns true if this role may validate quotes at or above the
    /// elevated-amount threshold.
    #[inline]
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::Manager | Self::Director | Self::Admin)
    }

    /// Returns true if this role represents an automated actor.
    #[inline]
    #[must_use]
    pub const fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sales => "SALES",
            Self::Manager => "MANAGER",
            Self::Director => "DIRECTOR",
            Self::Admin => "ADMIN",
            Self::System => "SYSTEM",
        };
        write!(f, "{}", s)
    }
}

/// An acting user with a role, as seen by the workflow engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Identifier of the acting user (or system process).
    pub user_id: super::ids::UserId,

    /// Role the actor holds.
    pub role: Role,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub fn new(user_id: impl Into<super::ids::UserId>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}
