//! # Identity Value Objects
//!
//! Type-safe identity wrappers for domain identifiers.
//!
//! This module provides newtype wrappers for all domain identifiers,
//! ensuring type safety and preventing accidental mixing of different ID
//! types.
//!
//! ## UUID-based Identifiers
//!
//! - [`QuoteId`] - Quote (devis) identifier
//! - [`LotId`] - Lot identifier
//! - [`LineItemId`] - Line item identifier
//! - [`CostDetailId`] - Cost detail (débours) identifier
//! - [`SignatureId`] - Signature identifier
//! - [`JournalEntryId`] - Journal entry identifier
//! - [`ProjectId`] - Downstream project (chantier) identifier
//! - [`EventId`] - Domain event identifier
//!
//! ## String-based Identifiers
//!
//! - [`UserId`] - Acting user identifier
//! - [`ArticleId`] - Catalog article identifier

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates an identifier from an existing UUID.
            #[inline]
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generates a new random identifier using UUID v4.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner UUID value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id! {
    /// Quote (devis) identifier.
    QuoteId
}

uuid_id! {
    /// Lot identifier.
    LotId
}

uuid_id! {
    /// Line item identifier.
    LineItemId
}

uuid_id! {
    /// Cost detail (débours) identifier.
    CostDetailId
}

uuid_id! {
    /// Signature identifier.
    SignatureId
}

uuid_id! {
    /// Journal entry identifier.
    JournalEntryId
}

uuid_id! {
    /// Downstream project (chantier) identifier.
    ProjectId
}

uuid_id! {
    /// Domain event identifier.
    EventId
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id! {
    /// Acting user identifier.
    UserId
}

string_id! {
    /// Catalog article identifier.
    ArticleId
}
