//! # Signature
//!
//! Electronic signature attached to a quote.
//!
//! A signature is created once the quote reaches a sendable state and is
//! consumed by the conversion service: only a quote with a valid signature
//! can become a project.

use crate::domain::value_objects::{QuoteId, SignatureId, Timestamp};
use serde::{Deserialize, Serialize};

/// An electronic signature for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    id: SignatureId,
    quote_id: QuoteId,
    signer_name: String,
    signer_email: Option<String>,
    /// Opaque signature payload (base64 image or certificate blob).
    payload: String,
    signed_at: Timestamp,
    valid: bool,
    /// Hash of the signed document, binding the signature to its content.
    document_hash: String,
}

impl Signature {
    /// Creates a valid signature.
    #[must_use]
    pub fn new(
        quote_id: QuoteId,
        signer_name: impl Into<String>,
        payload: impl Into<String>,
        document_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: SignatureId::new_v4(),
            quote_id,
            signer_name: signer_name.into(),
            signer_email: None,
            payload: payload.into(),
            signed_at: Timestamp::now(),
            valid: true,
            document_hash: document_hash.into(),
        }
    }

    /// Returns the signature identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SignatureId {
        self.id
    }

    /// Returns the signed quote's identifier.
    #[inline]
    #[must_use]
    pub const fn quote_id(&self) -> QuoteId {
        self.quote_id
    }

    /// Returns the signer's name.
    #[must_use]
    pub fn signer_name(&self) -> &str {
        &self.signer_name
    }

    /// Returns the signer's email, if recorded.
    #[must_use]
    pub fn signer_email(&self) -> Option<&str> {
        self.signer_email.as_deref()
    }

    /// Sets the signer's email.
    pub fn set_signer_email(&mut self, email: Option<String>) {
        self.signer_email = email;
    }

    /// Returns the opaque signature payload.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns when the signature was made.
    #[inline]
    #[must_use]
    pub const fn signed_at(&self) -> Timestamp {
        self.signed_at
    }

    /// Returns true if the signature is currently valid.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Invalidates the signature (e.g. the quote was revised after signing).
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Returns the hash of the signed document.
    #[must_use]
    pub fn document_hash(&self) -> &str {
        &self.document_hash
    }
}
