use serde::Serialize;

use crate::canonicalizer::{canonicalize, CanonicalBytes, CanonicalizationError};
use crate::timestamp::Timestamp;
use crate::validation::ValidationError;

/// The signable portion of a signed QR artifact.
///
/// Declaration order is canonical order. Absent optionals are omitted, never
/// serialized as `null`, so canonical bytes are a pure function of which
/// fields are present and what they contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<Timestamp>,
}

impl Payload {
    /// Creates a payload carrying only `data`.
    pub fn new(data: impl Into<String>) -> Result<Self, ValidationError> {
        let data = data.into();
        if data.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "data" });
        }
        Ok(Self {
            data,
            doc_id: None,
            created_by: None,
            timestamp: None,
            expires_at: None,
        })
    }

    /// Sets the document identifier.
    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = Some(doc_id.into());
        self
    }

    /// Sets the attestation author.
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Sets the signing-time timestamp.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the expiration instant.
    pub fn with_expires_at(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Attested content.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Optional document identifier.
    pub fn doc_id(&self) -> Option<&str> {
        self.doc_id.as_deref()
    }

    /// Optional attestation author.
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Optional signing-time timestamp.
    pub fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }

    /// Optional expiration instant.
    pub fn expires_at(&self) -> Option<&Timestamp> {
        self.expires_at.as_ref()
    }

    /// Canonical bytes of this payload.
    pub fn canonical_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        canonicalize(self)
    }
}
