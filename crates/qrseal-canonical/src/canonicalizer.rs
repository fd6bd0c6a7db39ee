use crate::payload::Payload;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// The payload could not be rendered as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Canonical bytes of a payload: the exact input to signing and verification.
///
/// Only [`canonicalize`] produces these, so a signature can never be computed
/// over bytes that skipped the canonical rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no bytes (never true for a valid payload).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Produces the canonical bytes for a payload.
///
/// Compact JSON: no insignificant whitespace, fields in canonical order,
/// non-ASCII text emitted as literal UTF-8. Control characters use the short
/// escapes (`\n`, `\t`, ...) or lowercase `\u00XX`, which matches what common
/// JSON encoders emit when ASCII escaping is disabled.
pub fn canonicalize(payload: &Payload) -> Result<CanonicalBytes, CanonicalizationError> {
    let bytes = serde_json::to_vec(payload)
        .map_err(|err| CanonicalizationError::Serialization(err.to_string()))?;
    Ok(CanonicalBytes(bytes))
}
