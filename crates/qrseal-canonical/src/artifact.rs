use base64::{DecodeError, Engine};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::canonicalizer::CanonicalizationError;
use crate::payload::Payload;
use crate::timestamp::Timestamp;
use crate::validation::ValidationError;

/// Name of the detached-signature field in the transport form.
pub const SIGNATURE_FIELD: &str = "signature";

/// Error returned when received artifact text is structurally invalid.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not JSON.
    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Json {
        /// 1-based line of the failure.
        line: usize,
        /// 1-based column of the failure.
        column: usize,
        /// Parser message.
        message: String,
    },
    /// The JSON value is not an object.
    #[error("artifact must be a JSON object")]
    NotAnObject,
    /// A required field is absent.
    #[error("missing required field {field}")]
    MissingField {
        /// Field name.
        field: &'static str,
    },
    /// A required field is present but empty.
    #[error("field {field} must not be empty")]
    EmptyField {
        /// Field name.
        field: &'static str,
    },
    /// A field holds something other than a string.
    #[error("field {field} must be a string")]
    WrongType {
        /// Field name.
        field: &'static str,
    },
    /// A field outside the known set is present and would go unauthenticated.
    #[error("unknown field {0}")]
    UnknownField(String),
    /// A date-time field is not RFC 3339 with offset.
    #[error("field {field} ('{value}') is not an RFC 3339 date-time with offset")]
    InvalidTimestamp {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// The signature contains characters outside the standard base64 alphabet.
    #[error("signature is not valid base64: {0}")]
    InvalidSignatureEncoding(String),
}

/// A payload together with its detached signature: the transport form.
///
/// Serializes as the payload fields in canonical order followed by
/// `signature`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedArtifact {
    #[serde(flatten)]
    payload: Payload,
    signature: String,
}

impl SignedArtifact {
    /// Attaches raw signature bytes, stored as standard padded base64.
    pub fn new(payload: Payload, signature: &[u8]) -> Self {
        Self {
            payload,
            signature: base64::engine::general_purpose::STANDARD.encode(signature),
        }
    }

    /// The signed payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The signature as carried on the wire.
    pub fn signature_b64(&self) -> &str {
        &self.signature
    }

    /// Compact JSON text for transport or QR encoding.
    pub fn to_json(&self) -> Result<String, CanonicalizationError> {
        serde_json::to_string(self).map_err(|err| CanonicalizationError::Serialization(err.to_string()))
    }
}

/// A received artifact: the payload rebuilt from the fields that were
/// present, and the signature if one was carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedArtifact {
    /// Payload reconstructed from known field names.
    pub payload: Payload,
    /// Base64 signature text, if present.
    pub signature: Option<String>,
}

/// A carried signature after base64 decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureBytes {
    /// Standard padded base64 that decoded cleanly.
    Decoded(Vec<u8>),
    /// Base64-alphabet text with a bad length, padding or final symbol, as
    /// left by a corrupted character. No key produces it.
    Malformed,
}

impl ReceivedArtifact {
    /// Decodes the signature, if present.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidSignatureEncoding`] when the text contains a
    /// character outside the standard base64 alphabet.
    pub fn signature_bytes(&self) -> Result<Option<SignatureBytes>, ParseError> {
        self.signature.as_deref().map(decode_signature).transpose()
    }
}

fn decode_signature(sig: &str) -> Result<SignatureBytes, ParseError> {
    match base64::engine::general_purpose::STANDARD.decode(sig) {
        Ok(bytes) => Ok(SignatureBytes::Decoded(bytes)),
        Err(err) if matches!(err, DecodeError::InvalidByte(_, byte) if byte != b'=') => {
            Err(ParseError::InvalidSignatureEncoding(err.to_string()))
        }
        Err(err) => {
            tracing::debug!(error = %err, "signature is malformed base64");
            Ok(SignatureBytes::Malformed)
        }
    }
}

/// Parses received artifact text.
///
/// The payload is rebuilt from field presence alone: the order and spacing of
/// the received text never influence canonical bytes. Unknown fields are
/// rejected because they could not be covered by the signature.
pub fn parse_artifact(text: &str) -> Result<ReceivedArtifact, ParseError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|err| ParseError::Json {
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    })?;
    let Value::Object(mut map) = value else {
        return Err(ParseError::NotAnObject);
    };

    let signature = take_string(&mut map, SIGNATURE_FIELD)?;
    let data = take_string(&mut map, "data")?.ok_or(ParseError::MissingField { field: "data" })?;
    let mut payload = Payload::new(data).map_err(|_| ParseError::EmptyField { field: "data" })?;

    if let Some(doc_id) = take_string(&mut map, "doc_id")? {
        payload = payload.with_doc_id(doc_id);
    }
    if let Some(created_by) = take_string(&mut map, "created_by")? {
        payload = payload.with_created_by(created_by);
    }
    if let Some(timestamp) = take_timestamp(&mut map, "timestamp")? {
        payload = payload.with_timestamp(timestamp);
    }
    if let Some(expires_at) = take_timestamp(&mut map, "expires_at")? {
        payload = payload.with_expires_at(expires_at);
    }

    if let Some(unknown) = map.keys().next() {
        return Err(ParseError::UnknownField(unknown.clone()));
    }

    Ok(ReceivedArtifact { payload, signature })
}

fn take_string(map: &mut Map<String, Value>, field: &'static str) -> Result<Option<String>, ParseError> {
    match map.remove(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ParseError::WrongType { field }),
    }
}

fn take_timestamp(
    map: &mut Map<String, Value>,
    field: &'static str,
) -> Result<Option<Timestamp>, ParseError> {
    take_string(map, field)?
        .map(|raw| {
            Timestamp::parse_field(field, raw).map_err(|err| match err {
                ValidationError::InvalidDateTime { field, value } => {
                    ParseError::InvalidTimestamp { field, value }
                }
                other => ParseError::InvalidTimestamp {
                    field,
                    value: other.to_string(),
                },
            })
        })
        .transpose()
}
