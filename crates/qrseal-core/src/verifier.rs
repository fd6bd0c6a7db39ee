use chrono::{DateTime, Utc};
use p256::ecdsa::signature::Verifier as _;
use p256::ecdsa::Signature;
use qrseal_canonical::{
    parse_artifact, CanonicalBytes, Digest, Payload, SignatureBytes, Timestamp,
};
use serde::Serialize;

use crate::errors::CoreError;
use crate::keys::PublicKey;

/// Outcome of checking a well-formed, signed artifact.
///
/// Exactly four outcomes: the signature does not check, or it checks and the
/// payload has no expiry, has not expired yet, or has expired. Expiry is a
/// policy result reported alongside authenticity, not a failure of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Signature does not match the canonical bytes and key.
    Invalid,
    /// Signature valid; no `expires_at`.
    ValidNoExpiry,
    /// Signature valid; now is at or before `expires_at`.
    ValidActive {
        /// Expiration carried by the payload.
        expires_at: Timestamp,
    },
    /// Signature valid; now is after `expires_at`.
    ValidExpired {
        /// Expiration carried by the payload.
        expires_at: Timestamp,
    },
}

impl VerificationOutcome {
    /// Whether the signature checked.
    pub fn is_authentic(&self) -> bool {
        !matches!(self, VerificationOutcome::Invalid)
    }

    /// Whether the signature checked and the payload is within its validity window.
    pub fn is_acceptable(&self) -> bool {
        matches!(
            self,
            VerificationOutcome::ValidNoExpiry | VerificationOutcome::ValidActive { .. }
        )
    }
}

/// Verification result with the payload it was computed over.
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// The outcome.
    pub outcome: VerificationOutcome,
    /// The payload rebuilt from the received fields.
    pub payload: Payload,
    /// Fingerprint of the canonical bytes that were checked.
    pub fingerprint: Digest,
}

/// Verifier bound to one public key.
///
/// Holds no mutable state; one instance may be shared across threads.
#[derive(Debug, Clone)]
pub struct Verifier {
    key: PublicKey,
}

impl Verifier {
    /// Creates a verifier for `key`.
    pub fn new(key: PublicKey) -> Self {
        Self { key }
    }

    /// Verifies artifact text against the system clock.
    pub fn verify(&self, text: &str) -> Result<VerificationReport, CoreError> {
        self.verify_at(text, Utc::now())
    }

    /// Verifies artifact text, evaluating expiry at `now`.
    ///
    /// # Errors
    ///
    /// [`CoreError::Parse`] for malformed text (including signatures with
    /// characters outside the base64 alphabet) and
    /// [`CoreError::MissingSignature`] when no `signature` field is present.
    /// A signature that does not check, including one whose base64 padding
    /// or final symbol is corrupt, is [`VerificationOutcome::Invalid`].
    pub fn verify_at(&self, text: &str, now: DateTime<Utc>) -> Result<VerificationReport, CoreError> {
        let received = parse_artifact(text)?;
        let signature = received
            .signature_bytes()?
            .ok_or(CoreError::MissingSignature)?;
        let canonical = received.payload.canonical_bytes()?;
        let fingerprint = Digest::of(&canonical);

        let matches = match &signature {
            SignatureBytes::Decoded(der) => self.signature_matches(&canonical, der),
            SignatureBytes::Malformed => false,
        };
        let outcome = if matches {
            expiry_outcome(&received.payload, now)
        } else {
            VerificationOutcome::Invalid
        };

        tracing::info!(fingerprint = %fingerprint, outcome = ?outcome, "artifact verified");
        Ok(VerificationReport {
            outcome,
            payload: received.payload,
            fingerprint,
        })
    }

    /// A signature that is valid base64 but not a DER ECDSA signature cannot
    /// match anything, so it is treated the same as a wrong signature.
    fn signature_matches(&self, canonical: &CanonicalBytes, signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_der(signature) else {
            tracing::debug!("signature is not DER encoded");
            return false;
        };
        self.key
            .verifying_key()
            .verify(canonical.as_bytes(), &signature)
            .is_ok()
    }
}

fn expiry_outcome(payload: &Payload, now: DateTime<Utc>) -> VerificationOutcome {
    match payload.expires_at() {
        None => VerificationOutcome::ValidNoExpiry,
        Some(expires_at) if now > expires_at.instant().with_timezone(&Utc) => {
            VerificationOutcome::ValidExpired {
                expires_at: expires_at.clone(),
            }
        }
        Some(expires_at) => VerificationOutcome::ValidActive {
            expires_at: expires_at.clone(),
        },
    }
}
