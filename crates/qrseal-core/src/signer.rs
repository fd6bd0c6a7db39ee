use p256::ecdsa::signature::Signer;
use p256::ecdsa::Signature;
use qrseal_canonical::{CanonicalBytes, Digest, Payload, SignedArtifact};

use crate::errors::CoreError;
use crate::keys::PrivateKey;

/// Produces a detached ECDSA P-256/SHA-256 signature, ASN.1 DER encoded.
///
/// Nonces are derived deterministically (RFC 6979), so the same key and
/// bytes always yield the same signature.
pub fn sign(key: &PrivateKey, bytes: &CanonicalBytes) -> Result<Vec<u8>, CoreError> {
    let signature: Signature = key
        .signing_key()
        .try_sign(bytes.as_bytes())
        .map_err(|err| CoreError::Signing(err.to_string()))?;
    Ok(signature.to_der().as_bytes().to_vec())
}

/// Canonicalizes and signs a payload, producing the transport artifact.
pub fn seal(payload: Payload, key: &PrivateKey) -> Result<SignedArtifact, CoreError> {
    let canonical = payload.canonical_bytes()?;
    let signature = sign(key, &canonical)?;
    tracing::debug!(
        fingerprint = %Digest::of(&canonical),
        canonical_len = canonical.len(),
        "payload signed"
    );
    Ok(SignedArtifact::new(payload, &signature))
}
