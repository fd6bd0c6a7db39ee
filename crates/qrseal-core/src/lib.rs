//! Signing and verification for signed QR artifacts.
//!
//! This crate provides:
//! - P-256 key material loaded from PEM (PKCS#8 or SEC1 private keys, SPKI public keys)
//! - Detached ECDSA/SHA-256 signatures over canonical payload bytes
//! - A single-pass verifier with four outcomes: invalid, or valid with no
//!   expiry, still active, or expired
//!
//! Core invariants:
//! - Only canonical bytes are ever signed or verified
//! - Canonical bytes are rebuilt from field presence, never from received order
//! - An invalid signature is an outcome, not an error
//! - Key bytes are never logged or serialized except to an explicit PEM file
//!
#![deny(missing_docs)]

/// Error types for signing and verification.
pub mod errors;
/// P-256 key material.
pub mod keys;
/// Signature production.
pub mod signer;
/// Verification outcomes and the verifier.
pub mod verifier;

pub use errors::CoreError;
pub use keys::{PrivateKey, PublicKey};
pub use signer::{seal, sign};
pub use verifier::{VerificationOutcome, VerificationReport, Verifier};
