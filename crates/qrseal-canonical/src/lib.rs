//! Canonical payload primitives for signed QR artifacts.
//!
//! A signed artifact is a small JSON object whose fields are serialized in a
//! fixed order (`data`, `doc_id`, `created_by`, `timestamp`, `expires_at`,
//! then `signature`). The bytes that get signed are the same object without
//! `signature`, rendered as compact JSON with non-ASCII text left literal.
//! Every type that participates in signing or verification lives in this
//! crate, so the signer and the verifier cannot drift apart.
//!
#![deny(missing_docs)]

/// Transport form: payload plus detached signature, and parsing of received text.
pub mod artifact;
/// Payload construction from user input and stamping options.
pub mod builder;
/// Canonical byte serialization.
pub mod canonicalizer;
/// Payload fingerprints.
pub mod digest;
/// Fixed UTC offsets used for stamping.
pub mod offset;
/// The signable payload.
pub mod payload;
/// RFC 3339 timestamps kept verbatim.
pub mod timestamp;
/// Validation errors for payload inputs.
pub mod validation;

pub use artifact::{
    parse_artifact, ParseError, ReceivedArtifact, SignatureBytes, SignedArtifact, SIGNATURE_FIELD,
};
pub use builder::{build, build_at, BuildRequest, StampConfig};
pub use canonicalizer::{canonicalize, CanonicalBytes, CanonicalizationError};
pub use digest::{Digest, DigestAlg};
pub use offset::TimezoneOffset;
pub use payload::Payload;
pub use timestamp::Timestamp;
pub use validation::ValidationError;
