use qrseal_canonical::{CanonicalizationError, ParseError, ValidationError};
use thiserror::Error;

/// Core error types.
///
/// A signature that fails to check is not represented here; it is
/// [`VerificationOutcome::Invalid`](crate::VerificationOutcome::Invalid).
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected request input.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// Canonicalization error.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
    /// Key file missing, corrupt, or not a P-256 key.
    #[error("failed to load key {path}: {reason}")]
    KeyLoad {
        /// Where the key was read from.
        path: String,
        /// What went wrong.
        reason: String,
    },
    /// Key could not be encoded or written.
    #[error("failed to write key {path}: {reason}")]
    KeyWrite {
        /// Destination path.
        path: String,
        /// What went wrong.
        reason: String,
    },
    /// The signature primitive failed.
    #[error("signing failed: {0}")]
    Signing(String),
    /// Received text is structurally invalid.
    #[error("cannot verify: malformed data: {0}")]
    Parse(#[from] ParseError),
    /// Received artifact carries no signature.
    #[error("cannot verify: artifact has no signature field")]
    MissingSignature,
}
