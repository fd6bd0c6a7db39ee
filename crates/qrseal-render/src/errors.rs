use qrseal_canonical::ValidationError;
use thiserror::Error;

/// Render error types.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The text does not fit in a level-H QR code.
    #[error("cannot encode {len} bytes as a level-H QR code: {reason}")]
    Encoding {
        /// Length of the text in bytes.
        len: usize,
        /// Encoder message.
        reason: String,
    },
    /// A logo was requested but could not be read or decoded.
    #[error("failed to load logo {path}: {reason}")]
    LogoLoad {
        /// Logo path.
        path: String,
        /// What went wrong.
        reason: String,
    },
    /// A logo mode was selected without a logo path.
    #[error("logo mode {mode} requires a logo path")]
    LogoMissing {
        /// The selected mode.
        mode: String,
    },
    /// The output path has no recognised image extension.
    #[error("unsupported image format for {path}: use .png, .jpg or .jpeg")]
    UnsupportedFormat {
        /// Output path.
        path: String,
    },
    /// The image could not be written.
    #[error("failed to save image {path}: {reason}")]
    Save {
        /// Output path.
        path: String,
        /// What went wrong.
        reason: String,
    },
    /// Rejected content or configuration input.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}
