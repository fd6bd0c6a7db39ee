//! Command implementations.

pub mod canonicalize;
pub mod encode;
pub mod keygen;
pub mod sign;
pub mod verify;

use qrseal_render::{
    encode as encode_qr, overlay, save, LogoMode, OutputFormat, RenderConfig, RenderError,
};
use std::io::{self, Read};
use std::path::Path;

/// Reads a file, or stdin when no path is given.
pub fn read_input(input: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path.display(), e).into()),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Renders `text` with `config` and writes the image to `out`.
///
/// With `logo_fallback`, a logo that is missing or cannot be loaded is
/// reported on stderr and the plain QR is written instead.
pub fn write_qr(
    text: &str,
    config: &RenderConfig,
    logo_fallback: bool,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    OutputFormat::from_path(out)?;
    let qr = encode_qr(text, config)?;
    let plain = (logo_fallback && config.logo.mode != LogoMode::None).then(|| qr.clone());
    let image = match (overlay(qr, &config.logo, config.background), plain) {
        (Ok(image), _) => image,
        (Err(err @ (RenderError::LogoLoad { .. } | RenderError::LogoMissing { .. })), Some(plain)) => {
            tracing::warn!(error = %err, "logo skipped");
            eprintln!("Warning: {}; writing QR without logo", err);
            plain
        }
        (Err(err), _) => return Err(err.into()),
    };
    save(&image, out)?;
    eprintln!("QR image written to {}", out.display());
    Ok(())
}
