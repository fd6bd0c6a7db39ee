//! QR rendering for signed artifacts.
//!
//! This crate provides:
//! - A QR encoder fixed at error-correction level H
//! - A logo compositor with three modes: none, embedded, and safe-zone
//! - PNG/JPEG persistence chosen by file extension
//! - Text builders for unsigned link, contact and event codes
//!
//! Core invariants:
//! - Error correction is never configurable
//! - Logo ratio is clamped to 0.05..=0.25 of the image side
//! - A requested logo that cannot be loaded is an error, never skipped
//!
#![deny(missing_docs)]

/// Colours parsed from `#RRGGBB`.
pub mod color;
/// Logo compositing.
pub mod compositor;
/// Render configuration.
pub mod config;
/// Text content for unsigned QR codes.
pub mod content;
/// QR encoding.
pub mod encoder;
/// Error types for rendering.
pub mod errors;
/// Image persistence.
pub mod output;

pub use color::Color;
pub use compositor::{composite, load_logo, overlay, LogoLayout, Zone};
pub use config::{LogoConfig, LogoMode, RenderConfig};
pub use content::{Contact, Content, Event};
pub use encoder::encode;
pub use errors::RenderError;
pub use output::{save, to_bytes, OutputFormat};

use image::RgbaImage;

/// Encodes `text` and applies the configured logo.
pub fn render(text: &str, config: &RenderConfig) -> Result<RgbaImage, RenderError> {
    let qr = encode(text, config)?;
    overlay(qr, &config.logo, config.background)
}
