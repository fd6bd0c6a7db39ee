use qrseal_canonical::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::color::Color;

/// Smallest rendered side, in pixels.
pub const MIN_QR_SIZE: u32 = 100;
/// Largest rendered side, in pixels.
pub const MAX_QR_SIZE: u32 = 1500;
/// Default rendered side, in pixels.
pub const DEFAULT_QR_SIZE: u32 = 500;

/// Smallest logo side as a fraction of the image side.
pub const MIN_LOGO_RATIO: f32 = 0.05;
/// Largest logo side as a fraction of the image side.
pub const MAX_LOGO_RATIO: f32 = 0.25;
/// Default logo side as a fraction of the image side.
pub const DEFAULT_LOGO_RATIO: f32 = 0.2;

/// How a logo is placed over the QR code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoMode {
    /// No logo.
    #[default]
    None,
    /// Logo blended directly over the modules at the center.
    Embedded,
    /// Center cleared to the background colour, then the logo drawn on top.
    SafeZone,
}

impl LogoMode {
    /// Name as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoMode::None => "none",
            LogoMode::Embedded => "embedded",
            LogoMode::SafeZone => "safe-zone",
        }
    }
}

impl fmt::Display for LogoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogoMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(LogoMode::None),
            "embedded" => Ok(LogoMode::Embedded),
            "safe-zone" | "safe_zone" | "safezone" => Ok(LogoMode::SafeZone),
            _ => Err(ValidationError::PatternMismatch {
                field: "logo_mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Logo options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    /// Placement mode.
    pub mode: LogoMode,
    /// Logo image file. Required unless `mode` is `none`.
    pub path: Option<PathBuf>,
    /// Multiplier applied to the logo's alpha channel; 255 keeps it unchanged.
    pub opacity: u8,
    /// Logo side as a fraction of the image side, before clamping.
    pub ratio: f32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            mode: LogoMode::None,
            path: None,
            opacity: u8::MAX,
            ratio: DEFAULT_LOGO_RATIO,
        }
    }
}

impl LogoConfig {
    /// `ratio` clamped to [`MIN_LOGO_RATIO`]..=[`MAX_LOGO_RATIO`].
    ///
    /// Outside that range a logo is either invisible or covers more modules
    /// than level-H correction can recover.
    pub fn clamped_ratio(&self) -> f32 {
        if !self.ratio.is_finite() {
            tracing::warn!(requested = self.ratio, used = DEFAULT_LOGO_RATIO, "logo ratio is not a number");
            return DEFAULT_LOGO_RATIO;
        }
        let clamped = self.ratio.clamp(MIN_LOGO_RATIO, MAX_LOGO_RATIO);
        if clamped != self.ratio {
            tracing::warn!(requested = self.ratio, used = clamped, "logo ratio clamped");
        }
        clamped
    }
}

/// Options for turning text into a QR image.
///
/// Error correction is not an option: it is always level H.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Side of the output image in pixels, before clamping.
    pub qr_size: u32,
    /// Module colour.
    pub foreground: Color,
    /// Background and quiet-zone colour.
    pub background: Color,
    /// Logo options.
    pub logo: LogoConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            qr_size: DEFAULT_QR_SIZE,
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: LogoConfig::default(),
        }
    }
}

impl RenderConfig {
    /// `qr_size` clamped to [`MIN_QR_SIZE`]..=[`MAX_QR_SIZE`].
    pub fn clamped_size(&self) -> u32 {
        let clamped = self.qr_size.clamp(MIN_QR_SIZE, MAX_QR_SIZE);
        if clamped != self.qr_size {
            tracing::warn!(requested = self.qr_size, used = clamped, "qr size clamped");
        }
        clamped
    }
}
