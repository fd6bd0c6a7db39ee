use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

use crate::color::Color;
use crate::config::{LogoConfig, LogoMode};
use crate::errors::RenderError;

/// Safe zone side relative to the logo side.
pub const SAFE_ZONE_MARGIN: f64 = 1.2;

/// A centered square region of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Side length.
    pub size: u32,
}

impl Zone {
    fn centered(image_size: u32, size: u32) -> Self {
        let size = size.min(image_size);
        let offset = (image_size - size) / 2;
        Self {
            x: offset,
            y: offset,
            size,
        }
    }

    /// Whether the pixel at (`x`, `y`) lies inside the zone.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }
}

/// Where the logo and the cleared area go for a given image size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoLayout {
    /// Ratio actually used, after clamping.
    pub ratio: f32,
    /// Bounding box side for the resized logo.
    pub logo_size: u32,
    /// Area forced to the background colour (safe-zone mode only).
    pub safe_zone: Option<Zone>,
}

impl LogoLayout {
    /// Computes the layout for a square image of side `image_size`.
    pub fn compute(image_size: u32, logo: &LogoConfig) -> Self {
        let ratio = logo.clamped_ratio();
        let side = f64::from(image_size) * f64::from(ratio);
        let safe_zone = match logo.mode {
            LogoMode::SafeZone => Some(Zone::centered(image_size, (side * SAFE_ZONE_MARGIN) as u32)),
            LogoMode::None | LogoMode::Embedded => None,
        };
        Self {
            ratio,
            logo_size: side as u32,
            safe_zone,
        }
    }
}

/// Opens and decodes a logo image.
pub fn load_logo(path: &Path) -> Result<DynamicImage, RenderError> {
    image::open(path).map_err(|err| RenderError::LogoLoad {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Applies the logo described by `logo` to `qr`.
///
/// Mode `none` returns `qr` untouched, whatever `logo.path` says. Any other
/// mode needs a readable logo; a missing path or a bad file is an error.
pub fn overlay(qr: RgbaImage, logo: &LogoConfig, background: Color) -> Result<RgbaImage, RenderError> {
    if logo.mode == LogoMode::None {
        return Ok(qr);
    }
    let path = logo.path.as_deref().ok_or_else(|| RenderError::LogoMissing {
        mode: logo.mode.to_string(),
    })?;
    let image = load_logo(path)?;
    Ok(composite(qr, &image, logo, background))
}

/// Composites an already decoded logo image onto `qr`. `logo.path` is ignored.
pub fn composite(mut qr: RgbaImage, image: &DynamicImage, logo: &LogoConfig, background: Color) -> RgbaImage {
    if logo.mode == LogoMode::None {
        return qr;
    }
    let image_size = qr.width().min(qr.height());
    let layout = LogoLayout::compute(image_size, logo);

    if let Some(zone) = layout.safe_zone {
        let fill = background.to_rgba();
        for y in zone.y..zone.y + zone.size {
            for x in zone.x..zone.x + zone.size {
                qr.put_pixel(x, y, fill);
            }
        }
    }

    if layout.logo_size == 0 {
        tracing::warn!(image_size, "image too small for a logo");
        return qr;
    }

    let mut mark = image
        .resize(layout.logo_size, layout.logo_size, FilterType::Lanczos3)
        .to_rgba8();
    if logo.opacity < u8::MAX {
        let opacity = u16::from(logo.opacity);
        for pixel in mark.pixels_mut() {
            pixel[3] = (u16::from(pixel[3]) * opacity / 255) as u8;
        }
    }

    let x = (qr.width() - mark.width().min(qr.width())) / 2;
    let y = (qr.height() - mark.height().min(qr.height())) / 2;
    imageops::overlay(&mut qr, &mark, i64::from(x), i64::from(y));

    tracing::debug!(
        mode = %logo.mode,
        ratio = layout.ratio,
        logo_width = mark.width(),
        logo_height = mark.height(),
        safe_zone = layout.safe_zone.map(|z| z.size),
        "logo composited"
    );
    qr
}
