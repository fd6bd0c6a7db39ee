use image::imageops;
use image::{Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};

use crate::config::RenderConfig;
use crate::errors::RenderError;

/// Modules of quiet zone the renderer adds on each side.
const QUIET_ZONE_MODULES: u32 = 4;

/// Encodes `text` as a square level-H QR image of `config.clamped_size()` pixels.
///
/// Every module is the same whole number of pixels: the largest that fits.
/// The symbol is centered and the remainder is padded with the background
/// colour, so nothing is resampled.
///
/// # Errors
///
/// [`RenderError::Encoding`] when the text exceeds level-H capacity, or when
/// the symbol and its quiet zone need more than one pixel per module of the
/// target side.
pub fn encode(text: &str, config: &RenderConfig) -> Result<RgbaImage, RenderError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H).map_err(|err| {
        RenderError::Encoding {
            len: text.len(),
            reason: err.to_string(),
        }
    })?;

    let size = config.clamped_size();
    let modules = code.width() as u32 + 2 * QUIET_ZONE_MODULES;
    let module_px = size / modules;
    if module_px == 0 {
        return Err(RenderError::Encoding {
            len: text.len(),
            reason: format!("{modules} modules do not fit in {size}px; increase the image size"),
        });
    }

    let symbol = code
        .render::<Rgba<u8>>()
        .dark_color(config.foreground.to_rgba())
        .light_color(config.background.to_rgba())
        .quiet_zone(true)
        .module_dimensions(module_px, module_px)
        .build();

    tracing::debug!(
        version = ?code.version(),
        modules = code.width(),
        module_px,
        size,
        "encoded qr"
    );

    if symbol.width() == size && symbol.height() == size {
        return Ok(symbol);
    }
    let mut image = RgbaImage::from_pixel(size, size, config.background.to_rgba());
    let x = i64::from((size - symbol.width()) / 2);
    let y = i64::from((size - symbol.height()) / 2);
    imageops::replace(&mut image, &symbol, x, y);
    Ok(image)
}
