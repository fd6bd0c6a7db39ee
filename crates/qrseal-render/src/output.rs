use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::errors::RenderError;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// PNG.
    Png,
    /// Baseline JPEG.
    Jpeg,
}

impl OutputFormat {
    /// Picks the format from the path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            _ => Err(RenderError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Writes `image` to `path` as PNG or JPEG, flattened to RGB.
pub fn save(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    let format = OutputFormat::from_path(path)?;
    flatten(image)
        .save_with_format(path, format.image_format())
        .map_err(|err| RenderError::Save {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
    tracing::debug!(path = %path.display(), ?format, "image saved");
    Ok(())
}

/// Encodes `image` in memory, flattened to RGB.
pub fn to_bytes(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(flatten(image))
        .write_to(&mut Cursor::new(&mut bytes), format.image_format())
        .map_err(|err| RenderError::Save {
            path: "<memory>".to_string(),
            reason: err.to_string(),
        })?;
    Ok(bytes)
}

fn flatten(image: &RgbaImage) -> image::RgbImage {
    DynamicImage::ImageRgba8(image.clone()).to_rgb8()
}
