//! Encode command implementation.

use crate::args::EncodeKind;
use crate::config::Config;

use super::write_qr;

pub fn run(kind: EncodeKind, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (content, image) = kind.into_parts();
    let text = content.to_text()?;
    let render = image.render.apply(&config.render);
    write_qr(&text, &render, image.render.logo_fallback, &image.out)
}
