use std::path::Path;

use anyhow::Context;

use crate::foundation::{core::FrameRGBA, error::YearGridResult};

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> YearGridResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Decode encoded image bytes into a premultiplied frame.
pub fn decode_frame(bytes: &[u8]) -> YearGridResult<FrameRGBA> {
    decode_image(bytes).map(FrameRGBA::from_rgba_image)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> YearGridResult<image::RgbaImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
