use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{YearGridError, YearGridResult};

/// JPEG quality used for every encoded wallpaper.
pub const JPEG_QUALITY: u8 = 92;

/// Output container for rendered wallpapers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Parse a request `format` value; `None` or blank means JPEG.
    pub fn parse(s: Option<&str>) -> YearGridResult<Self> {
        let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::Jpeg);
        };
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(YearGridError::validation(format!(
                "unsupported output format '{other}' (expected jpg or png)"
            ))),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = YearGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(Some(s))
    }
}

/// Encode a straight-alpha image. JPEG drops alpha.
pub fn encode_image(
    img: &image::RgbaImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> YearGridResult<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            let enc = image::codecs::jpeg::JpegEncoder::new_with_quality(
                Cursor::new(&mut buf),
                jpeg_quality.clamp(1, 100),
            );
            rgb.write_with_encoder(enc).context("encode jpeg")?;
        }
        OutputFormat::Png => {
            let enc = image::codecs::png::PngEncoder::new_with_quality(
                Cursor::new(&mut buf),
                image::codecs::png::CompressionType::Best,
                image::codecs::png::FilterType::Adaptive,
            );
            img.write_with_encoder(enc).context("encode png")?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
