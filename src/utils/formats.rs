use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use image::ImageFormat as CodecFormat;
use crate::utils::TaskError;

/// Quality used when a task leaves `quality` at 0.
pub const DEFAULT_QUALITY: u8 = 75;

/// Output formats a task may convert to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
}

impl ImageFormat {
    pub fn codec(&self) -> CodecFormat {
        match self {
            Self::Jpeg => CodecFormat::Jpeg,
            Self::Png => CodecFormat::Png,
            Self::WebP => CodecFormat::WebP,
        }
    }

    pub fn from_codec(codec: CodecFormat) -> Option<Self> {
        match codec {
            CodecFormat::Jpeg => Some(Self::Jpeg),
            CodecFormat::Png => Some(Self::Png),
            CodecFormat::WebP => Some(Self::WebP),
            _ => None,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = TaskError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        match ext.trim().to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            _ => Err(TaskError::unsupported_format(ext)),
        }
    }
}

/// Returns true when `path` carries one of the extensions the runner accepts
/// as input (`png`, `jpg`, `jpeg`, `webp`).
pub fn has_supported_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.parse::<ImageFormat>().is_ok())
        .unwrap_or(false)
}

/// Clamps a task quality hint into the encoder range, 0 meaning default.
pub fn effective_quality(requested: i32) -> u8 {
    match requested {
        q if q <= 0 => DEFAULT_QUALITY,
        q => q.min(100) as u8,
    }
}
