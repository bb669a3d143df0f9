//! Output format enumeration and the extension-based format resolver.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::utils::CompressorError;

/// Concrete output codec formats supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
    Tiff,
    Heif,
    Jp2k,
    Jxl,
    Gif,
}

impl ImageFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Webp => &["webp"],
            Self::Tiff => &["tiff", "tif"],
            Self::Heif => &["heif", "heic"],
            Self::Jp2k => &["jp2", "j2k"],
            Self::Jxl => &["jxl"],
            Self::Gif => &["gif"],
        }
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &str {
        self.extensions()[0]
    }

    /// `true` for the palette/animated format that keeps its native colour
    /// handling (no sRGB normalisation before encode).
    pub fn preserves_native_color(&self) -> bool {
        matches!(self, Self::Gif)
    }
}

impl FromStr for ImageFormat {
    type Err = CompressorError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            "tiff" | "tif" => Ok(Self::Tiff),
            "heif" | "heic" => Ok(Self::Heif),
            "jp2" | "j2k" => Ok(Self::Jp2k),
            "jxl" => Ok(Self::Jxl),
            "gif" => Ok(Self::Gif),
            _ => Err(CompressorError::UnsupportedFormat(format!(
                "Unknown image format: {ext}"
            ))),
        }
    }
}

/// Format requested by the caller.
///
/// `Auto` resolves through the input file extension; `Smallest` routes the
/// request to the format-selection engine instead of a single encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Auto,
    Smallest,
    #[serde(untagged)]
    Exact(ImageFormat),
}

/// Maps a requested format and input path to a concrete codec format.
///
/// A concrete request passes through unchanged. `Auto` inspects the path's
/// extension (case-insensitive); unrecognized or missing extensions default
/// to JPEG. Never touches the codec engine and never fails; an unknown
/// extension is a defined default, not an error.
pub fn resolve_format(requested: OutputFormat, input_path: &str) -> ImageFormat {
    match requested {
        OutputFormat::Exact(format) => format,
        // `Smallest` is routed to the format-selection engine before
        // resolution; resolving it here falls back to the extension.
        OutputFormat::Auto | OutputFormat::Smallest => Path::new(input_path)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| ImageFormat::from_str(e).ok())
            .unwrap_or(ImageFormat::Jpeg),
    }
}
