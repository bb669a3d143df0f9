//! Core types for compression requests and results.

use serde::{Deserialize, Serialize};
use crate::utils::{ImageFormat, OutputFormat};

/// One compression request from the caller.
///
/// Exactly one strategy handles each request: a target size routes to the
/// quality search, a `Smallest` format routes to format selection, and
/// everything else runs the single-attempt pipeline once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionRequest {
    /// Path to the source image file
    #[serde(rename = "inputPath")]
    pub input_path: String,
    /// Encoder quality (1-100)
    pub quality: i32,
    /// Target width in pixels; absent or 0 means unconstrained
    #[serde(rename = "targetWidth")]
    pub target_width: Option<u32>,
    /// Target height in pixels; absent or 0 means unconstrained
    #[serde(rename = "targetHeight")]
    pub target_height: Option<u32>,
    /// Target file size in kilobytes; routes to the quality search when set
    #[serde(rename = "targetKb")]
    pub target_kb: Option<u64>,
    /// Size profile for the quality search (ignored by other strategies)
    pub profile: Option<SizeProfile>,
    /// Requested output format
    pub format: OutputFormat,
}

impl CompressionRequest {
    /// Request with just a path and quality; everything else defaulted.
    pub fn new(input_path: impl Into<String>, quality: i32) -> Self {
        Self {
            input_path: input_path.into(),
            quality,
            target_width: None,
            target_height: None,
            target_kb: None,
            profile: None,
            format: OutputFormat::Auto,
        }
    }
}

/// Size profile for the quality search.
///
/// `High` starts the sweep at quality 93 and upscales 1.3x before each
/// encode; `Low` starts at 85 with no pre-resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeProfile {
    High,
    Low,
}

impl SizeProfile {
    pub fn start_quality(&self) -> i32 {
        match self {
            Self::High => 93,
            Self::Low => 85,
        }
    }

    /// Uniform upscale applied before each encode attempt, if any.
    pub fn pre_scale(&self) -> Option<f64> {
        match self {
            Self::High => Some(1.3),
            Self::Low => None,
        }
    }
}

/// Encode tuning shared by every attempt of one request.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Trade compression density for speed: linear resize kernel and the
    /// fastest WebP effort/method.
    pub fast: bool,
}

/// A successfully encoded image.
///
/// Owns its byte buffer; the strategy engines either hand it to the caller
/// or drop it, so at most one encoding is ever live inside a loop.
#[derive(Debug)]
pub struct EncodedImage {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// The concrete codec format these bytes are encoded in.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encoded size in whole kilobytes (truncating, matching the tolerance
    /// band arithmetic of the quality search).
    pub fn size_kb(&self) -> u64 {
        self.bytes.len() as u64 / 1024
    }

    /// Transfers buffer ownership to the caller.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Source image metadata plus the recommended resize under the default cap.
///
/// Derived fresh from source metadata on every query; nothing is encoded and
/// nothing is cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: i32,
    pub height: i32,
    pub bands: i32,
    /// EXIF orientation code (1 when absent)
    pub orientation: u32,
    #[serde(rename = "needsResize")]
    pub needs_resize: bool,
    #[serde(rename = "newWidth")]
    pub new_width: i32,
    #[serde(rename = "newHeight")]
    pub new_height: i32,
}
