//! Codec backend trait and shared types.
//!
//! The [`CodecBackend`] trait is the only seam through which the strategy
//! engines touch pixel data: decode, metadata, resize, colour space
//! normalisation, and encode-to-buffer.
//!
//! The production implementation is
//! [`VipsBackend`](super::libvips::VipsBackend), reachable only through the
//! engine lock (see [`crate::core::state`]). Tests drive the engines with a
//! recording mock instead.

use crate::core::EncodeOptions;
use crate::utils::{CompressorResult, ImageFormat};

/// Dimensions and band count of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    pub width: i32,
    pub height: i32,
    pub bands: i32,
}

/// Resampling kernel for the resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeKernel {
    /// High-quality kernel used by every standard attempt.
    Lanczos3,
    /// Cheap kernel for the speed-biased path.
    Linear,
}

/// Trait for image codec backends.
///
/// Every call must be assumed blocking. Implementations that wrap a
/// non-reentrant engine rely on the caller holding the process-wide engine
/// lock for the whole sequence of calls (the contract enforced by
/// `with_engine`).
pub trait CodecBackend {
    /// Decoded image handle. Dropping it releases the decode.
    type Image;

    /// Decode a source file (sequential access hint applied).
    fn decode(&self, path: &str) -> CompressorResult<Self::Image>;

    /// Width, height, and band count of a decoded image.
    fn metadata(&self, image: &Self::Image) -> SourceMetadata;

    /// Uniform resize by `scale`. Consumes the input so the intermediate is
    /// released whether or not the resize succeeds.
    fn resize(
        &self,
        image: Self::Image,
        scale: f64,
        kernel: ResizeKernel,
    ) -> CompressorResult<Self::Image>;

    /// Normalise to sRGB. Consumes the input like [`resize`](Self::resize).
    fn to_srgb(&self, image: Self::Image) -> CompressorResult<Self::Image>;

    /// Encode to an owned buffer with format-specific options derived from
    /// the 1-100 quality scale.
    fn encode(
        &self,
        image: &Self::Image,
        format: ImageFormat,
        quality: i32,
        opts: &EncodeOptions,
    ) -> CompressorResult<Vec<u8>>;
}
