//! Single-attempt pipeline: decode → resize → normalise → encode.
//!
//! The only place that drives the codec backend directly. Every strategy
//! engine (single request, quality search, format selection) funnels each of
//! its attempts through [`attempt`], so resource handling exists exactly
//! once: intermediate images are consumed stage by stage and dropped on
//! every exit path, success or failure.

use tracing::debug;

use crate::core::{EncodedImage, EncodeOptions};
use crate::utils::{CompressorResult, ImageFormat};

use super::backend::{CodecBackend, ResizeKernel};
use super::plan::ResizePlan;

/// Runs one decode → resize → normalise → encode sequence for a fixed
/// format and quality.
///
/// Failure exits map one-to-one onto the error taxonomy: `Load`, `Resize`,
/// `ColorConversion`, `Encode`. A failed encoder is not retried here with
/// different options; retries belong to the calling engine. Quality is
/// validated before any engine work, so out-of-range values never reach
/// this function through the public surface.
pub fn attempt<B: CodecBackend>(
    backend: &B,
    path: &str,
    plan: &ResizePlan,
    format: ImageFormat,
    quality: i32,
    opts: &EncodeOptions,
) -> CompressorResult<EncodedImage> {
    let image = backend.decode(path)?;

    let meta = backend.metadata(&image);
    debug!(
        "Loaded '{}': {}×{}, {} bands",
        path, meta.width, meta.height, meta.bands
    );

    // Resize consumes the decoded image either way, so nothing lingers when
    // it fails.
    let image = if plan.needs_resize {
        let kernel = if opts.fast {
            ResizeKernel::Linear
        } else {
            ResizeKernel::Lanczos3
        };
        debug!("Resizing by {:.4} to {}×{}", plan.scale, plan.width, plan.height);
        backend.resize(image, plan.scale, kernel)?
    } else {
        image
    };

    // The palette/animated format keeps its native colour handling.
    let image = if format.preserves_native_color() {
        image
    } else {
        backend.to_srgb(image)?
    };

    let bytes = backend.encode(&image, format, quality, opts)?;
    debug!(
        "Encoded {:?} at quality {}: {} bytes",
        format,
        quality,
        bytes.len()
    );

    Ok(EncodedImage::new(format, bytes))
}
