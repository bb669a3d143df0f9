//! Coarse fallback path for very large source files.
//!
//! A second safety net independent of the resize planner's dimension cap:
//! when the source file itself is huge (high-megapixel camera originals),
//! the image is shrunk to a tighter cap immediately after decode, bounding
//! peak memory and decode time no matter what dimensions the caller asked
//! for.

use tracing::info;

use crate::core::{EncodedImage, EncodeOptions};
use crate::utils::{CompressorResult, ImageFormat};

use super::backend::CodecBackend;
use super::pipeline;
use super::plan::plan_resize;

/// Source files above this byte size take the fallback path.
pub const LARGE_SOURCE_BYTES: u64 = 15 * 1024 * 1024;

/// Cap on the larger side under the fallback, tighter than the planner's
/// default.
const FALLBACK_MAX_DIMENSION: i32 = 4000;

/// `true` when `file_size` routes a single-encode request through
/// [`compress_large_source`] instead of the planner.
pub fn is_large_source(file_size: u64) -> bool {
    file_size > LARGE_SOURCE_BYTES
}

/// Compresses a very large source at the caller's quality, ignoring any
/// requested dimensions in favour of the coarse cap.
pub fn compress_large_source<B: CodecBackend>(
    backend: &B,
    path: &str,
    format: ImageFormat,
    quality: i32,
) -> CompressorResult<EncodedImage> {
    let image = backend.decode(path)?;
    let meta = backend.metadata(&image);
    drop(image);

    let plan = plan_resize(meta.width, meta.height, 0, 0, FALLBACK_MAX_DIMENSION);
    info!(
        "Large source '{}' ({}×{}): capping at {} px",
        path, meta.width, meta.height, FALLBACK_MAX_DIMENSION
    );

    pipeline::attempt(
        backend,
        path,
        &plan,
        format,
        quality,
        &EncodeOptions::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_large_source(LARGE_SOURCE_BYTES));
        assert!(is_large_source(LARGE_SOURCE_BYTES + 1));
        assert!(!is_large_source(0));
    }
}
