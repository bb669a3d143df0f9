//! Public compression surface and strategy routing.
//!
//! Every entry point validates its inputs before touching the engine, then
//! runs all codec work under the engine lock. Exactly one strategy handles
//! each request: a target size routes to the quality search, a `Smallest`
//! format routes to format selection, a very large source file takes the
//! coarse fallback, and everything else is a single pipeline attempt.

use tracing::{debug, info};

use crate::core::state::{ensure_ready, with_engine};
use crate::core::{
    CompressionRequest, EncodedImage, EncodeOptions, ImageInfo, SizeProfile,
};
use crate::utils::{
    exif_orientation, resolve_format, validate_input_path, validate_quality, validate_request,
    CompressorResult, ImageFormat, OutputFormat,
};

use super::backend::CodecBackend;
use super::libvips::probe_roundtrip;
use super::plan::{plan_resize, ResizePlan, MAX_DIMENSION};
use super::{fallback, format_select, pipeline, quality_search};

/// Dimension cap on the fast WebP path, looser than the default because the
/// cheap linear kernel makes large resizes affordable.
const FAST_WEBP_MAX_DIMENSION: i32 = 8000;

/// Compresses one image according to `request` and returns the encoded
/// bytes.
///
/// Validation failures reject the request without initializing the engine.
pub fn compress(request: &CompressionRequest) -> CompressorResult<EncodedImage> {
    let file_size = validate_request(request)?;
    let path = request.input_path.as_str();

    if let Some(target_kb) = request.target_kb {
        let profile = request.profile.unwrap_or(SizeProfile::Low);
        debug!("Routing '{}' to quality search ({} KB target)", path, target_kb);
        return with_engine(|backend| {
            quality_search::search_for_size(backend, path, target_kb, profile)
        });
    }

    if request.format == OutputFormat::Smallest {
        debug!("Routing '{}' to format selection", path);
        return with_engine(|backend| {
            let plan = plan_from_request(backend, path, request)?;
            format_select::select_smallest(backend, path, &plan, request.quality)
        });
    }

    let format = resolve_format(request.format, path);

    if fallback::is_large_source(file_size) {
        debug!("Routing '{}' to large-source fallback ({} bytes)", path, file_size);
        return with_engine(|backend| {
            fallback::compress_large_source(backend, path, format, request.quality)
        });
    }

    with_engine(|backend| {
        let plan = plan_from_request(backend, path, request)?;
        pipeline::attempt(
            backend,
            path,
            &plan,
            format,
            request.quality,
            &EncodeOptions::default(),
        )
    })
}

/// Single-shot WebP encode tuned for speed over compression density.
///
/// Uses the cheap resize kernel and the fastest WebP effort, capping the
/// larger side at 8000 px.
pub fn compress_fast_webp(path: &str, quality: i32) -> CompressorResult<EncodedImage> {
    validate_quality(quality)?;
    validate_input_path(path)?;

    with_engine(|backend| {
        let image = backend.decode(path)?;
        let meta = backend.metadata(&image);
        drop(image);

        let plan = plan_resize(meta.width, meta.height, 0, 0, FAST_WEBP_MAX_DIMENSION);
        pipeline::attempt(
            backend,
            path,
            &plan,
            ImageFormat::Webp,
            quality,
            &EncodeOptions { fast: true },
        )
    })
}

/// Source dimensions, band count, EXIF orientation, and the recommended
/// resize under the default dimension cap.
///
/// Read-only: nothing is encoded and nothing is cached, so repeated queries
/// on an unchanged file return identical results.
pub fn image_info(path: &str) -> CompressorResult<ImageInfo> {
    validate_input_path(path)?;

    // EXIF is plain file IO, so it is read before taking the engine lock.
    let orientation = exif_orientation(path);

    with_engine(|backend| {
        let image = backend.decode(path)?;
        let meta = backend.metadata(&image);
        drop(image);

        let plan = plan_resize(meta.width, meta.height, 0, 0, MAX_DIMENSION);

        Ok(ImageInfo {
            width: meta.width,
            height: meta.height,
            bands: meta.bands,
            orientation,
            needs_resize: plan.needs_resize,
            new_width: plan.width,
            new_height: plan.height,
        })
    })
}

/// Initializes the engine eagerly. Optional: every operation initializes
/// lazily on first use. Returns `false` when initialization failed.
pub fn initialize() -> bool {
    ensure_ready()
}

/// Shuts the engine down. Subsequent operations re-initialize it lazily.
pub fn shutdown() {
    crate::core::state::shutdown();
}

/// Verifies the codec stack end to end by encoding a tiny synthetic image.
pub fn self_test() -> bool {
    match with_engine(|_| probe_roundtrip()) {
        Ok(()) => {
            info!("Engine self test passed");
            true
        }
        Err(e) => {
            info!("Engine self test failed: {e}");
            false
        }
    }
}

/// Plan for the single-attempt and format-selection paths: decode once for
/// the source dimensions, then pure planner arithmetic.
fn plan_from_request<B: CodecBackend>(
    backend: &B,
    path: &str,
    request: &CompressionRequest,
) -> CompressorResult<ResizePlan> {
    let image = backend.decode(path)?;
    let meta = backend.metadata(&image);
    drop(image);

    let target_w = request.target_width.unwrap_or(0) as i32;
    let target_h = request.target_height.unwrap_or(0) as i32;
    Ok(plan_resize(meta.width, meta.height, target_w, target_h, MAX_DIMENSION))
}
