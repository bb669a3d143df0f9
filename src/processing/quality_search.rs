//! Quality search: a bounded linear sweep over encoder quality that lands
//! an encoding inside a tolerance band around a byte budget.

use tracing::{debug, info, warn};

use crate::core::{EncodedImage, EncodeOptions, SizeProfile};
use crate::utils::{CompressorError, CompressorResult, ImageFormat};

use super::backend::CodecBackend;
use super::pipeline;
use super::plan::ResizePlan;

/// Lowest quality the sweep will try, inclusive.
const MIN_QUALITY: i32 = 40;
/// Decrement between attempts.
const QUALITY_STEP: i32 = 3;
/// Acceptance window around the target, as fractions of it.
const TOLERANCE_UP: f64 = 1.2;
const TOLERANCE_DOWN: f64 = 0.8;

/// Sweeps quality downward until the encoded size falls inside
/// `[0.8 × target_kb, 1.2 × target_kb]`.
///
/// This is deliberately a monotonic linear search, not a binary one: it
/// biases toward higher quality and accepts the first in-range hit, trading
/// optimality for a bounded attempt count. The format is fixed at JPEG.
/// Attempts that fail are skipped; an exhausted sweep is
/// `TargetSizeUnreachable`.
pub fn search_for_size<B: CodecBackend>(
    backend: &B,
    path: &str,
    target_kb: u64,
    profile: SizeProfile,
) -> CompressorResult<EncodedImage> {
    let up_kb = (target_kb as f64 * TOLERANCE_UP) as u64;
    let down_kb = (target_kb as f64 * TOLERANCE_DOWN) as u64;
    let start_quality = profile.start_quality();

    info!(
        "Quality search on '{}': target {}-{} KB, quality {} down to {} (step {})",
        path, down_kb, up_kb, start_quality, MIN_QUALITY, QUALITY_STEP
    );

    let opts = EncodeOptions::default();
    // The plan does not depend on quality, so it is computed once for the
    // whole sweep. An unreadable source fails the search outright; no
    // quality step could recover from that.
    let plan = plan_for_profile(backend, path, profile)?;
    let mut quality = start_quality;

    while quality >= MIN_QUALITY {
        match pipeline::attempt(backend, path, &plan, ImageFormat::Jpeg, quality, &opts) {
            Ok(encoded) => {
                let size_kb = encoded.size_kb();
                if size_kb >= down_kb && size_kb <= up_kb {
                    info!("Quality {} landed at {} KB, accepting", quality, size_kb);
                    return Ok(encoded);
                }
                // Outside the band: drop this buffer and keep sweeping.
                debug!(
                    "Quality {}: {} KB outside {}-{} KB",
                    quality, size_kb, down_kb, up_kb
                );
            }
            Err(e) => {
                warn!("Attempt failed at quality {}: {}", quality, e);
            }
        }

        quality -= QUALITY_STEP;
    }

    Err(CompressorError::TargetSizeUnreachable(format!(
        "no quality between {start_quality} and {MIN_QUALITY} produced {down_kb}-{up_kb} KB"
    )))
}

/// Resize plan shared by every attempt of one sweep.
///
/// The high profile upscales 1.3x before encoding; the low profile encodes
/// the source as-is.
fn plan_for_profile<B: CodecBackend>(
    backend: &B,
    path: &str,
    profile: SizeProfile,
) -> CompressorResult<ResizePlan> {
    match profile.pre_scale() {
        None => Ok(ResizePlan::identity(0, 0)),
        Some(scale) => {
            let image = backend.decode(path)?;
            let meta = backend.metadata(&image);
            Ok(ResizePlan::uniform(meta.width, meta.height, scale))
        }
    }
}

/// The quality values one sweep will visit, highest first.
pub fn quality_sequence(profile: SizeProfile) -> impl Iterator<Item = i32> {
    let start = profile.start_quality();
    (0..)
        .map(move |i| start - i * QUALITY_STEP)
        .take_while(|q| *q >= MIN_QUALITY)
}
