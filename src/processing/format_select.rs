//! Format selection: try each candidate codec and keep the smallest
//! successful encoding.

use tracing::{debug, info, warn};

use crate::core::{EncodedImage, EncodeOptions};
use crate::utils::{CompressorError, CompressorResult, ImageFormat};

use super::backend::CodecBackend;
use super::pipeline;
use super::plan::ResizePlan;

/// Candidate formats in order of typical size efficiency for photographic
/// content: lossy photographic codecs first, lossless last, GIF last of all.
const CANDIDATES: [ImageFormat; 8] = [
    ImageFormat::Webp,
    ImageFormat::Jpeg,
    ImageFormat::Jxl,
    ImageFormat::Heif,
    ImageFormat::Jp2k,
    ImageFormat::Tiff,
    ImageFormat::Png,
    ImageFormat::Gif,
];

/// Minimum band count before GIF is worth attempting.
const GIF_MIN_BANDS: i32 = 3;

/// Encodes with every candidate format at one quality and returns the
/// smallest result.
///
/// Failed candidates are skipped, not fatal. A losing buffer is dropped the
/// moment the comparison decides against it, so at most one encoding is
/// live at any point in the loop. When every candidate fails the operation
/// is `UnsupportedFormat`.
pub fn select_smallest<B: CodecBackend>(
    backend: &B,
    path: &str,
    plan: &ResizePlan,
    quality: i32,
) -> CompressorResult<EncodedImage> {
    // One metadata probe up front decides whether GIF is plausible for this
    // source; re-deciding per candidate would re-decode for nothing.
    let source_bands = match backend.decode(path) {
        Ok(image) => backend.metadata(&image).bands,
        Err(e) => return Err(e),
    };

    let opts = EncodeOptions::default();
    let mut best: Option<EncodedImage> = None;

    for format in CANDIDATES {
        if format == ImageFormat::Gif && source_bands < GIF_MIN_BANDS {
            debug!("Skipping GIF: source has {} bands", source_bands);
            continue;
        }

        match pipeline::attempt(backend, path, plan, format, quality, &opts) {
            Ok(encoded) => {
                let adopt = best.as_ref().map_or(true, |b| encoded.len() < b.len());
                if adopt {
                    debug!("New best: {:?} at {} bytes", format, encoded.len());
                    // Replacing `best` drops the previous winner's buffer;
                    // losing `encoded` is dropped by falling out of scope.
                    best = Some(encoded);
                }
            }
            Err(e) => {
                warn!("Candidate {:?} failed: {}", format, e);
            }
        }
    }

    match best {
        Some(encoded) => {
            info!(
                "Smallest encoding for '{}': {:?}, {} bytes",
                path,
                encoded.format(),
                encoded.len()
            );
            Ok(encoded)
        }
        None => Err(CompressorError::UnsupportedFormat(format!(
            "no candidate format produced an encoding for '{path}'"
        ))),
    }
}

/// Candidate order, exposed for tests asserting the sweep sequence.
pub fn candidate_formats() -> &'static [ImageFormat] {
    &CANDIDATES
}
