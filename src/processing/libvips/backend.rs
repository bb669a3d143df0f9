//! libvips-backed implementation of the codec seam.
//!
//! Constructed only by the engine lifecycle module, which guarantees the
//! libvips runtime is initialized and the process-wide lock is held for
//! the lifetime of every call here.

use libvips::ops::{self, Access, Interpretation, Kernel};
use libvips::VipsImage;
use tracing::debug;

use crate::core::EncodeOptions;
use crate::processing::backend::{CodecBackend, ResizeKernel, SourceMetadata};
use crate::utils::{CompressorError, CompressorResult, ImageFormat};

use super::encode::encode_buffer;

/// Codec operations routed through libvips.
pub struct VipsBackend {
    _private: (),
}

impl VipsBackend {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

impl CodecBackend for VipsBackend {
    type Image = VipsImage;

    fn decode(&self, path: &str) -> CompressorResult<VipsImage> {
        // Sequential access lets libvips stream scanlines instead of
        // materializing the full decoded image up front.
        VipsImage::new_from_file_access(path, Access::Sequential, false)
            .map_err(|e| CompressorError::load(format!("Failed to load '{path}': {e}")))
    }

    fn metadata(&self, image: &VipsImage) -> SourceMetadata {
        SourceMetadata {
            width: image.get_width(),
            height: image.get_height(),
            bands: image.get_bands(),
        }
    }

    fn resize(
        &self,
        image: VipsImage,
        scale: f64,
        kernel: ResizeKernel,
    ) -> CompressorResult<VipsImage> {
        let opts = ops::ResizeOptions {
            kernel: match kernel {
                ResizeKernel::Lanczos3 => Kernel::Lanczos3,
                ResizeKernel::Linear => Kernel::Linear,
            },
            ..ops::ResizeOptions::default()
        };

        ops::resize_with_opts(&image, scale, &opts)
            .map_err(|e| CompressorError::resize(format!("Resize by {scale:.4} failed: {e}")))
    }

    fn to_srgb(&self, image: VipsImage) -> CompressorResult<VipsImage> {
        ops::colourspace(&image, Interpretation::Srgb).map_err(|e| {
            CompressorError::color(format!("sRGB colourspace conversion failed: {e}"))
        })
    }

    fn encode(
        &self,
        image: &VipsImage,
        format: ImageFormat,
        quality: i32,
        opts: &EncodeOptions,
    ) -> CompressorResult<Vec<u8>> {
        encode_buffer(image, format, quality, opts)
    }
}

/// Encodes a tiny synthetic image to verify the codec stack end to end.
///
/// Exercises image creation and the JPEG encoder without touching the
/// filesystem; a healthy engine produces a non-empty buffer.
pub(crate) fn probe_roundtrip() -> CompressorResult<()> {
    let image = ops::black(1, 1)
        .map_err(|e| CompressorError::engine(format!("Probe image creation failed: {e}")))?;

    let bytes = encode_buffer(
        &image,
        ImageFormat::Jpeg,
        75,
        &EncodeOptions::default(),
    )?;

    if bytes.is_empty() {
        return Err(CompressorError::engine("Probe encode produced no bytes"));
    }

    debug!("Engine probe produced {} bytes", bytes.len());
    Ok(())
}
