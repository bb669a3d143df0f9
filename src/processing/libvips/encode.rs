//! Per-format libvips buffer encoders.
//!
//! Each function maps the caller's 1-100 quality onto the encoder's native
//! knobs and strips metadata from the output. Everything encodes to an
//! in-memory buffer; callers decide what to do with the bytes.

use libvips::ops::{
    self, ForeignHeifCompression, ForeignKeep, ForeignSubsample, ForeignTiffCompression,
    ForeignTiffPredictor,
};
use libvips::VipsImage;

use crate::core::EncodeOptions;
use crate::utils::{CompressorError, CompressorResult, ImageFormat};

/// WebP encoding effort on the normal path. Low on purpose: this encoder
/// runs inside interactive request handling, not a batch optimizer.
const WEBP_EFFORT: i32 = 2;
/// WebP effort when the caller asked for the fast path.
const WEBP_EFFORT_FAST: i32 = 1;

/// Encodes `image` as `format` at `quality`, returning the compressed bytes.
pub fn encode_buffer(
    image: &VipsImage,
    format: ImageFormat,
    quality: i32,
    opts: &EncodeOptions,
) -> CompressorResult<Vec<u8>> {
    match format {
        ImageFormat::Jpeg => encode_jpeg(image, quality),
        ImageFormat::Png => encode_png(image, quality),
        ImageFormat::Webp => encode_webp(image, quality, opts.fast),
        ImageFormat::Tiff => encode_tiff(image, quality),
        ImageFormat::Heif => encode_heif(image, quality),
        ImageFormat::Jp2k => encode_jp2k(image, quality),
        ImageFormat::Jxl => encode_jxl(image, quality),
        ImageFormat::Gif => encode_gif(image),
    }
}

fn encode_jpeg(image: &VipsImage, quality: i32) -> CompressorResult<Vec<u8>> {
    let opts = ops::JpegsaveBufferOptions {
        q: quality,
        optimize_coding: true,
        subsample_mode: ForeignSubsample::On,
        keep: ForeignKeep::None,
        ..ops::JpegsaveBufferOptions::default()
    };

    ops::jpegsave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("JPEG encode failed: {e}")))
}

/// PNG has no quality knob; map quality onto the 0-9 zlib compression level
/// so higher quality means less aggressive (faster) compression.
pub fn png_compression_level(quality: i32) -> i32 {
    (9 - quality * 9 / 100).clamp(0, 9)
}

fn encode_png(image: &VipsImage, quality: i32) -> CompressorResult<Vec<u8>> {
    let opts = ops::PngsaveBufferOptions {
        compression: png_compression_level(quality),
        keep: ForeignKeep::None,
        ..ops::PngsaveBufferOptions::default()
    };

    ops::pngsave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("PNG encode failed: {e}")))
}

fn encode_webp(image: &VipsImage, quality: i32, fast: bool) -> CompressorResult<Vec<u8>> {
    let opts = ops::WebpsaveBufferOptions {
        q: quality,
        lossless: false,
        effort: if fast { WEBP_EFFORT_FAST } else { WEBP_EFFORT },
        keep: ForeignKeep::None,
        ..ops::WebpsaveBufferOptions::default()
    };

    ops::webpsave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("WebP encode failed: {e}")))
}

/// TIFF with in-container JPEG compression, so quality still applies.
fn encode_tiff(image: &VipsImage, quality: i32) -> CompressorResult<Vec<u8>> {
    let opts = ops::TiffsaveBufferOptions {
        compression: ForeignTiffCompression::Jpeg,
        predictor: ForeignTiffPredictor::Horizontal,
        q: quality,
        keep: ForeignKeep::None,
        ..ops::TiffsaveBufferOptions::default()
    };

    ops::tiffsave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("TIFF encode failed: {e}")))
}

fn encode_heif(image: &VipsImage, quality: i32) -> CompressorResult<Vec<u8>> {
    let opts = ops::HeifsaveBufferOptions {
        q: quality,
        lossless: false,
        compression: ForeignHeifCompression::Hevc,
        keep: ForeignKeep::None,
        ..ops::HeifsaveBufferOptions::default()
    };

    ops::heifsave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("HEIF encode failed: {e}")))
}

fn encode_jp2k(image: &VipsImage, quality: i32) -> CompressorResult<Vec<u8>> {
    let opts = ops::Jp2KsaveBufferOptions {
        q: quality,
        lossless: false,
        ..ops::Jp2KsaveBufferOptions::default()
    };

    ops::jp_2ksave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("JPEG 2000 encode failed: {e}")))
}

fn encode_jxl(image: &VipsImage, quality: i32) -> CompressorResult<Vec<u8>> {
    let opts = ops::JxlsaveBufferOptions {
        q: quality,
        lossless: false,
        keep: ForeignKeep::None,
        ..ops::JxlsaveBufferOptions::default()
    };

    ops::jxlsave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("JPEG XL encode failed: {e}")))
}

/// GIF ignores quality; the palette quantizer runs with its defaults.
fn encode_gif(image: &VipsImage) -> CompressorResult<Vec<u8>> {
    let opts = ops::GifsaveBufferOptions {
        keep: ForeignKeep::None,
        ..ops::GifsaveBufferOptions::default()
    };

    ops::gifsave_buffer_with_opts(image, &opts)
        .map_err(|e| CompressorError::encode(format!("GIF encode failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_level_spans_full_range() {
        assert_eq!(png_compression_level(100), 0);
        assert_eq!(png_compression_level(1), 9);
        assert_eq!(png_compression_level(50), 5);
    }

    #[test]
    fn png_level_never_leaves_zlib_bounds() {
        for q in 1..=100 {
            let level = png_compression_level(q);
            assert!((0..=9).contains(&level), "quality {q} gave level {level}");
        }
    }
}
