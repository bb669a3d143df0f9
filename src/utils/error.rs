//! Error types for the compression engine.
//!
//! Every failure surfaced to a caller is one of the `CompressorError` kinds
//! below; a failure never carries a byte buffer. Uses `thiserror` for
//! ergonomic error handling and derives `Serialize` so errors can cross the
//! marshalling boundary unchanged.

use thiserror::Error;
use serde::Serialize;

/// Main error type for the compression engine.
///
/// Each variant maps to exactly one failure exit of the pipeline or one of
/// the strategy engines. Per-attempt failures inside the quality search and
/// format selection loops are recoverable and never reach the caller; only
/// the terminal kinds below do.
#[derive(Error, Debug, Serialize)]
pub enum CompressorError {
    /// Bad request before any codec work: empty/unreadable path,
    /// out-of-range quality, non-positive target size.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The codec engine could not be initialized.
    #[error("Engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The source file could not be decoded (missing, corrupt, or an
    /// unsupported source format).
    #[error("Load failed: {0}")]
    Load(String),

    /// The resize step failed.
    #[error("Resize failed: {0}")]
    Resize(String),

    /// Colour space normalisation failed.
    #[error("Colour conversion failed: {0}")]
    ColorConversion(String),

    /// The encoder rejected the image or the save itself failed.
    #[error("Encode failed: {0}")]
    Encode(String),

    /// No candidate format produced a successful encoding.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The quality sweep exhausted its sequence without landing inside the
    /// tolerance band.
    #[error("Target size unreachable: {0}")]
    TargetSizeUnreachable(String),
}

/// Convenience result type for engine operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

// Helper methods for error creation
impl CompressorError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn engine<T: Into<String>>(msg: T) -> Self {
        Self::EngineUnavailable(msg.into())
    }

    pub fn load<T: Into<String>>(msg: T) -> Self {
        Self::Load(msg.into())
    }

    pub fn resize<T: Into<String>>(msg: T) -> Self {
        Self::Resize(msg.into())
    }

    pub fn color<T: Into<String>>(msg: T) -> Self {
        Self::ColorConversion(msg.into())
    }

    pub fn encode<T: Into<String>>(msg: T) -> Self {
        Self::Encode(msg.into())
    }
}
