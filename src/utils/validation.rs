//! Request validation, run before any codec work.
//!
//! A request that fails here is rejected without ever initializing the
//! engine: a path that cannot be opened or an out-of-range quality is an
//! `InvalidInput`, never a codec failure.

use std::fs;
use std::path::Path;

use crate::core::CompressionRequest;
use crate::utils::{CompressorError, CompressorResult};

/// Validates the whole request and returns the source file's byte size
/// (needed later for the large-source routing decision).
pub fn validate_request(request: &CompressionRequest) -> CompressorResult<u64> {
    validate_quality(request.quality)?;

    if let Some(target_kb) = request.target_kb {
        if target_kb == 0 {
            return Err(CompressorError::invalid_input(
                "Target size must be greater than 0 KB",
            ));
        }
    }

    validate_input_path(&request.input_path)
}

/// Rejects qualities outside 1-100. Never clamps silently.
pub fn validate_quality(quality: i32) -> CompressorResult<()> {
    if !(1..=100).contains(&quality) {
        return Err(CompressorError::invalid_input(format!(
            "Invalid quality value: {quality}. Must be between 1 and 100"
        )));
    }
    Ok(())
}

/// Checks the input path is a readable file and returns its size in bytes.
pub fn validate_input_path(path: &str) -> CompressorResult<u64> {
    if path.is_empty() {
        return Err(CompressorError::invalid_input("Input path is empty"));
    }

    let path = Path::new(path);
    let meta = fs::metadata(path).map_err(|e| {
        CompressorError::invalid_input(format!("Cannot open file {}: {e}", path.display()))
    })?;

    if !meta.is_file() {
        return Err(CompressorError::invalid_input(format!(
            "Input path is not a file: {}",
            path.display()
        )));
    }

    Ok(meta.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn quality_bounds_are_inclusive() {
        assert!(validate_quality(1).is_ok());
        assert!(validate_quality(100).is_ok());
        assert!(validate_quality(0).is_err());
        assert!(validate_quality(101).is_err());
        assert!(validate_quality(-5).is_err());
    }

    #[test]
    fn empty_path_is_invalid_input() {
        let err = validate_input_path("").unwrap_err();
        assert!(matches!(err, CompressorError::InvalidInput(_)));
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let err = validate_input_path("/nonexistent/photo.jpg").unwrap_err();
        assert!(matches!(err, CompressorError::InvalidInput(_)));
    }

    #[test]
    fn directory_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_input_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CompressorError::InvalidInput(_)));
    }

    #[test]
    fn readable_file_reports_its_size() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("img.jpg");
        let mut file = std::fs::File::create(&file_path).unwrap();
        file.write_all(&[0u8; 64]).unwrap();

        let size = validate_input_path(file_path.to_str().unwrap()).unwrap();
        assert_eq!(size, 64);
    }

    #[test]
    fn zero_target_kb_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("img.jpg");
        std::fs::File::create(&file_path).unwrap();

        let mut request = CompressionRequest::new(file_path.to_str().unwrap(), 80);
        request.target_kb = Some(0);
        assert!(validate_request(&request).is_err());
    }
}
