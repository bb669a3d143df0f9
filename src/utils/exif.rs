//! EXIF orientation probe.
//!
//! Plain file IO with no codec involvement, so callers read the orientation
//! before taking the engine lock.

use std::fs::File;
use std::io::BufReader;

/// EXIF orientation code (1-8) for a source file, 1 when the file has no
/// usable EXIF.
pub fn exif_orientation(path: &str) -> u32 {
    read_orientation(path).unwrap_or(1)
}

fn read_orientation(path: &str) -> Option<u32> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .filter(|v| (1..=8).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_defaults_to_upright() {
        assert_eq!(exif_orientation("/nonexistent/photo.jpg"), 1);
    }

    #[test]
    fn non_exif_content_defaults_to_upright() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();

        assert_eq!(exif_orientation(path.to_str().unwrap()), 1);
    }
}
