pub mod error;
pub mod exif;
pub mod validation;
pub mod formats;

pub use error::{CompressorError, CompressorResult};
pub use self::exif::exif_orientation;
pub use formats::{ImageFormat, OutputFormat, resolve_format};
pub use validation::{validate_input_path, validate_quality, validate_request};
