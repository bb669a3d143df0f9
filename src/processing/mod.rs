pub mod backend;
pub mod compressor;
pub mod fallback;
pub mod format_select;
pub mod libvips;
pub mod pipeline;
pub mod plan;
pub mod quality_search;

pub use compressor::{compress, compress_fast_webp, image_info, initialize, self_test, shutdown};
