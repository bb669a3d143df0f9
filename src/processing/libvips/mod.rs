//! libvips codec backend.

mod backend;
mod encode;

pub use backend::VipsBackend;
pub(crate) use backend::probe_roundtrip;
