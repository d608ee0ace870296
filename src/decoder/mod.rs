//! Pixlet decoder implementation

mod api;
mod bit_reader;
mod entropy;
mod limits;
mod pixlet;
mod subband;
mod wavelet;
pub(crate) mod yuv;

// Re-export public API
pub use api::{decode_yuv420, read_info, ColorRange, DecodeError, ImageInfo, PictureType};
pub use limits::Limits;
pub use pixlet::{Frame, PixletDecoder};
