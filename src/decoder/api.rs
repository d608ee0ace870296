use alloc::string::String;
use thiserror::Error;

use super::limits::Limits;
use super::pixlet::{self, Frame, PixletDecoder};
use crate::slice_reader::SliceReader;

/// Errors that can occur when attempting to decode a Pixlet frame
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The declared packet size is too small or larger than the input
    #[error("Invalid packet size {0}")]
    InvalidPacketSize(u32),

    /// The file may be valid, but only bitstream version 1 is specified
    #[error("Unsupported bitstream version {0}")]
    UnsupportedVersion(u32),

    /// The constant-1 header word was missing
    #[error("Header sentinel missing")]
    HeaderSentinelInvalid,

    /// Width or height of zero
    #[error("Invalid dimensions {0}x{1}")]
    InvalidDimensions(u32, u32),

    /// The level count must be exactly 4
    #[error("Invalid wavelet level count {0}")]
    InvalidLevelCount(u32),

    /// Only depths 8 through 15 are specified
    #[error("Unsupported bit depth {0}")]
    UnsupportedDepth(u32),

    /// A detail band's `0xDEADBEEF` marker was wrong
    #[error("Wrong magic 0x{magic:08X} for plane {plane}, band {band}")]
    BandMagicInvalid {
        /// Plane index (0 = Y, 1 = U, 2 = V).
        plane: usize,
        /// Detail band index within the plane (0..12).
        band: usize,
        /// The value found in place of the marker.
        magic: u32,
    },

    /// A wavelet scaling factor of zero was transmitted
    #[error("Zero scaling factor")]
    ZeroScaleFactor,

    /// Detail band parameters produce an unusable prefix width
    #[error("Invalid band parameters")]
    InvalidBandParameters,

    /// A zero run would overflow its subband or the 16-bit run cap
    #[error("Coefficient run exceeds subband")]
    RunTooLong,

    /// The bitstream was somehow corrupt
    #[error("Corrupt bitstream")]
    BitStreamError,

    /// Image is too large, either for the platform's pointer size or generally
    #[error("Image too large")]
    ImageTooLarge,

    /// A configured decode limit was exceeded
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),
}

/// Picture type of a decoded frame.
///
/// Pixlet is an intraframe codec; every packet is a self-contained keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureType {
    /// Intra-coded frame (the only Pixlet picture type).
    Intra,
}

/// Sample range of the decoded planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRange {
    /// Full range (JPEG-style levels).
    Full,
}

/// Frame information parsed from a packet header, without decoding pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// Coded luma plane width (display width aligned up to a multiple of 32).
    pub aligned_width: u32,
    /// Coded luma plane height (display height aligned up to a multiple of 32).
    pub aligned_height: u32,
    /// Sample bit depth, 8 through 15.
    pub bit_depth: u8,
    /// Bitstream version.
    pub version: u32,
}

/// Read frame info from a packet without decoding pixel data.
///
/// Parses and validates the header only. No limits are applied; the caller
/// sees the dimensions the packet declares.
pub fn read_info(data: &[u8]) -> Result<ImageInfo, DecodeError> {
    let mut gb = SliceReader::new(data);
    let header = pixlet::parse_header(&mut gb, &Limits::none())?;
    let aligned_width =
        u32::try_from(header.aligned_width).map_err(|_| DecodeError::ImageTooLarge)?;
    let aligned_height =
        u32::try_from(header.aligned_height).map_err(|_| DecodeError::ImageTooLarge)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        aligned_width,
        aligned_height,
        bit_depth: header.depth as u8,
        version: header.version,
    })
}

/// Decode one Pixlet packet to 16-bit YUV 4:2:0 planes.
///
/// Convenience wrapper that builds a throwaway [`PixletDecoder`]. When
/// decoding a sequence of frames, keep a decoder around instead so its
/// scratch buffers are reused across packets of the same resolution.
pub fn decode_yuv420(data: &[u8]) -> Result<Frame, DecodeError> {
    PixletDecoder::new().decode_frame(data)
}
