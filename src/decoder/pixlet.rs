//! The Pixlet frame decoder.
//!
//! Pixlet packets are self-contained intraframes: a fixed header, then three
//! plane payloads (Y at full resolution, U and V at half resolution in both
//! dimensions). Each plane payload carries per-level scaling factors, a DC
//! seed, the entropy-coded lowpass subband, and twelve entropy-coded detail
//! bands, reconstructed here by lowpass prediction and four levels of inverse
//! wavelet synthesis.

use alloc::vec;
use alloc::vec::Vec;

use super::api::{ColorRange, DecodeError, PictureType};
use super::bit_reader::BitReader;
use super::entropy;
use super::limits::Limits;
use super::subband::{plane_bands, SubBand, NB_BANDS, NB_LEVELS};
use super::wavelet::{lowpass_prediction, reconstruction};
use super::yuv;
use crate::slice_reader::SliceReader;

const H: usize = 0;
const V: usize = 1;

/// Marker word preceding every detail band's entropy stream.
const BAND_MAGIC: u32 = 0xDEAD_BEEF;

/// Header length in bytes; the declared packet size must exceed it.
const HEADER_SIZE: u32 = 44;

/// A decoded Pixlet frame: three 16-bit planes in YUV 4:2:0 layout.
///
/// The planes cover the coded (aligned) dimensions; [`width`](Self::width)
/// and [`height`](Self::height) give the display rectangle anchored at the
/// top-left corner.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Luma plane, full range, `y_width * y_height` samples.
    pub y: Vec<u16>,
    /// Chroma blue plane, `uv_width * uv_height` samples.
    pub u: Vec<u16>,
    /// Chroma red plane, `uv_width * uv_height` samples.
    pub v: Vec<u16>,
    /// Coded width of the luma plane (display width aligned up to 32).
    pub y_width: u32,
    /// Coded height of the luma plane (display height aligned up to 32).
    pub y_height: u32,
    /// Width of each chroma plane.
    pub uv_width: u32,
    /// Height of each chroma plane.
    pub uv_height: u32,
    /// Display width in pixels.
    pub width: u32,
    /// Display height in pixels.
    pub height: u32,
    /// Coded sample depth, 8 through 15.
    pub bit_depth: u8,
    /// Picture type; Pixlet frames are always intra-coded.
    pub picture_type: PictureType,
    /// Whether this frame is a keyframe; always true for Pixlet.
    pub keyframe: bool,
    /// Sample range of the planes; always full range.
    pub color_range: ColorRange,
}

/// Validated packet header fields.
#[derive(Debug)]
pub(crate) struct FrameHeader {
    pub width: u32,
    pub height: u32,
    pub aligned_width: usize,
    pub aligned_height: usize,
    pub depth: u32,
    pub version: u32,
}

/// Parse and validate the packet header, leaving the reader at the start of
/// the first plane payload.
pub(crate) fn parse_header(
    gb: &mut SliceReader<'_>,
    limits: &Limits,
) -> Result<FrameHeader, DecodeError> {
    let pktsize = gb.read_u32_be()?;
    if pktsize <= HEADER_SIZE || u64::from(pktsize) - 4 > gb.remaining() as u64 {
        return Err(DecodeError::InvalidPacketSize(pktsize));
    }

    // The version is the one little-endian field in the header.
    let version = gb.read_u32_le()?;
    if version != 1 {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    gb.skip(4)?;
    if gb.read_u32_be()? != 1 {
        return Err(DecodeError::HeaderSentinelInvalid);
    }
    gb.skip(4)?;

    let width = gb.read_u32_be()?;
    let height = gb.read_u32_be()?;
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions(width, height));
    }
    limits.check_dimensions(width, height)?;

    let levels = gb.read_u32_be()?;
    if levels as usize != NB_LEVELS {
        return Err(DecodeError::InvalidLevelCount(levels));
    }
    let depth = gb.read_u32_be()?;
    if !(8..=15).contains(&depth) {
        return Err(DecodeError::UnsupportedDepth(depth));
    }

    gb.skip(8)?;

    let align = 1u64 << (NB_LEVELS + 1);
    let aligned_width = usize::try_from((u64::from(width) + align - 1) & !(align - 1))
        .map_err(|_| DecodeError::ImageTooLarge)?;
    let aligned_height = usize::try_from((u64::from(height) + align - 1) & !(align - 1))
        .map_err(|_| DecodeError::ImageTooLarge)?;

    Ok(FrameHeader {
        width,
        height,
        aligned_width,
        aligned_height,
        depth,
        version,
    })
}

/// Reusable Pixlet frame decoder.
///
/// Owns the scratch buffers and subband tables, which are reallocated only
/// when the coded resolution changes between packets. A decoder is cheap to
/// create; cloning one yields a fresh instance with empty scratch (so clones
/// can decode concurrently without sharing state).
pub struct PixletDecoder {
    limits: Limits,
    /// Coded dimensions the scratch buffers are sized for; 0 until the first
    /// packet is decoded.
    w: usize,
    h: usize,
    scaling: [[[f32; NB_LEVELS]; 2]; 3],
    band: [[SubBand; NB_BANDS]; 3],
    col_cache: Vec<i16>,
    filter_scratch: Vec<i16>,
    prediction: Vec<i16>,
}

impl PixletDecoder {
    /// Create a decoder with default [`Limits`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create a decoder with the given [`Limits`].
    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            w: 0,
            h: 0,
            scaling: [[[0.0; NB_LEVELS]; 2]; 3],
            band: [[SubBand::default(); NB_BANDS]; 3],
            col_cache: Vec::new(),
            filter_scratch: Vec::new(),
            prediction: Vec::new(),
        }
    }

    /// Decode one packet into a [`Frame`].
    ///
    /// On error the packet is rejected wholesale and the decoder stays
    /// reusable for the next packet.
    pub fn decode_frame(&mut self, data: &[u8]) -> Result<Frame, DecodeError> {
        let mut gb = SliceReader::new(data);
        let header = parse_header(&mut gb, &self.limits)?;

        let w = header.aligned_width;
        let h = header.aligned_height;
        let luma_size = w.checked_mul(h).ok_or(DecodeError::ImageTooLarge)?;
        let chroma_size = (w / 2) * (h / 2);

        if self.w != w || self.h != h {
            self.release_buffers();
            self.init_planes(w, h);
            self.w = w;
            self.h = h;
        }

        let mut ybuf = vec![0i16; luma_size];
        let mut ubuf = vec![0i16; chroma_size];
        let mut vbuf = vec![0i16; chroma_size];

        self.decode_plane(&mut gb, 0, &mut ybuf, w)?;
        self.decode_plane(&mut gb, 1, &mut ubuf, w / 2)?;
        self.decode_plane(&mut gb, 2, &mut vbuf, w / 2)?;

        Ok(Frame {
            y: yuv::postprocess_luma(&ybuf, header.depth),
            u: yuv::postprocess_chroma(&ubuf, header.depth),
            v: yuv::postprocess_chroma(&vbuf, header.depth),
            y_width: w as u32,
            y_height: h as u32,
            uv_width: (w / 2) as u32,
            uv_height: (h / 2) as u32,
            width: header.width,
            height: header.height,
            bit_depth: header.depth as u8,
            picture_type: PictureType::Intra,
            keyframe: true,
            color_range: ColorRange::Full,
        })
    }

    fn release_buffers(&mut self) {
        self.col_cache = Vec::new();
        self.filter_scratch = Vec::new();
        self.prediction = Vec::new();
        self.w = 0;
        self.h = 0;
    }

    fn init_planes(&mut self, w: usize, h: usize) {
        for plane in 0..3 {
            let shift = usize::from(plane > 0);
            self.band[plane] = plane_bands(w >> shift, h >> shift);
        }
        self.col_cache = vec![0; h];
        self.filter_scratch = vec![0; w.max(h) + 16];
        self.prediction = vec![0; w >> NB_LEVELS];
    }

    fn decode_plane(
        &mut self,
        gb: &mut SliceReader<'_>,
        plane: usize,
        dst: &mut [i16],
        stride: usize,
    ) -> Result<(), DecodeError> {
        // Scaling factors, coarsest level first, horizontal then vertical.
        for level in (0..NB_LEVELS).rev() {
            let sh = gb.read_i32_be()?;
            let sv = gb.read_i32_be()?;
            if sh == 0 || sv == 0 {
                return Err(DecodeError::ZeroScaleFactor);
            }
            self.scaling[plane][H][level] = (1_000_000.0f64 / f64::from(sh)) as f32;
            self.scaling[plane][V][level] = (1_000_000.0f64 / f64::from(sv)) as f32;
        }
        gb.skip(4)?;

        // DC seed, then the three lowpass regions: top row, left column,
        // interior. Each region's entropy stream is byte-aligned.
        dst[0] = gb.read_i16_be()?;

        let low = self.band[plane][0];
        let (bw, bh) = (low.width, low.height);

        let consumed = entropy::read_low_coeffs(
            &mut BitReader::new(gb.remaining_slice()),
            &mut dst[1..],
            bw - 1,
            bw - 1,
            0,
        )?;
        gb.consume(consumed);

        let consumed = entropy::read_low_coeffs(
            &mut BitReader::new(gb.remaining_slice()),
            &mut dst[stride..],
            bh - 1,
            1,
            stride,
        )?;
        gb.consume(consumed);

        let consumed = entropy::read_low_coeffs(
            &mut BitReader::new(gb.remaining_slice()),
            &mut dst[stride + 1..],
            (bw - 1) * (bh - 1),
            bw - 1,
            stride,
        )?;
        gb.consume(consumed);

        if gb.remaining() == 0 {
            return Err(DecodeError::BitStreamError);
        }

        self.read_highpass(gb, plane, dst, stride)?;

        lowpass_prediction(dst, &mut self.prediction, bw, bh, stride);

        let shift = usize::from(plane > 0);
        reconstruction(
            dst,
            self.w >> shift,
            self.h >> shift,
            stride,
            &self.scaling[plane][H],
            &self.scaling[plane][V],
            &mut self.col_cache,
            &mut self.filter_scratch,
        );

        Ok(())
    }

    fn read_highpass(
        &mut self,
        gb: &mut SliceReader<'_>,
        plane: usize,
        dst: &mut [i16],
        stride: usize,
    ) -> Result<(), DecodeError> {
        for band_index in 0..NB_LEVELS * 3 {
            let a = gb.read_i32_be()?;
            let b = gb.read_i32_be()?;
            let c = gb.read_i32_be()?;
            let d = gb.read_i32_be()?;

            let magic = gb.read_u32_be()?;
            if magic != BAND_MAGIC {
                return Err(DecodeError::BandMagicInvalid {
                    plane,
                    band: band_index,
                    magic,
                });
            }

            let band = self.band[plane][band_index + 1];
            let scale = if b >= a.wrapping_abs() { b } else { a };
            if scale == 0 {
                return Err(DecodeError::InvalidBandParameters);
            }

            let offset = band.y * stride + band.x;
            let consumed = entropy::read_high_coeffs(
                &mut BitReader::new(gb.remaining_slice()),
                &mut dst[offset..],
                band.size,
                c,
                scale,
                d,
                band.width,
                stride,
            )?;
            gb.consume(consumed);
        }

        Ok(())
    }
}

impl Default for PixletDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PixletDecoder {
    /// Clones start with empty scratch buffers and allocate lazily on their
    /// first packet, so a clone never shares mutable state with its source.
    fn clone(&self) -> Self {
        Self::with_limits(self.limits.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_starts_fresh() {
        let mut decoder = PixletDecoder::new();
        decoder.w = 64;
        decoder.h = 64;
        decoder.col_cache = vec![1; 64];
        let clone = decoder.clone();
        assert_eq!(clone.w, 0);
        assert_eq!(clone.h, 0);
        assert!(clone.col_cache.is_empty());
        assert_eq!(clone.limits, decoder.limits);
    }

    #[test]
    fn header_too_short() {
        let mut packet = Vec::new();
        packet.extend_from_slice(&44u32.to_be_bytes());
        packet.resize(64, 0);
        let mut gb = SliceReader::new(&packet);
        let err = parse_header(&mut gb, &Limits::default()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPacketSize(44)));
    }

    #[test]
    fn header_size_exceeds_input() {
        let mut packet = Vec::new();
        packet.extend_from_slice(&1000u32.to_be_bytes());
        packet.resize(64, 0);
        let mut gb = SliceReader::new(&packet);
        let err = parse_header(&mut gb, &Limits::default()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPacketSize(1000)));
    }

    #[test]
    fn header_rejects_oversized_dimensions() {
        let mut packet = Vec::new();
        packet.extend_from_slice(&100u32.to_be_bytes());
        packet.extend_from_slice(&1u32.to_le_bytes());
        packet.extend_from_slice(&[0; 4]);
        packet.extend_from_slice(&1u32.to_be_bytes());
        packet.extend_from_slice(&[0; 4]);
        packet.extend_from_slice(&100_000u32.to_be_bytes());
        packet.extend_from_slice(&100_000u32.to_be_bytes());
        packet.extend_from_slice(&4u32.to_be_bytes());
        packet.extend_from_slice(&8u32.to_be_bytes());
        packet.extend_from_slice(&[0; 8]);
        packet.resize(200, 0);
        let mut gb = SliceReader::new(&packet);
        let err = parse_header(&mut gb, &Limits::default()).unwrap_err();
        assert!(matches!(err, DecodeError::LimitExceeded(_)));
        // Without limits the same header parses.
        let mut gb = SliceReader::new(&packet);
        let header = parse_header(&mut gb, &Limits::none()).unwrap();
        assert_eq!(header.aligned_width, 100_000);
        assert_eq!(header.aligned_width % 32, 0);
    }
}
