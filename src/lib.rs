//! Decoding of Apple Pixlet video frames
//!
//! Copyright (C) 2025 Imazen LLC
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU Affero General Public License as published
//! by the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! For commercial licensing inquiries: support@imazen.io
//!
//! This crate decodes single Pixlet intraframe packets into 16-bit
//! YUV 4:2:0 planes with full-range luma. Pixlet is a wavelet codec:
//! each plane is entropy-coded subband coefficients, reconstructed by a
//! four-level inverse biorthogonal wavelet synthesis and a gamma-style
//! postprocess.
//!
//! # Features
//!
//! - `std` (default): std error-trait integration. Everything else works
//!   without it.
//!
//! # no_std Support
//!
//! Decoding works in `no_std` environments (requires `alloc`):
//! ```toml
//! [dependencies]
//! zenpixlet = { version = "...", default-features = false }
//! ```
//!
//! # Decoding
//!
//! Use the convenience function for one-shot decoding:
//!
//! ```rust,no_run
//! let packet: &[u8] = &[]; // one Pixlet packet from your demuxer
//! let frame = zenpixlet::decode_yuv420(packet)?;
//! println!("{}x{}, depth {}", frame.width, frame.height, frame.bit_depth);
//! # Ok::<(), zenpixlet::DecodeError>(())
//! ```
//!
//! Or keep a [`PixletDecoder`] around to reuse its scratch buffers across
//! packets of the same resolution:
//!
//! ```rust,no_run
//! use zenpixlet::PixletDecoder;
//!
//! let packets: Vec<&[u8]> = vec![];
//! let mut decoder = PixletDecoder::new();
//! for packet in packets {
//!     let frame = decoder.decode_frame(packet)?;
//!     // frame.y / frame.u / frame.v are u16 planes
//! }
//! # Ok::<(), zenpixlet::DecodeError>(())
//! ```
//!
//! # Safety
//!
//! This crate uses `#![forbid(unsafe_code)]` and contains no unsafe code.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Core decoder modules
pub mod decoder;

// Slice reader utility (used by the decoder)
mod slice_reader;

// Re-export decoder public API
pub use decoder::{
    decode_yuv420, read_info, ColorRange, DecodeError, Frame, ImageInfo, Limits, PictureType,
    PixletDecoder,
};
