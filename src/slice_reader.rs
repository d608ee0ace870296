//! A no_std compatible slice reader for reading bytes with position tracking.
//!
//! This module provides [`SliceReader`] which wraps a byte slice and provides
//! methods for reading primitive types, similar to `std::io::Cursor` but without
//! requiring the standard library. Pixlet headers are big-endian apart from the
//! version field, so the big-endian readers dominate here.

use byteorder_lite::{BigEndian, ByteOrder, LittleEndian};
use core::fmt;

use crate::DecodeError;

/// A reader that wraps a byte slice and tracks the current position.
#[derive(Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Create a new SliceReader wrapping the given byte slice.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining from the current position.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns a slice of the remaining bytes.
    #[inline]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Skip `n` bytes, failing if that would run past the end.
    #[inline]
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        if self.pos + n > self.data.len() {
            return Err(DecodeError::BitStreamError);
        }
        self.pos += n;
        Ok(())
    }

    /// Advance the position by `amt` bytes, clamping at the end of the slice.
    #[inline]
    pub fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.data.len());
    }

    /// Read a u32 in big-endian byte order.
    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        if self.pos + 4 > self.data.len() {
            return Err(DecodeError::BitStreamError);
        }
        let val = BigEndian::read_u32(&self.data[self.pos..]);
        self.pos += 4;
        Ok(val)
    }

    /// Read an i32 in big-endian byte order.
    #[inline]
    pub fn read_i32_be(&mut self) -> Result<i32, DecodeError> {
        self.read_u32_be().map(|v| v as i32)
    }

    /// Read an i16 in big-endian byte order.
    #[inline]
    pub fn read_i16_be(&mut self) -> Result<i16, DecodeError> {
        if self.pos + 2 > self.data.len() {
            return Err(DecodeError::BitStreamError);
        }
        let val = BigEndian::read_u16(&self.data[self.pos..]);
        self.pos += 2;
        Ok(val as i16)
    }

    /// Read a u32 in little-endian byte order (the header version field).
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        if self.pos + 4 > self.data.len() {
            return Err(DecodeError::BitStreamError);
        }
        let val = LittleEndian::read_u32(&self.data[self.pos..]);
        self.pos += 4;
        Ok(val)
    }
}

impl fmt::Debug for SliceReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceReader")
            .field("len", &self.data.len())
            .field("pos", &self.pos)
            .finish()
    }
}
