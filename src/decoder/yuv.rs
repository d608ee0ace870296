//! Postprocess from the reconstructed signed samples to 16-bit output planes.
//!
//! Luma gets a square-law gamma expansion from the coded depth to full-range
//! 16-bit. Chroma is re-centered by half the coded range and shifted up to 16
//! bits; the shift wraps like the reference's unsigned narrowing, so any
//! input produces a valid sample without trapping.

use alloc::vec::Vec;

/// Expand a luma plane: `((max(y, 0) / (2^depth - 1))^2 * 65535`.
pub(crate) fn postprocess_luma(src: &[i16], depth: u32) -> Vec<u16> {
    let factor = (1.0f64 / f64::from((1i32 << depth) - 1)) as f32;
    src.iter()
        .map(|&y| {
            let v = f32::from(y.max(0)) * factor;
            (v * v * 65535.0) as u16
        })
        .collect()
}

/// Re-center a chroma plane: `(c + 2^(depth-1)) << (16 - depth)`.
pub(crate) fn postprocess_chroma(src: &[i16], depth: u32) -> Vec<u16> {
    let add = 1i32 << (depth - 1);
    let shift = 16 - depth;
    src.iter()
        .map(|&c| ((add + i32::from(c)) << shift) as u16)
        .collect()
}
