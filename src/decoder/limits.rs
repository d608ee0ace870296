//! Configurable limits for Pixlet decoding.
//!
//! Dimensions come from an untrusted 32-bit header field and directly size
//! the plane allocations, so they are checked against these limits before
//! any buffer is allocated.

use super::api::DecodeError;

/// Configuration for decode limits.
///
/// All limits are optional; `None` means unlimited.
///
/// # Example
///
/// ```rust
/// use zenpixlet::Limits;
///
/// // Start with defaults and customize
/// let limits = Limits::default().max_dimensions(4096, 4096);
///
/// // Or start with no limits for trusted inputs
/// let unlimited = Limits::none();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Limits {
    /// Maximum image width in pixels.
    pub max_width: Option<u32>,

    /// Maximum image height in pixels.
    pub max_height: Option<u32>,

    /// Maximum total pixels (width * height).
    /// Useful for limiting memory even with odd aspect ratios.
    pub max_total_pixels: Option<u64>,
}

impl Default for Limits {
    /// Default limits suitable for server-side use.
    ///
    /// - Max dimensions: 16384 x 16384
    /// - Max total pixels: 100 megapixels
    fn default() -> Self {
        Self {
            max_width: Some(16384),
            max_height: Some(16384),
            max_total_pixels: Some(100_000_000),
        }
    }
}

impl Limits {
    /// Create limits with no restrictions.
    ///
    /// **Warning**: Only use this for trusted inputs!
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_width: None,
            max_height: None,
            max_total_pixels: None,
        }
    }

    /// Set maximum dimensions.
    #[must_use]
    pub fn max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    /// Set maximum total pixels.
    #[must_use]
    pub fn max_total_pixels(mut self, pixels: u64) -> Self {
        self.max_total_pixels = Some(pixels);
        self
    }

    /// Check if dimensions are within limits.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), DecodeError> {
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(DecodeError::LimitExceeded(alloc::format!(
                    "width {} exceeds limit {}",
                    width,
                    max_w
                )));
            }
        }

        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(DecodeError::LimitExceeded(alloc::format!(
                    "height {} exceeds limit {}",
                    height,
                    max_h
                )));
            }
        }

        if let Some(max_pixels) = self.max_total_pixels {
            let total_pixels = u64::from(width) * u64::from(height);
            if total_pixels > max_pixels {
                return Err(DecodeError::LimitExceeded(alloc::format!(
                    "total pixels {} exceeds limit {}",
                    total_pixels,
                    max_pixels
                )));
            }
        }

        Ok(())
    }
}
