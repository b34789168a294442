//! The image buffer the whole pipeline operates on.
//!
//! Unlike the generic, colorspace-typed image container this crate grew
//! out of, the press pipeline only ever handles one concrete shape: 8-bit
//! RGBA, gamma-space, no colorimetric tagging. [`Raster`] reflects that:
//! it is a fixed, non-generic buffer, still Arc-backed for cheap clone
//! and copy-on-write mutation.

use crate::{Error, Result};
use std::sync::Arc;

/// An owned W×H RGBA image, 8 bits per channel.
///
/// Pixel data is stored in an [`Arc<Vec<u8>>`] so that cloning a `Raster`
/// (as happens at the start of every pipeline run, since the source is
/// never mutated) is O(1) until the clone is actually written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    data: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl Raster {
    /// Creates a new raster filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            data: Arc::new(vec![0u8; len]),
            width,
            height,
        }
    }

    /// Creates a raster filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Builds a raster from raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSource`] if `data.len() != width * height * 4`,
    /// or if either dimension is zero.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_source("zero-dimension raster"));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Error::invalid_source(format!(
                "expected {expected} bytes for a {width}x{height} raster, got {}",
                data.len()
            )));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height as a tuple.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// `true` if width or height is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The raw RGBA byte buffer, read-only.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A mutable view of the raw RGBA byte buffer.
    ///
    /// Triggers a copy-on-write clone if the underlying buffer is shared
    /// (Arc refcount > 1).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Reads the RGBA pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics (debug builds only) if `(x, y)` is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]]
    }

    /// Writes the RGBA pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics (debug builds only) if `(x, y)` is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let o = self.offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[o..o + 4].copy_from_slice(&rgba);
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Computes the Rec.601 luminance of the pixel at `(x, y)`, in `[0, 255]`.
    #[inline]
    pub fn luminance(&self, x: u32, y: u32) -> f32 {
        let [r, g, b, _] = self.pixel(x, y);
        luminance_rec601(r, g, b)
    }
}

/// Rec.601 luminance of an RGB triplet, `L = 0.299R + 0.587G + 0.114B`.
///
/// Operates directly on gamma-space 8-bit channel values, matching the
/// pipeline's documented choice of gamma-space math over linear-light.
#[inline]
pub fn luminance_rec601(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}
