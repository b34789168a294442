//! Image filtering and convolution operations.
//!
//! Provides a general convolution kernel and an average box-blur kernel
//! built from it.
//!
//! # Example
//!
//! ```rust
//! use litho_ops::filter::{convolve, Kernel};
//!
//! let src = vec![0.5f32; 16 * 16 * 3];
//! let kernel = Kernel::box_blur(3);
//! let blurred = convolve(&src, 16, 16, 3, &kernel).unwrap();
//! ```

use crate::{OpsError, OpsResult};

/// Convolution kernel for image filtering.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Kernel weights.
    pub data: Vec<f32>,
    /// Kernel width (must be odd).
    pub width: usize,
    /// Kernel height (must be odd).
    pub height: usize,
}

impl Kernel {
    /// Creates a new kernel from data.
    ///
    /// Width and height must be odd numbers.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel dimensions must be odd".into(),
            ));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Creates a box blur kernel (simple average).
    ///
    /// # Example
    ///
    /// ```rust
    /// use litho_ops::filter::Kernel;
    ///
    /// let k = Kernel::box_blur(3);
    /// assert_eq!(k.width, 3);
    /// assert_eq!(k.height, 3);
    /// ```
    pub fn box_blur(size: usize) -> Self {
        let size = if size % 2 == 0 { size + 1 } else { size };
        let count = size * size;
        let weight = 1.0 / count as f32;
        Self {
            data: vec![weight; count],
            width: size,
            height: size,
        }
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

/// Applies convolution filter to image.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `width` - Image width
/// * `height` - Image height
/// * `channels` - Number of channels (3 or 4)
/// * `kernel` - Convolution kernel
///
/// # Returns
///
/// Filtered image as Vec<f32>.
///
/// # Example
///
/// ```rust
/// use litho_ops::filter::{convolve, Kernel};
///
/// let src = vec![0.5f32; 8 * 8 * 3];
/// let kernel = Kernel::box_blur(3);
/// let result = convolve(&src, 8, 8, 3, &kernel).unwrap();
/// assert_eq!(result.len(), 8 * 8 * 3);
/// ```
pub fn convolve(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> OpsResult<Vec<f32>> {
    let expected = width * height * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} pixels, got {}",
            expected,
            src.len()
        )));
    }

    let mut dst = vec![0.0f32; expected];
    let (rx, ry) = kernel.radius();

    for y in 0..height {
        for x in 0..width {
            let mut sums = vec![0.0f32; channels];

            for ky in 0..kernel.height {
                for kx in 0..kernel.width {
                    // Source coordinates with edge clamping
                    let sx = (x as isize + kx as isize - rx as isize)
                        .max(0)
                        .min(width as isize - 1) as usize;
                    let sy = (y as isize + ky as isize - ry as isize)
                        .max(0)
                        .min(height as isize - 1) as usize;

                    let src_idx = (sy * width + sx) * channels;
                    let kw = kernel.data[ky * kernel.width + kx];

                    for c in 0..channels {
                        sums[c] += src[src_idx + c] * kw;
                    }
                }
            }

            let dst_idx = (y * width + x) * channels;
            dst[dst_idx..dst_idx + channels].copy_from_slice(&sums[..channels]);
        }
    }

    Ok(dst)
}
