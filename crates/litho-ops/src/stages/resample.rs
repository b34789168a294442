//! §4.0 Resample.
//!
//! On export with an integer upscale factor `>= 2`, rescales the source
//! to `(W*s, H*s)`. On preview, if `max(W,H) > previewMaxPx`, rescales
//! uniformly so `max(W',H') == previewMaxPx`. Otherwise passes through a
//! copy of the source unchanged.

use crate::resize::{fit_dimensions, resize_f32, Filter};
use litho_core::{RenderOptions, Result, Raster};

/// Runs the resample stage.
pub fn resample(source: &Raster, options: &RenderOptions) -> Result<Raster> {
    let (w, h) = source.dimensions();

    let target = if options.for_export && options.upscale >= 2 {
        Some((w as usize * options.upscale as usize, h as usize * options.upscale as usize))
    } else if !options.for_export && w.max(h) > options.preview_max_px {
        let max = options.preview_max_px as usize;
        Some(fit_dimensions(w as usize, h as usize, max, max))
    } else {
        None
    };

    let Some((dst_w, dst_h)) = target else {
        return Ok(source.clone());
    };

    let src_f32: Vec<f32> = source.data().iter().map(|&b| b as f32 / 255.0).collect();
    let dst_f32 = resize_f32(&src_f32, w as usize, h as usize, 4, dst_w, dst_h, Filter::Bicubic)
        .map_err(|e| litho_core::Error::invalid_source(e.to_string()))?;
    let dst_u8: Vec<u8> = dst_f32
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();

    Raster::from_raw(dst_w as u32, dst_h as u32, dst_u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_when_no_resample_requested() {
        let src = Raster::filled(8, 8, [1, 2, 3, 4]);
        let opts = RenderOptions::loupe();
        let out = resample(&src, &opts).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(out.pixel(0, 0), [1, 2, 3, 4]);
    }

    #[test]
    fn preview_downscales_to_cap() {
        let src = Raster::filled(400, 200, [10, 20, 30, 255]);
        let opts = RenderOptions::preview(100);
        let out = resample(&src, &opts).unwrap();
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 50);
    }

    #[test]
    fn export_upscales_by_integer_factor() {
        let src = Raster::filled(10, 10, [5, 5, 5, 255]);
        let opts = RenderOptions::export(3);
        let out = resample(&src, &opts).unwrap();
        assert_eq!(out.dimensions(), (30, 30));
    }

    #[test]
    fn export_upscale_one_is_passthrough() {
        let src = Raster::filled(6, 6, [1, 1, 1, 1]);
        let opts = RenderOptions::export(1);
        let out = resample(&src, &opts).unwrap();
        assert_eq!(out.dimensions(), (6, 6));
    }

    #[test]
    fn alpha_survives_resample() {
        let src = Raster::filled(10, 10, [100, 100, 100, 200]);
        let opts = RenderOptions::preview(5);
        let out = resample(&src, &opts).unwrap();
        for y in 0..out.height() {
            for x in 0..out.width() {
                assert_eq!(out.pixel(x, y)[3], 200);
            }
        }
    }
}
