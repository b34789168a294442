//! §4.5 Ink Bleed — directional wet-ink wicking.

use crate::filter::{convolve, Kernel};
use crate::params::{FeedDir, InkBleedParams};
use litho_core::{Raster, Result};

/// Runs the ink-bleed stage.
pub fn ink_bleed(source: &Raster, paper: [u8; 3], feed: FeedDir, params: &InkBleedParams) -> Result<Raster> {
    let (w, h) = source.dimensions();
    let r = params.radius as i32;
    let pixel_count = w as usize * h as usize;

    let mut density = vec![0.0f32; pixel_count];
    let mut rgb = vec![0.0f32; pixel_count * 3];
    for i in 0..pixel_count {
        let base = i * 4;
        let data = source.data();
        let (rr, gg, bb) = (data[base] as f32, data[base + 1] as f32, data[base + 2] as f32);
        let rho = 1.0
            - (1.0 + 0.299 * (rr - paper[0] as f32) / 255.0
                + 0.587 * (gg - paper[1] as f32) / 255.0
                + 0.114 * (bb - paper[2] as f32) / 255.0);
        density[i] = rho.clamp(0.0, 1.0);
        rgb[i * 3] = rr;
        rgb[i * 3 + 1] = gg;
        rgb[i * 3 + 2] = bb;
    }

    let ang = if matches!(feed, FeedDir::Vertical) { std::f32::consts::FRAC_PI_2 } else { 0.0 };
    let stretch = (1.0 - params.directionality).max(0.1);
    let size = (2 * params.radius as usize) + 1;
    let mut weights = vec![0.0f32; size * size];
    let mut total = 0.0f32;
    for ky in 0..size {
        for kx in 0..size {
            let x = kx as i32 - r;
            let y = ky as i32 - r;
            let rx = x as f32 * ang.cos() - y as f32 * ang.sin();
            let ry = x as f32 * ang.sin() + y as f32 * ang.cos();
            let d = (rx * rx + (ry / stretch).powi(2)).sqrt();
            let w = if d <= params.radius as f32 { 1.0 - d / params.radius as f32 } else { 0.0 };
            weights[ky * size + kx] = w;
            total += w;
        }
    }
    if total <= 0.0 {
        total = 1.0;
    }
    let kernel = Kernel::new(weights, size, size)
        .map_err(|e| litho_core::Error::invalid_source(e.to_string()))?;

    let blurred_density = convolve(&density, w as usize, h as usize, 1, &kernel)
        .map_err(|e| litho_core::Error::invalid_source(e.to_string()))?;
    let blurred_rgb = convolve(&rgb, w as usize, h as usize, 3, &kernel)
        .map_err(|e| litho_core::Error::invalid_source(e.to_string()))?;

    let mut out = source.data().to_vec();
    for i in 0..pixel_count {
        let rho = (blurred_density[i] / total).clamp(0.0, 1.0);
        let curve = rho.sqrt();
        let blend = (curve * params.absorbency * 1.5).clamp(0.0, 1.0);
        let base = i * 4;
        for c in 0..3 {
            let blurred_c = blurred_rgb[i * 3 + c] / total;
            let orig = out[base + c] as f32;
            out[base + c] = (orig + (blurred_c - orig) * blend).clamp(0.0, 255.0) as u8;
        }
    }
    Raster::from_raw(w, h, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FeedDir;

    fn params(radius: u32, absorbency: f32, directionality: f32) -> InkBleedParams {
        InkBleedParams { radius, absorbency, directionality }
    }

    #[test]
    fn dimensions_preserved() {
        let src = Raster::filled(10, 10, [50, 50, 50, 255]);
        let out = ink_bleed(&src, [240, 234, 216], FeedDir::Vertical, &params(3, 0.8, 0.7)).unwrap();
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn uniform_field_is_unchanged() {
        let src = Raster::filled(8, 8, [240, 234, 216, 255]);
        let out = ink_bleed(&src, [240, 234, 216], FeedDir::Vertical, &params(3, 0.8, 0.7)).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let [r, g, b, _] = out.pixel(x, y);
                assert!((r as i32 - 240).abs() <= 1);
                assert!((g as i32 - 234).abs() <= 1);
                assert!((b as i32 - 216).abs() <= 1);
            }
        }
    }

    #[test]
    fn zero_absorbency_keeps_source() {
        let mut src = Raster::new(6, 6);
        src.set_pixel(3, 3, [0, 0, 0, 255]);
        let out = ink_bleed(&src, [240, 234, 216], FeedDir::Vertical, &params(3, 0.0, 0.7)).unwrap();
        assert_eq!(out.pixel(3, 3), src.pixel(3, 3));
    }

    #[test]
    fn high_absorbency_spreads_dark_pixel_to_neighbors() {
        let mut src = Raster::filled(9, 9, [240, 234, 216, 255]);
        src.set_pixel(4, 4, [0, 0, 0, 255]);
        let out = ink_bleed(&src, [240, 234, 216], FeedDir::Vertical, &params(4, 1.0, 0.0)).unwrap();
        let neighbor = out.pixel(4, 3);
        assert!(neighbor[0] < 240);
    }
}
