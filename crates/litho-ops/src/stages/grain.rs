//! §4.3 Grain — unseeded per-pixel noise.
//!
//! Grain is explicitly not required to be reproducible run-to-run (§5),
//! so it draws from the thread-local RNG rather than a seeded source.

use crate::params::GrainParams;
use litho_core::{luminance_rec601, Raster, Result};
use rand::Rng;

/// Runs the grain stage.
pub fn grain(source: &Raster, params: &GrainParams) -> Result<Raster> {
    if params.amount <= 0.0 {
        return Ok(source.clone());
    }
    let (w, h) = source.dimensions();
    let mut out = source.data().to_vec();
    let mut rng = rand::rng();

    for i in 0..(w as usize * h as usize) {
        let base = i * 4;
        let weight = if params.weighted {
            let l = luminance_rec601(out[base], out[base + 1], out[base + 2]);
            (1.0 - l / 255.0) * 1.5
        } else {
            1.0
        };
        let r: f32 = rng.random_range(-1.0..=1.0);
        let delta = r * params.amount * 255.0 * weight;
        for c in 0..3 {
            out[base + c] = (out[base + c] as f32 + delta).clamp(0.0, 255.0) as u8;
        }
    }
    Raster::from_raw(w, h, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_is_passthrough() {
        let src = Raster::filled(4, 4, [100, 100, 100, 255]);
        let params = GrainParams { amount: 0.0, weighted: true };
        let out = grain(&src, &params).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn identical_channels_stay_identical_per_pixel() {
        let src = Raster::filled(6, 6, [128, 128, 128, 255]);
        let params = GrainParams { amount: 0.3, weighted: false };
        let out = grain(&src, &params).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                let [r, g, b, _] = out.pixel(x, y);
                assert_eq!(r, g);
                assert_eq!(g, b);
            }
        }
    }

    #[test]
    fn dimensions_preserved() {
        let src = Raster::filled(5, 3, [50, 50, 50, 255]);
        let params = GrainParams { amount: 0.2, weighted: true };
        let out = grain(&src, &params).unwrap();
        assert_eq!(out.dimensions(), (5, 3));
    }

    #[test]
    fn alpha_untouched() {
        let src = Raster::filled(4, 4, [50, 60, 70, 123]);
        let params = GrainParams { amount: 0.4, weighted: true };
        let out = grain(&src, &params).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y)[3], 123);
            }
        }
    }
}
