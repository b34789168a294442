//! §4.6 Paper Tooth — highlight noise and shadow mottle driven by a
//! shared paper map.

use crate::params::{FeedDir, PaperParams};
use litho_core::{luminance_rec601, Raster, Result};
use rand::Rng;

/// Builds the paper map: base noise plus fiber strokes.
///
/// Unseeded, matching grain's reproducibility policy (§5) — paper texture
/// is never required to match bit-for-bit across runs.
pub fn build_paper_map(width: u32, height: u32, feed: FeedDir, params: &PaperParams) -> Vec<f32> {
    let (w, h) = (width as usize, height as usize);
    let mut map = vec![0.0f32; w * h];
    let mut rng = rand::rng();

    for v in map.iter_mut() {
        let n: f32 = rng.random_range(-1.0..=1.0);
        *v = n * params.texture;
    }

    let max_dim = width.max(height) as f32;
    let fiber_count = (max_dim * params.fibers * 0.3).round() as u32;
    for _ in 0..fiber_count {
        let sx = rng.random_range(0..w) as i64;
        let sy = rng.random_range(0..h) as i64;
        let length = rng.random_range(10.0..=(max_dim * 0.2 + 10.0));
        let steps = length.round() as i64;
        for step in 0..=steps {
            let (px, py) = match feed {
                FeedDir::Horizontal => (sx + step, sy),
                FeedDir::Vertical => (sx, sy + step),
            };
            if px < 0 || py < 0 || px as usize >= w || py as usize >= h {
                continue;
            }
            let value: f32 = rng.random_range(-1.0..=1.0) * params.fibers;
            let idx = py as usize * w + px as usize;
            map[idx] += value * (1.0 - step as f32 / length.max(1.0));
        }
    }
    map
}

/// Applies highlight noise and shadow mottle using a prebuilt paper map.
pub fn apply_paper_tooth(
    source: &Raster,
    map: &[f32],
    paper_color: [u8; 3],
    texture: f32,
    pressure: f32,
) -> Result<Raster> {
    let (w, h) = source.dimensions();
    let mut out = source.data().to_vec();
    let safe_t = texture.max(0.001);

    for (i, &map_val) in map.iter().enumerate() {
        let base = i * 4;
        let l = luminance_rec601(out[base], out[base + 1], out[base + 2]) / 255.0;

        if l > 0.4 {
            let hw = ((l - 0.4) / 0.6).clamp(0.0, 1.0);
            let add = map_val * hw * 150.0;
            for c in 0..3 {
                out[base + c] = (out[base + c] as f32 + add).clamp(0.0, 255.0) as u8;
            }
        }
        if l < 0.6 && map_val > 0.0 {
            let sw = ((0.6 - l) / 0.6).clamp(0.0, 1.0);
            let m = ((1.0 - pressure) * (map_val / safe_t) * sw * 2.0).clamp(0.0, 1.0);
            for (c, paper_c) in paper_color.iter().enumerate() {
                let orig = out[base + c] as f32;
                out[base + c] = (orig + (*paper_c as f32 - orig) * m).clamp(0.0, 255.0) as u8;
            }
        }
    }
    Raster::from_raw(w, h, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_map_has_correct_length() {
        let params = PaperParams { texture: 0.15, fibers: 0.05 };
        let map = build_paper_map(16, 12, FeedDir::Vertical, &params);
        assert_eq!(map.len(), 16 * 12);
    }

    #[test]
    fn zero_texture_zero_fibers_yields_flat_map() {
        let params = PaperParams { texture: 0.0, fibers: 0.0 };
        let map = build_paper_map(10, 10, FeedDir::Vertical, &params);
        assert!(map.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn apply_preserves_dimensions_and_alpha() {
        let src = Raster::filled(5, 5, [120, 120, 120, 99]);
        let map = vec![0.2f32; 25];
        let out = apply_paper_tooth(&src, &map, [240, 234, 216], 0.15, 1.0).unwrap();
        assert_eq!(out.dimensions(), (5, 5));
        assert_eq!(out.pixel(0, 0)[3], 99);
    }

    #[test]
    fn full_pressure_skips_shadow_mottle() {
        let src = Raster::filled(4, 4, [30, 30, 30, 255]);
        let map = vec![0.5f32; 16];
        let out = apply_paper_tooth(&src, &map, [240, 234, 216], 0.15, 1.0).unwrap();
        assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
    }

    #[test]
    fn low_pressure_mottles_dark_areas_toward_paper() {
        let src = Raster::filled(4, 4, [10, 10, 10, 255]);
        let map = vec![0.5f32; 16];
        let out = apply_paper_tooth(&src, &map, [240, 234, 216], 0.15, 0.2).unwrap();
        assert!(out.pixel(0, 0)[0] > src.pixel(0, 0)[0]);
    }
}
