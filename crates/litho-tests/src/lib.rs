//! End-to-end tests for the press-simulation pipeline.
//!
//! These tests exercise `litho-ops::render` through its public surface
//! only — the literal scenarios and invariants are driven entirely by
//! `Raster`/`ModuleParams`/`ActiveSet` values, the same shapes a host
//! would build. Plate-internal assertions (e.g. registration shifting a
//! single plate's dots) live as white-box tests next to the code they
//! inspect instead.

#[cfg(test)]
mod xorshift;

#[cfg(test)]
mod tests {
    use super::xorshift::Xorshift32;
    use litho_core::{ActiveSet, ModuleParams, Raster, RenderOptions};
    use litho_ops::render::render;

    // -------------------------------------------------------------------
    // Literal end-to-end scenarios
    // -------------------------------------------------------------------

    #[test]
    fn white_in_white_out() {
        let source = Raster::filled(8, 8, [255, 255, 255, 255]);
        let mut params = ModuleParams::new();
        params.set("halftone", "paperColor", "#ffffff");
        let active = ActiveSet::from_ids(["halftone"]);
        let out = render(&source, &active, &params, &RenderOptions::loupe()).unwrap();

        for y in 0..8 {
            for x in 0..8 {
                let [r, g, b, a] = out.pixel(x, y);
                assert_eq!((r, g, b, a), (255, 255, 255, 255), "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn black_bw_halftone_produces_dark_dots() {
        let source = Raster::filled(4, 4, [0, 0, 0, 255]);
        let mut params = ModuleParams::new();
        params.set("halftone", "mode", "bw");
        params.set("halftone", "cellSize", 4i64);
        params.set("halftone", "angleK", 0i64);
        params.set("halftone", "paperColor", "#ffffff");
        let active = ActiveSet::from_ids(["halftone"]);
        let out = render(&source, &active, &params, &RenderOptions::loupe()).unwrap();

        let min_brightness = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .map(|(x, y)| {
                let [r, g, b, _] = out.pixel(x, y);
                r.min(g).min(b)
            })
            .min()
            .unwrap();
        assert!(min_brightness <= 10, "expected at least one near-black pixel, darkest was {min_brightness}");
    }

    #[test]
    fn vertical_ramp_produces_monotone_k_plate_coverage() {
        // Vertical bars forming a ramp: each column is a flat tone, tones
        // rise left to right, so the darkest (highest-K) column is the
        // leftmost.
        let (w, h) = (256u32, 256u32);
        let mut data = vec![0u8; (w * h * 4) as usize];
        for y in 0..h {
            for x in 0..w {
                let v = (x * 255 / (w - 1)) as u8;
                let o = ((y * w + x) * 4) as usize;
                data[o..o + 4].copy_from_slice(&[v, v, v, 255]);
            }
        }
        let source = Raster::from_raw(w, h, data).unwrap();

        let mut params = ModuleParams::new();
        params.set("halftone", "mode", "cmyk");
        params.set("halftone", "cellSize", 4i64);
        let active = ActiveSet::from_ids(["halftone"]);
        let out = render(&source, &active, &params, &RenderOptions::loupe()).unwrap();

        // Darkness (inverse of mean brightness) per column should not
        // increase as x grows once averaged over a few neighboring
        // columns, since lighter tones take less ink.
        let column_mean = |x0: u32| -> f32 {
            let mut sum = 0.0;
            let mut n = 0.0;
            for x in x0..(x0 + 8).min(w) {
                for y in 0..h {
                    let [r, g, b, _] = out.pixel(x, y);
                    sum += (r as f32 + g as f32 + b as f32) / 3.0;
                    n += 1.0;
                }
            }
            sum / n
        };

        let left = column_mean(0);
        let mid = column_mean(w / 2);
        let right = column_mean(w - 8);
        assert!(left <= mid, "left block ({left}) should be darker than or equal to mid ({mid})");
        assert!(mid <= right, "mid block ({mid}) should be darker than or equal to right ({right})");
        assert!(left < right, "overall coverage should strictly lighten left to right");
    }

    #[test]
    fn dotgain_amount_one_is_darker_than_zero() {
        let source = Raster::filled(128, 128, [128, 128, 128, 255]);
        let mut params = ModuleParams::new();
        params.set("halftone", "mode", "bw");
        params.set("halftone", "cellSize", 8i64);
        let active = ActiveSet::from_ids(["halftone", "dotgain"]);

        let mean_brightness = |amount: f32| -> f32 {
            let mut p = params.clone();
            p.set("dotgain", "amount", amount);
            let out = render(&source, &active, &p, &RenderOptions::loupe()).unwrap();
            let mut sum = 0.0f64;
            for y in 0..128 {
                for x in 0..128 {
                    let [r, g, b, _] = out.pixel(x, y);
                    sum += (r as f64 + g as f64 + b as f64) / 3.0;
                }
            }
            (sum / (128 * 128) as f64) as f32
        };

        let at_zero = mean_brightness(0.0);
        let at_one = mean_brightness(1.0);
        assert!(at_one < at_zero, "amount=1 ({at_one}) should be darker than amount=0 ({at_zero})");
    }

    #[test]
    fn inkskip_is_bit_identical_across_runs() {
        let source = Raster::filled(64, 64, [0, 0, 0, 255]);
        let mut params = ModuleParams::new();
        params.set("halftone", "mode", "bw");
        params.set("halftone", "cellSize", 6i64);
        params.set("inkskip", "intensity", 0.5f32);
        params.set("inkskip", "scale", 0.4f32);
        let active = ActiveSet::from_ids(["halftone", "inkskip"]);

        let first = render(&source, &active, &params, &RenderOptions::loupe()).unwrap();
        let second = render(&source, &active, &params, &RenderOptions::loupe()).unwrap();
        assert_eq!(first.data(), second.data());
    }

    // -------------------------------------------------------------------
    // Property fuzzer (invariants 1-4 of §8) over random configurations
    // -------------------------------------------------------------------

    #[test]
    fn empty_active_set_still_produces_halftone_and_press_output() {
        let source = Raster::filled(16, 16, [100, 150, 200, 255]);
        let active = ActiveSet::new();
        let params = ModuleParams::new();
        let out = render(&source, &active, &params, &RenderOptions::loupe()).unwrap();

        // With no modules active the result is still a screened halftone
        // over a paper background, so it must differ from the flat
        // source the screen was built from.
        assert_ne!(out.data(), source.data());
        assert_eq!(out.dimensions(), source.dimensions());
    }

    #[test]
    fn fuzz_random_configurations_hold_basic_invariants() {
        let modules = ["filmstock", "velox", "grain", "dotgain", "registration", "inkbleed", "papertooth"];
        let mut rng = Xorshift32::new(0xC0FFEE);

        for i in 0..100 {
            let w = rng.range_u32(1, 40);
            let h = rng.range_u32(1, 40);
            let color = [
                rng.range_u32(0, 255) as u8,
                rng.range_u32(0, 255) as u8,
                rng.range_u32(0, 255) as u8,
                255,
            ];
            let source = Raster::filled(w, h, color);

            let mut active = ActiveSet::new();
            for m in &modules {
                if rng.bool() {
                    active.activate(*m);
                }
            }

            let mut params = ModuleParams::new();
            params.set("filmstock", "exposure", rng.range_f32(-1.0, 1.0));
            params.set("velox", "threshold", rng.range_f32(0.1, 0.9));
            params.set("grain", "amount", rng.range_f32(0.0, 0.5));
            params.set("dotgain", "amount", rng.range_f32(0.0, 1.0));
            params.set("halftone", "cellSize", rng.range_u32(3, 16) as i64);

            // Loupe never resamples, so dimensions must be preserved exactly.
            let out = render(&source, &active, &params, &RenderOptions::loupe())
                .unwrap_or_else(|e| panic!("config {i} failed to render: {e}"));

            // Invariant 1: dimensions preserved.
            assert_eq!(out.dimensions(), (w, h), "config {i}: dimensions changed");

            // Invariant 3/4: alpha untouched, all channels valid u8 range
            // (trivially true for a u8 buffer, asserted for documentation).
            for y in 0..h {
                for x in 0..w {
                    let [r, g, b, a] = out.pixel(x, y);
                    assert_eq!(a, 255, "config {i}: alpha channel was altered at ({x},{y})");
                    let _ = (r, g, b); // in range by construction (u8)
                }
            }
        }
    }
}
