//! §4.1 Film Stock.
//!
//! Exposure and per-channel response curve, halation bloom, curve
//! application, black-and-white conversion, saturation, and fade — in
//! that order. Halation is added to the pre-curve buffer so the bloom
//! itself passes through the response curve; B&W conversion runs after
//! curves; fade runs last.

use crate::params::FilmStockParams;
use litho_core::{luminance_rec601, Raster, Result};
use litho_math::{box_blur_twice, Lut8};
use litho_stock::{piecewise_smoothstep, FilmStock};

/// Runs the film-stock stage.
pub fn film_stock(source: &Raster, fs: &FilmStockParams) -> Result<Raster> {
    let stock = litho_stock::lookup(&fs.stock)
        .unwrap_or_else(|_| litho_stock::lookup(litho_stock::DEFAULT_STOCK).unwrap());
    let (w, h) = source.dimensions();
    let pixel_count = w as usize * h as usize;
    let ev_mult = 2f32.powf(fs.exposure);

    let lut_r = curve_lut(&stock.r, ev_mult);
    let lut_g = curve_lut(&stock.g, ev_mult);
    let lut_b = curve_lut(&stock.b, ev_mult);

    // Working buffer in 0..255 float space, RGBA interleaved.
    let mut buf: Vec<f32> = source.data().iter().map(|&v| v as f32).collect();

    apply_halation(&mut buf, w, h, fs.halation, stock);
    apply_curves(&mut buf, pixel_count, &lut_r, &lut_g, &lut_b);
    if let Some(weights) = stock.bw_weights {
        apply_bw(&mut buf, pixel_count, weights);
    } else if (stock.saturation - 1.0).abs() > 1e-6 {
        apply_saturation(&mut buf, pixel_count, stock.saturation);
    }
    if fs.fade > 0.01 {
        apply_fade(&mut buf, pixel_count, fs.fade, stock.is_bw());
    }

    let out: Vec<u8> = buf.iter().map(|&v| v.clamp(0.0, 255.0).round() as u8).collect();
    Raster::from_raw(w, h, out)
}

fn curve_lut(points: &litho_stock::ControlPoints, ev_mult: f32) -> Lut8 {
    Lut8::build(move |t| piecewise_smoothstep(points, (t * ev_mult).clamp(0.0, 1.0)))
}

fn apply_halation(buf: &mut [f32], w: u32, h: u32, halation: f32, stock: &FilmStock) {
    let strength = halation * stock.halation.strength;
    if strength <= 0.005 {
        return;
    }
    let pixel_count = w as usize * h as usize;
    let mut brightness = vec![0.0f32; pixel_count];
    for i in 0..pixel_count {
        let l = luminance_rec601(buf[i * 4] as u8, buf[i * 4 + 1] as u8, buf[i * 4 + 2] as u8);
        brightness[i] = ((l / 255.0 - 0.65) / 0.35).max(0.0);
    }
    let blurred = box_blur_twice(&brightness, w as usize, h as usize, stock.halation.radius);
    for i in 0..pixel_count {
        for c in 0..3 {
            let add = blurred[i] * halation * stock.halation.strength * stock.halation.tint[c] * 255.0;
            buf[i * 4 + c] = (buf[i * 4 + c] + add).clamp(0.0, 255.0);
        }
    }
}

fn apply_curves(buf: &mut [f32], pixel_count: usize, lut_r: &Lut8, lut_g: &Lut8, lut_b: &Lut8) {
    for i in 0..pixel_count {
        buf[i * 4] = lut_r.apply(buf[i * 4].clamp(0.0, 255.0) as u8) as f32;
        buf[i * 4 + 1] = lut_g.apply(buf[i * 4 + 1].clamp(0.0, 255.0) as u8) as f32;
        buf[i * 4 + 2] = lut_b.apply(buf[i * 4 + 2].clamp(0.0, 255.0) as u8) as f32;
    }
}

fn apply_bw(buf: &mut [f32], pixel_count: usize, weights: [f32; 3]) {
    for i in 0..pixel_count {
        let l = weights[0] * buf[i * 4] + weights[1] * buf[i * 4 + 1] + weights[2] * buf[i * 4 + 2];
        buf[i * 4] = l;
        buf[i * 4 + 1] = l;
        buf[i * 4 + 2] = l;
    }
}

fn apply_saturation(buf: &mut [f32], pixel_count: usize, sat: f32) {
    for i in 0..pixel_count {
        let r = buf[i * 4];
        let g = buf[i * 4 + 1];
        let b = buf[i * 4 + 2];
        let l = luminance_rec601(r.clamp(0.0, 255.0) as u8, g.clamp(0.0, 255.0) as u8, b.clamp(0.0, 255.0) as u8);
        buf[i * 4] = (l + (r - l) * sat).clamp(0.0, 255.0);
        buf[i * 4 + 1] = (l + (g - l) * sat).clamp(0.0, 255.0);
        buf[i * 4 + 2] = (l + (b - l) * sat).clamp(0.0, 255.0);
    }
}

fn apply_fade(buf: &mut [f32], pixel_count: usize, fade: f32, is_bw: bool) {
    let lift = 0.07 * fade;
    let contrast = 1.0 - 0.22 * fade;
    let scales = if is_bw {
        [1.0, 1.0, 1.0]
    } else {
        [1.0 + 0.14 * fade, 1.0 + 0.03 * fade, 1.0 - 0.08 * fade]
    };
    let desat = 0.35 * fade;

    let luts: Vec<Lut8> = scales
        .iter()
        .map(|&scale| {
            Lut8::build(move |t| {
                let v = (t - 0.5) * contrast + 0.5 + lift;
                (v * scale).clamp(0.0, 1.0)
            })
        })
        .collect();

    for i in 0..pixel_count {
        let r = luts[0].apply(buf[i * 4].clamp(0.0, 255.0) as u8) as f32;
        let g = luts[1].apply(buf[i * 4 + 1].clamp(0.0, 255.0) as u8) as f32;
        let b = luts[2].apply(buf[i * 4 + 2].clamp(0.0, 255.0) as u8) as f32;
        let l = luminance_rec601(r.clamp(0.0, 255.0) as u8, g.clamp(0.0, 255.0) as u8, b.clamp(0.0, 255.0) as u8);
        buf[i * 4] = (l + (r - l) * desat).clamp(0.0, 255.0);
        buf[i * 4 + 1] = (l + (g - l) * desat).clamp(0.0, 255.0);
        buf[i * 4 + 2] = (l + (b - l) * desat).clamp(0.0, 255.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_and_alpha_are_preserved() {
        let src = Raster::filled(4, 4, [120, 110, 100, 77]);
        let params = FilmStockParams {
            stock: "portra".into(),
            exposure: 0.0,
            halation: 0.5,
            fade: 0.0,
        };
        let out = film_stock(&src, &params).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.pixel(x, y)[3], 77);
            }
        }
    }

    #[test]
    fn unknown_stock_falls_back_to_default() {
        let src = Raster::filled(2, 2, [128, 128, 128, 255]);
        let params = FilmStockParams {
            stock: "not-a-real-stock".into(),
            exposure: 0.0,
            halation: 0.0,
            fade: 0.0,
        };
        assert!(film_stock(&src, &params).is_ok());
    }

    #[test]
    fn bw_stock_desaturates() {
        let src = Raster::filled(2, 2, [255, 0, 0, 255]);
        let params = FilmStockParams {
            stock: "trix".into(),
            exposure: 0.0,
            halation: 0.0,
            fade: 0.0,
        };
        let out = film_stock(&src, &params).unwrap();
        let [r, g, b, _] = out.pixel(0, 0);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn positive_exposure_brightens_midtones() {
        let src = Raster::filled(2, 2, [128, 128, 128, 255]);
        let low = film_stock(
            &src,
            &FilmStockParams { stock: "portra".into(), exposure: -1.0, halation: 0.0, fade: 0.0 },
        )
        .unwrap();
        let high = film_stock(
            &src,
            &FilmStockParams { stock: "portra".into(), exposure: 1.0, halation: 0.0, fade: 0.0 },
        )
        .unwrap();
        assert!(high.pixel(0, 0)[0] >= low.pixel(0, 0)[0]);
    }

    #[test]
    fn all_channels_stay_in_range() {
        let src = Raster::filled(6, 6, [250, 10, 200, 255]);
        let params = FilmStockParams {
            stock: "ektachrome".into(),
            exposure: 2.0,
            halation: 1.0,
            fade: 1.0,
        };
        let out = film_stock(&src, &params).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(out.pixel(x, y)[3], 255, "alpha should be untouched");
            }
        }
    }
}
