//! §4.4 Halftone — the press screen. Turns a continuous-tone buffer into
//! a paper-colored background with up to four screened plates
//! multiplicatively composited.

use crate::params::{
    DotGainParams, DotShape, FeedDir, HalftoneMode, HalftoneParams, HickeysParams, InkSkipParams,
    PressParams, RegistrationParams,
};
use litho_core::{luminance_rec601, Raster, Result};
use litho_math::Mulberry32;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything the halftone stage needs besides the source raster and its
/// own module parameters — registration, press feed/slur, and the two
/// optional modules (ink skip, hickeys) whose presence is decided by the
/// active module set, not by this module's own defaults.
pub struct HalftoneContext<'a> {
    /// Halftone screen parameters.
    pub halftone: &'a HalftoneParams,
    /// Dot gain curve.
    pub dotgain: &'a DotGainParams,
    /// Plate registration offsets and fan-out.
    pub registration: &'a RegistrationParams,
    /// Feed direction, pressure, slur.
    pub press: &'a PressParams,
    /// Ink-skip parameters, present only if the `inkskip` module is active.
    pub inkskip: Option<&'a InkSkipParams>,
    /// Hickey parameters, present only if the `hickeys` module is active.
    pub hickeys: Option<&'a HickeysParams>,
}

#[derive(Clone, Copy)]
enum ValueFn {
    /// `1 - L/255` — dark areas get more ink.
    Inverted,
    /// `L/255` — bright areas get more ink (duotone's second, lighter plate).
    Direct,
    CmykK,
    CmykC,
    CmykM,
    CmykY,
}

struct PlateSpec {
    key: char,
    ink: [u8; 3],
    angle: i32,
    /// 1-based index in channel-array order, before laydown sorting.
    index: u32,
    value_fn: ValueFn,
}

/// Runs the halftone stage.
pub fn halftone(source: &Raster, ctx: &HalftoneContext) -> Result<Raster> {
    let (w, h) = source.dimensions();
    let hp = ctx.halftone;

    let plates = build_plate_specs(hp);
    let order = laydown_order(&ctx.press.laydown, &plates);

    // Each plate's screen is rasterized independently of the others —
    // only the final compositing pass below has an ordering requirement
    // (laydown order), so the plates themselves can run concurrently.
    let render_plate = |spec: PlateSpec| {
        let skip_map = ctx
            .inkskip
            .map(|p| build_ink_skip_map(w, h, ctx.press.feed, p.scale, p.intensity, spec.index * 1000));
        let mut buf = rasterize_plate(source, &spec, hp, ctx.dotgain, ctx.registration, ctx.press, skip_map.as_deref());
        if let Some(hk) = ctx.hickeys {
            stamp_hickeys(&mut buf, w, h, spec.ink, hp.paper_color, spec.index, hk);
        }
        (spec.key, buf)
    };
    #[cfg(feature = "parallel")]
    let rendered: Vec<(char, Vec<u8>)> = plates.into_par_iter().map(render_plate).collect();
    #[cfg(not(feature = "parallel"))]
    let rendered: Vec<(char, Vec<u8>)> = plates.into_iter().map(render_plate).collect();

    let mut out = vec![0u8; w as usize * h as usize * 4];
    for (i, px) in out.chunks_exact_mut(4).enumerate() {
        px[0] = hp.paper_color[0];
        px[1] = hp.paper_color[1];
        px[2] = hp.paper_color[2];
        px[3] = source.data()[i * 4 + 3];
    }

    for key in order {
        let Some((_, plate)) = rendered.iter().find(|(k, _)| *k == key) else { continue };
        for (i, px) in out.chunks_exact_mut(4).enumerate() {
            for c in 0..3 {
                let prod = px[c] as f32 * plate[i * 3 + c] as f32 / 255.0;
                px[c] = prod.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Raster::from_raw(w, h, out)
}

fn build_plate_specs(hp: &HalftoneParams) -> Vec<PlateSpec> {
    match hp.mode {
        HalftoneMode::Bw => vec![PlateSpec {
            key: 'k',
            ink: hp.duotone_color1,
            angle: hp.angle_k + hp.master_angle,
            index: 1,
            value_fn: ValueFn::Inverted,
        }],
        HalftoneMode::Duotone => vec![
            PlateSpec {
                key: 'k',
                ink: hp.duotone_color1,
                angle: hp.angle_k + hp.master_angle,
                index: 1,
                value_fn: ValueFn::Inverted,
            },
            PlateSpec {
                key: 'c',
                ink: hp.duotone_color2,
                angle: hp.angle_c + hp.master_angle,
                index: 2,
                value_fn: ValueFn::Direct,
            },
        ],
        HalftoneMode::Cmyk => vec![
            PlateSpec { key: 'k', ink: litho_stock::ink::BLACK, angle: hp.angle_k + hp.master_angle, index: 1, value_fn: ValueFn::CmykK },
            PlateSpec { key: 'c', ink: litho_stock::ink::CYAN, angle: hp.angle_c + hp.master_angle, index: 2, value_fn: ValueFn::CmykC },
            PlateSpec { key: 'm', ink: litho_stock::ink::MAGENTA, angle: hp.angle_m + hp.master_angle, index: 3, value_fn: ValueFn::CmykM },
            PlateSpec { key: 'y', ink: litho_stock::ink::YELLOW, angle: hp.angle_y + hp.master_angle, index: 4, value_fn: ValueFn::CmykY },
        ],
    }
}

fn laydown_order(laydown: &str, plates: &[PlateSpec]) -> Vec<char> {
    let present: Vec<char> = plates.iter().map(|p| p.key).collect();
    laydown
        .split('-')
        .filter_map(|s| s.chars().next())
        .filter(|c| present.contains(c))
        .collect()
}

fn plate_value(vf: ValueFn, r: f32, g: f32, b: f32) -> f32 {
    let l01 = luminance_rec601(r as u8, g as u8, b as u8) / 255.0;
    match vf {
        ValueFn::Inverted => 1.0 - l01,
        ValueFn::Direct => l01,
        ValueFn::CmykK => 1.0 - r.max(g).max(b) / 255.0,
        ValueFn::CmykC => {
            let k = 1.0 - r.max(g).max(b) / 255.0;
            if k >= 1.0 { 0.0 } else { (1.0 - r / 255.0 - k) / (1.0 - k) }
        }
        ValueFn::CmykM => {
            let k = 1.0 - r.max(g).max(b) / 255.0;
            if k >= 1.0 { 0.0 } else { (1.0 - g / 255.0 - k) / (1.0 - k) }
        }
        ValueFn::CmykY => {
            let k = 1.0 - r.max(g).max(b) / 255.0;
            if k >= 1.0 { 0.0 } else { (1.0 - b / 255.0 - k) / (1.0 - k) }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn rasterize_plate(
    source: &Raster,
    spec: &PlateSpec,
    hp: &HalftoneParams,
    dotgain: &DotGainParams,
    registration: &RegistrationParams,
    press: &PressParams,
    skip_map: Option<&[f32]>,
) -> Vec<u8> {
    let (w, h) = source.dimensions();
    let (wf, hf) = (w as f32, h as f32);
    let mut plate = vec![255u8; w as usize * h as usize * 3];

    let cell = hp.cell_size as f32;
    let theta = (spec.angle as f32).to_radians();
    let (cos_t, sin_t) = (theta.cos(), theta.sin());
    let (off_x, off_y) = registration.offset_for(spec.key);
    let max_r = cell * 0.5 * 0.98;
    let max_stretch = registration.fanout * (spec.index.saturating_sub(1) as f32) / 3.0;
    let (stretch_x, stretch_y) = match press.feed {
        FeedDir::Vertical => (max_stretch / (wf / 2.0), 0.0),
        FeedDir::Horizontal => (0.0, max_stretch / (hf / 2.0)),
    };
    let scale_x = if matches!(press.feed, FeedDir::Horizontal) { 1.0 + press.slur } else { 1.0 };
    let scale_y = if matches!(press.feed, FeedDir::Vertical) { 1.0 + press.slur } else { 1.0 };

    let diag = (wf * wf + hf * hf).sqrt();
    let half = diag / 2.0 + cell;
    let steps = (2.0 * half / cell).ceil() as i64 + 2;

    let mut gy = -half;
    for _ in 0..steps {
        let mut gx = -half;
        for _ in 0..steps {
            let gcx = gx + cell / 2.0;
            let gcy = gy + cell / 2.0;
            let img_x = wf / 2.0 + gcx * cos_t - gcy * sin_t;
            let img_y = hf / 2.0 + gcx * sin_t + gcy * cos_t;
            gx += cell;

            if img_x < 0.0 || img_x >= wf || img_y < 0.0 || img_y >= hf {
                continue;
            }
            let sx = img_x.round().clamp(0.0, wf - 1.0) as u32;
            let sy = img_y.round().clamp(0.0, hf - 1.0) as u32;
            let [r, g, b, _] = source.pixel(sx, sy);
            let mut ink = plate_value(spec.value_fn, r as f32, g as f32, b as f32).clamp(0.0, 1.0);

            ink = (ink + dotgain.amount * ink * (1.0 - ink) * 2.0).clamp(0.0, 1.0);
            if ink > 0.75 && dotgain.shadow > 0.0 {
                ink = (ink + (1.0 - ink) * dotgain.shadow * (ink - 0.75) / 0.25).clamp(0.0, 1.0);
            }
            if let Some(map) = skip_map {
                let idx = sy as usize * w as usize + sx as usize;
                ink = (ink * (1.0 - map[idx])).clamp(0.0, 1.0);
            }

            let radius = max_r * ink.sqrt();
            if radius < 0.3 {
                continue;
            }

            let dx = img_x + off_x + (img_x - wf / 2.0) * stretch_x;
            let dy = img_y + off_y + (img_y - hf / 2.0) * stretch_y;

            draw_dot(&mut plate, w, h, dx, dy, radius, scale_x, scale_y, cell, max_r, theta, hp.dot_shape, spec.ink);
        }
        gy += cell;
    }

    plate
}

#[allow(clippy::too_many_arguments)]
fn draw_dot(
    plate: &mut [u8],
    w: u32,
    h: u32,
    dx: f32,
    dy: f32,
    radius: f32,
    scale_x: f32,
    scale_y: f32,
    cell: f32,
    max_r: f32,
    theta: f32,
    shape: DotShape,
    ink: [u8; 3],
) {
    let extent = (radius * scale_x.max(scale_y) + cell * 0.5).ceil() as i32 + 1;
    let cx = dx.round() as i32;
    let cy = dy.round() as i32;

    let (cos_t, sin_t) = (theta.cos(), theta.sin());
    let half_len = cell / 2.0;
    let half_thick = (radius * 1.2).clamp(0.3, max_r) / 2.0;

    for py in (cy - extent).max(0)..(cy + extent + 1).min(h as i32) {
        for px in (cx - extent).max(0)..(cx + extent + 1).min(w as i32) {
            let lx = px as f32 + 0.5 - dx;
            let ly = py as f32 + 0.5 - dy;
            let inside = match shape {
                DotShape::Circle => {
                    let rx = radius * scale_x;
                    let ry = radius * scale_y;
                    (lx / rx).powi(2) + (ly / ry).powi(2) <= 1.0
                }
                DotShape::Diamond => {
                    let rx = radius * scale_x;
                    let ry = radius * scale_y;
                    (lx.abs() / rx) + (ly.abs() / ry) <= 1.0
                }
                DotShape::Line => {
                    let (slx, sly) = (lx / scale_x, ly / scale_y);
                    let rx = slx * cos_t + sly * sin_t;
                    let ry = -slx * sin_t + sly * cos_t;
                    rx.abs() <= half_len && ry.abs() <= half_thick
                }
            };
            if inside {
                let idx = (py as usize * w as usize + px as usize) * 3;
                plate[idx] = ink[0];
                plate[idx + 1] = ink[1];
                plate[idx + 2] = ink[2];
            }
        }
    }
}

fn stamp_hickeys(plate: &mut [u8], w: u32, h: u32, ink: [u8; 3], paper: [u8; 3], plate_index: u32, params: &HickeysParams) {
    let mut rng = Mulberry32::new(plate_index * 5000);
    let dark = [
        (ink[0] as f32 * 0.6) as u8,
        (ink[1] as f32 * 0.6) as u8,
        (ink[2] as f32 * 0.6) as u8,
    ];
    for _ in 0..params.count {
        let cx = rng.range(0.0, w as f32);
        let cy = rng.range(0.0, h as f32);
        let outer_r = rng.range(2.0, params.size_max as f32);
        let inner_r = outer_r * rng.range(0.35, 0.60);

        let x0 = (cx - outer_r).floor().max(0.0) as i32;
        let x1 = (cx + outer_r).ceil().min(w as f32) as i32;
        let y0 = (cy - outer_r).floor().max(0.0) as i32;
        let y1 = (cy + outer_r).ceil().min(h as f32) as i32;
        for py in y0.max(0)..y1 {
            for px in x0.max(0)..x1 {
                let d = ((px as f32 - cx).powi(2) + (py as f32 - cy).powi(2)).sqrt();
                if d > outer_r {
                    continue;
                }
                let idx = (py as usize * w as usize + px as usize) * 3;
                let color = if d <= inner_r { paper } else { dark };
                plate[idx] = color[0];
                plate[idx + 1] = color[1];
                plate[idx + 2] = color[2];
            }
        }
    }
}

/// Builds the seeded ink-skip blob map for one plate (§4.4).
fn build_ink_skip_map(w: u32, h: u32, feed: FeedDir, scale: f32, intensity: f32, seed: u32) -> Vec<f32> {
    let (wf, hf) = (w as f32, h as f32);
    let mut rng = Mulberry32::new(seed);
    let n = (3.0f32.max((1.0 - scale) * 12.0 + 3.0) * 3.0).round() as u32;
    let base_r = scale * wf.min(hf) * 0.6;
    let (rx_base, ry_base) = match feed {
        FeedDir::Vertical => (base_r * 0.15, base_r * 2.5),
        FeedDir::Horizontal => (base_r * 2.5, base_r * 0.15),
    };

    struct Blob {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        v: f32,
    }
    let blobs: Vec<Blob> = (0..n)
        .map(|_| {
            let scale_u = rng.range(0.5, 1.5);
            Blob {
                cx: rng.range(0.0, wf),
                cy: rng.range(0.0, hf),
                rx: rx_base * scale_u,
                ry: ry_base * scale_u,
                v: rng.range(-1.0, 1.0) * intensity,
            }
        })
        .collect();

    let mut map = vec![0.0f32; w as usize * h as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            let mut weight = 0.0f32;
            for blob in &blobs {
                let dx = x as f32 - blob.cx;
                let dy = y as f32 - blob.cy;
                let d = ((dx / blob.rx).powi(2) + (dy / blob.ry).powi(2)).sqrt();
                if d < 1.0 {
                    let wgt = 1.0 - d;
                    acc += blob.v * wgt;
                    weight += wgt;
                }
            }
            let value = if weight > 0.0 { acc / weight } else { 0.0 };
            map[y as usize * w as usize + x as usize] = value.clamp(-intensity, intensity);
        }
    }
    map
}
