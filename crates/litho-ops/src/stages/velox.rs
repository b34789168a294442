//! §4.2 Velox — high-contrast sigmoid crush to grayscale.

use crate::params::VeloxParams;
use litho_core::{luminance_rec601, Raster, Result};
use litho_math::Lut8;

/// Runs the velox stage.
pub fn velox(source: &Raster, params: &VeloxParams) -> Result<Raster> {
    let (w, h) = source.dimensions();
    let lut = Lut8::build(|t| {
        1.0 / (1.0 + (-10.0 * params.contrast * (t - params.threshold)).exp())
    });

    let mut out = source.data().to_vec();
    for i in 0..(w as usize * h as usize) {
        let base = i * 4;
        let l = luminance_rec601(out[base], out[base + 1], out[base + 2]);
        let v = lut.apply(l.round().clamp(0.0, 255.0) as u8);
        out[base] = v;
        out[base + 1] = v;
        out[base + 2] = v;
    }
    Raster::from_raw(w, h, out)
}
