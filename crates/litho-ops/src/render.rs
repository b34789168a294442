//! The core entry point (§6): `render(source, active, params, options)`.
//!
//! Runs the seven stages in their fixed order, skipping any whose module
//! id is absent from `active` (resample, halftone, and press have no
//! "disabled" state and always run — §3). Validates every recognized
//! parameter before any stage executes; a single out-of-range value
//! aborts the whole run and the caller gets back the error, never a
//! partially-rendered raster.

use crate::params::{
    validate, DotGainParams, FilmStockParams, GrainParams, HalftoneParams, HickeysParams,
    InkBleedParams, InkSkipParams, PaperParams, PressParams, RegistrationParams, VeloxParams,
};
use crate::stages;
use litho_core::{ActiveSet, ModuleParams, Raster, RenderOptions, Result};

/// Runs the full press-simulation pipeline on `source`.
///
/// # Errors
///
/// Returns an error (and never a partial raster) if any recognized
/// parameter is out of its documented range, if a stage's output would
/// not preserve the input's dimensions, or if a stage otherwise fails.
pub fn render(source: &Raster, active: &ActiveSet, params: &ModuleParams, options: &RenderOptions) -> Result<Raster> {
    if source.is_empty() {
        return Err(litho_core::Error::invalid_source("empty source raster"));
    }
    validate(params)?;

    let input_dims = source.dimensions();
    let mut buf = stages::resample(source, options)?;
    let dims_after_resample = buf.dimensions();

    if active.contains("filmstock") {
        let p = FilmStockParams::resolve(params);
        buf = run_stage("filmstock", dims_after_resample, stages::film_stock(&buf, &p)?)?;
    }
    if active.contains("velox") {
        let p = VeloxParams::resolve(params);
        buf = run_stage("velox", dims_after_resample, stages::velox(&buf, &p)?)?;
    }
    if active.contains("grain") {
        let p = GrainParams::resolve(params);
        buf = run_stage("grain", dims_after_resample, stages::grain(&buf, &p)?)?;
    }

    let halftone_params = HalftoneParams::resolve(params);
    let dotgain = if active.contains("dotgain") {
        DotGainParams::resolve(params)
    } else {
        DotGainParams { amount: 0.0, shadow: 0.0 }
    };
    let registration = if active.contains("registration") {
        RegistrationParams::resolve(params)
    } else {
        RegistrationParams { cx: 0.0, cy: 0.0, mx: 0.0, my: 0.0, yx: 0.0, yy: 0.0, fanout: 0.0 }
    };
    let press = PressParams::resolve(params);
    let inkskip = active.contains("inkskip").then(|| InkSkipParams::resolve(params));
    let hickeys = active.contains("hickeys").then(|| HickeysParams::resolve(params));
    let ctx = stages::HalftoneContext {
        halftone: &halftone_params,
        dotgain: &dotgain,
        registration: &registration,
        press: &press,
        inkskip: inkskip.as_ref(),
        hickeys: hickeys.as_ref(),
    };
    buf = run_stage("halftone", dims_after_resample, stages::halftone(&buf, &ctx)?)?;

    if active.contains("inkbleed") {
        let p = InkBleedParams::resolve(params);
        buf = run_stage("inkbleed", dims_after_resample, stages::ink_bleed(&buf, halftone_params.paper_color, press.feed, &p)?)?;
    }
    if active.contains("papertooth") {
        let p = PaperParams::resolve(params);
        let map = stages::build_paper_map(dims_after_resample.0, dims_after_resample.1, press.feed, &p);
        buf = run_stage(
            "papertooth",
            dims_after_resample,
            stages::apply_paper_tooth(&buf, &map, halftone_params.paper_color, p.texture, press.pressure)?,
        )?;
    }

    let _ = input_dims;
    Ok(buf)
}

fn run_stage(stage: &str, expected: (u32, u32), out: Raster) -> Result<Raster> {
    if out.dimensions() != expected {
        return Err(litho_core::Error::invariant_violation(stage, expected, out.dimensions()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_active_set_still_runs_halftone() {
        let source = Raster::filled(20, 20, [128, 64, 200, 255]);
        let active = ActiveSet::new();
        let params = ModuleParams::new();
        let options = RenderOptions::loupe();
        let out = render(&source, &active, &params, &options).unwrap();
        assert_eq!(out.dimensions(), (20, 20));
    }

    #[test]
    fn full_pipeline_preserves_dimensions() {
        let source = Raster::filled(24, 16, [200, 120, 80, 255]);
        let active = ActiveSet::from_ids(["filmstock", "velox", "grain", "inkbleed", "papertooth"]);
        let params = ModuleParams::new();
        let options = RenderOptions::preview(512);
        let out = render(&source, &active, &params, &options).unwrap();
        assert_eq!(out.dimensions(), (24, 16));
    }

    #[test]
    fn out_of_range_parameter_aborts_before_any_stage_runs() {
        let source = Raster::filled(8, 8, [10, 10, 10, 255]);
        let active = ActiveSet::new();
        let mut params = ModuleParams::new();
        params.set("velox", "threshold", 99.0f32);
        let options = RenderOptions::loupe();
        let err = render(&source, &active, &params, &options).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn empty_source_is_rejected() {
        let source = Raster::new(0, 0);
        // Raster::new(0, 0) builds fine (zero-length buffer); is_empty() catches it.
        let active = ActiveSet::new();
        let params = ModuleParams::new();
        let options = RenderOptions::loupe();
        let err = render(&source, &active, &params, &options).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn resample_changes_dimensions_on_export() {
        let source = Raster::filled(10, 10, [50, 60, 70, 255]);
        let active = ActiveSet::new();
        let params = ModuleParams::new();
        let options = RenderOptions::export(2);
        let out = render(&source, &active, &params, &options).unwrap();
        assert_eq!(out.dimensions(), (20, 20));
    }
}
