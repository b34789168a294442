//! Module-parameter defaulting and validation (§6, §7).
//!
//! Two distinct policies meet here:
//! - an unrecognized module id or parameter id is `ParameterMissing`:
//!   silently ignored, falls back to the documented default;
//! - a *recognized* parameter whose value is outside its documented
//!   range is `ParameterOutOfRange`, an input error that aborts the run.
//!
//! [`validate`] implements the second policy; the `resolve_*` stage
//! structs implement the first by construction (anything not found, or
//! found with the wrong shape, silently falls back to its default).

use litho_core::{Error, ModuleParams, Result};
use tracing::debug;

fn get_f32(params: &ModuleParams, module: &str, param: &str, default: f32) -> f32 {
    match params.get(module, param).and_then(|v| v.as_f32()) {
        Some(v) => v,
        None => {
            debug!(module, param, default, "parameter missing or malformed, using default");
            default
        }
    }
}

fn get_i64(params: &ModuleParams, module: &str, param: &str, default: i64) -> i64 {
    match params.get(module, param).and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))) {
        Some(v) => v,
        None => {
            debug!(module, param, default, "parameter missing or malformed, using default");
            default
        }
    }
}

fn get_bool(params: &ModuleParams, module: &str, param: &str, default: bool) -> bool {
    match params.get(module, param).and_then(|v| v.as_bool()) {
        Some(v) => v,
        None => {
            debug!(module, param, default, "parameter missing or malformed, using default");
            default
        }
    }
}

fn get_str<'a>(params: &'a ModuleParams, module: &str, param: &str, default: &'a str) -> &'a str {
    match params.get(module, param).and_then(|v| v.as_str()) {
        Some(v) => v,
        None => {
            debug!(module, param, default, "parameter missing or malformed, using default");
            default
        }
    }
}

fn check_range_f32(module: &str, param: &str, value: f32, lo: f32, hi: f32) -> Result<()> {
    if value < lo || value > hi {
        return Err(Error::parameter_out_of_range(
            module,
            param,
            value.to_string(),
            format!("[{lo}, {hi}]"),
        ));
    }
    Ok(())
}

fn check_range_i64(module: &str, param: &str, value: i64, lo: i64, hi: i64) -> Result<()> {
    if value < lo || value > hi {
        return Err(Error::parameter_out_of_range(
            module,
            param,
            value.to_string(),
            format!("[{lo}, {hi}]"),
        ));
    }
    Ok(())
}

fn check_enum(module: &str, param: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(Error::parameter_out_of_range(
            module,
            param,
            value.to_string(),
            format!("one of {allowed:?}"),
        ));
    }
    Ok(())
}

/// Validates every *recognized* parameter present in `params` against its
/// documented range (§6). Unrecognized modules/params are not visited
/// here — they fall back to defaults silently wherever they're read.
///
/// # Errors
///
/// Returns [`Error::ParameterOutOfRange`] on the first violation found.
pub fn validate(params: &ModuleParams) -> Result<()> {
    macro_rules! f {
        ($module:expr, $param:expr, $lo:expr, $hi:expr) => {
            if let Some(v) = params.get($module, $param).and_then(|v| v.as_f32()) {
                check_range_f32($module, $param, v, $lo, $hi)?;
            }
        };
    }
    macro_rules! i {
        ($module:expr, $param:expr, $lo:expr, $hi:expr) => {
            if let Some(v) = params
                .get($module, $param)
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            {
                check_range_i64($module, $param, v, $lo, $hi)?;
            }
        };
    }
    macro_rules! e {
        ($module:expr, $param:expr, $allowed:expr) => {
            if let Some(v) = params.get($module, $param).and_then(|v| v.as_str()) {
                check_enum($module, $param, v, $allowed)?;
            }
        };
    }

    e!("filmstock", "stock", &["trix", "hp5", "kodachrome", "portra", "ektachrome"]);
    f!("filmstock", "exposure", -2.0, 2.0);
    f!("filmstock", "halation", 0.0, 1.0);
    f!("filmstock", "fade", 0.0, 1.0);

    f!("velox", "threshold", 0.1, 0.9);
    f!("velox", "contrast", 1.0, 3.0);

    f!("grain", "amount", 0.0, 0.5);

    e!("halftone", "mode", &["bw", "duotone", "cmyk"]);
    i!("halftone", "cellSize", 3, 24);
    e!("halftone", "dotShape", &["circle", "diamond", "line"]);
    i!("halftone", "masterAngle", 0, 179);
    i!("halftone", "angleK", 0, 179);
    i!("halftone", "angleC", 0, 179);
    i!("halftone", "angleM", 0, 179);
    i!("halftone", "angleY", 0, 179);

    e!("press", "feed", &["vertical", "horizontal"]);
    e!("press", "laydown", &["k-c-m-y", "y-m-c-k", "c-m-y-k", "m-c-y-k"]);
    f!("press", "pressure", 0.1, 1.0);
    f!("press", "slur", 0.0, 0.5);

    f!("dotgain", "amount", 0.0, 1.0);
    f!("dotgain", "shadow", 0.0, 1.0);

    for c in ["cx", "cy", "mx", "my", "yx", "yy"] {
        f!("registration", c, -15.0, 15.0);
    }
    f!("registration", "fanout", 0.0, 10.0);

    f!("inkskip", "intensity", 0.0, 1.0);
    f!("inkskip", "scale", 0.05, 1.0);

    f!("paper", "texture", 0.0, 0.5);
    f!("paper", "fibers", 0.0, 0.5);

    i!("inkbleed", "radius", 1, 16);
    f!("inkbleed", "absorbency", 0.0, 1.0);
    f!("inkbleed", "directionality", 0.0, 1.0);

    i!("hickeys", "count", 1, 100);
    i!("hickeys", "sizeMax", 3, 30);

    Ok(())
}

/// Resolved `filmstock` parameters.
#[derive(Debug, Clone)]
pub struct FilmStockParams {
    /// Catalog stock id.
    pub stock: String,
    /// Exposure compensation in stops.
    pub exposure: f32,
    /// Halation bloom strength.
    pub halation: f32,
    /// Fade amount.
    pub fade: f32,
}

impl FilmStockParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            stock: get_str(params, "filmstock", "stock", "kodachrome").to_string(),
            exposure: get_f32(params, "filmstock", "exposure", 0.0),
            halation: get_f32(params, "filmstock", "halation", 0.5),
            fade: get_f32(params, "filmstock", "fade", 0.0),
        }
    }
}

/// Resolved `velox` parameters.
#[derive(Debug, Clone, Copy)]
pub struct VeloxParams {
    /// Sigmoid threshold.
    pub threshold: f32,
    /// Sigmoid contrast.
    pub contrast: f32,
}

impl VeloxParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            threshold: get_f32(params, "velox", "threshold", 0.5),
            contrast: get_f32(params, "velox", "contrast", 1.5),
        }
    }
}

/// Resolved `grain` parameters.
#[derive(Debug, Clone, Copy)]
pub struct GrainParams {
    /// Noise amount.
    pub amount: f32,
    /// Whether the noise is luminance-weighted.
    pub weighted: bool,
}

impl GrainParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            amount: get_f32(params, "grain", "amount", 0.12),
            weighted: get_bool(params, "grain", "weighted", true),
        }
    }
}

/// Halftone rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalftoneMode {
    /// Single black (or duotone-1) plate.
    Bw,
    /// Two plates.
    Duotone,
    /// Four-plate process color.
    Cmyk,
}

/// Halftone dot shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotShape {
    /// Filled disk.
    Circle,
    /// Filled quadrilateral.
    Diamond,
    /// Rotated filled rectangle.
    Line,
}

/// Press feed direction, shared by halftone fan-out, ink-skip, ink bleed,
/// and paper fibers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedDir {
    /// Sheet feeds along the vertical axis.
    Vertical,
    /// Sheet feeds along the horizontal axis.
    Horizontal,
}

/// Resolved `halftone` parameters.
#[derive(Debug, Clone)]
pub struct HalftoneParams {
    /// Rendering mode.
    pub mode: HalftoneMode,
    /// Screen cell size, in pixels.
    pub cell_size: u32,
    /// Dot shape.
    pub dot_shape: DotShape,
    /// Paper background color.
    pub paper_color: [u8; 3],
    /// Master angle offset added to every plate's angle.
    pub master_angle: i32,
    /// Plate angle for K (or duotone plate 1).
    pub angle_k: i32,
    /// Plate angle for C (or duotone plate 2).
    pub angle_c: i32,
    /// Plate angle for M.
    pub angle_m: i32,
    /// Plate angle for Y.
    pub angle_y: i32,
    /// Duotone ink color 1.
    pub duotone_color1: [u8; 3],
    /// Duotone ink color 2.
    pub duotone_color2: [u8; 3],
}

impl HalftoneParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        let mode = match get_str(params, "halftone", "mode", "cmyk") {
            "bw" => HalftoneMode::Bw,
            "duotone" => HalftoneMode::Duotone,
            _ => HalftoneMode::Cmyk,
        };
        let dot_shape = match get_str(params, "halftone", "dotShape", "circle") {
            "diamond" => DotShape::Diamond,
            "line" => DotShape::Line,
            _ => DotShape::Circle,
        };
        let paper_color = litho_stock::parse_hex_rgb(get_str(params, "halftone", "paperColor", "#f0ead8"))
            .unwrap_or([0xf0, 0xea, 0xd8]);
        let duotone_color1 = litho_stock::parse_hex_rgb(get_str(params, "halftone", "duotoneColor1", "#100c08"))
            .unwrap_or(litho_stock::ink::BLACK);
        let duotone_color2 = litho_stock::parse_hex_rgb(get_str(params, "halftone", "duotoneColor2", "#009fce"))
            .unwrap_or(litho_stock::ink::CYAN);
        Self {
            mode,
            cell_size: get_i64(params, "halftone", "cellSize", 10).clamp(3, 24) as u32,
            dot_shape,
            paper_color,
            master_angle: get_i64(params, "halftone", "masterAngle", 0) as i32,
            angle_k: get_i64(params, "halftone", "angleK", 45) as i32,
            angle_c: get_i64(params, "halftone", "angleC", 15) as i32,
            angle_m: get_i64(params, "halftone", "angleM", 75) as i32,
            angle_y: get_i64(params, "halftone", "angleY", 90) as i32,
            duotone_color1,
            duotone_color2,
        }
    }
}

/// Resolved `press` parameters.
#[derive(Debug, Clone)]
pub struct PressParams {
    /// Sheet feed direction.
    pub feed: FeedDir,
    /// Plate laydown order, e.g. `"k-c-m-y"`.
    pub laydown: String,
    /// Platen pressure.
    pub pressure: f32,
    /// Dot slur amount.
    pub slur: f32,
}

impl PressParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        let feed = match get_str(params, "press", "feed", "vertical") {
            "horizontal" => FeedDir::Horizontal,
            _ => FeedDir::Vertical,
        };
        Self {
            feed,
            laydown: get_str(params, "press", "laydown", "k-c-m-y").to_string(),
            pressure: get_f32(params, "press", "pressure", 1.0),
            slur: get_f32(params, "press", "slur", 0.0),
        }
    }
}

/// Resolved `dotgain` parameters.
#[derive(Debug, Clone, Copy)]
pub struct DotGainParams {
    /// Dot gain amount.
    pub amount: f32,
    /// Shadow-region fill strength.
    pub shadow: f32,
}

impl DotGainParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            amount: get_f32(params, "dotgain", "amount", 0.25),
            shadow: get_f32(params, "dotgain", "shadow", 0.3),
        }
    }
}

/// Resolved `registration` parameters.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationParams {
    /// Cyan plate offset, in pixels.
    pub cx: f32,
    /// Cyan plate offset, in pixels.
    pub cy: f32,
    /// Magenta plate offset, in pixels.
    pub mx: f32,
    /// Magenta plate offset, in pixels.
    pub my: f32,
    /// Yellow plate offset, in pixels.
    pub yx: f32,
    /// Yellow plate offset, in pixels.
    pub yy: f32,
    /// Fan-out stretch, in pixels.
    pub fanout: f32,
}

impl RegistrationParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            cx: get_f32(params, "registration", "cx", 0.0),
            cy: get_f32(params, "registration", "cy", 0.0),
            mx: get_f32(params, "registration", "mx", 0.0),
            my: get_f32(params, "registration", "my", 0.0),
            yx: get_f32(params, "registration", "yx", 0.0),
            yy: get_f32(params, "registration", "yy", 0.0),
            fanout: get_f32(params, "registration", "fanout", 0.0),
        }
    }

    /// Registration offset for plate `k` (K/bw/duotone-1 is never offset).
    pub fn offset_for(&self, ink: char) -> (f32, f32) {
        match ink {
            'c' => (self.cx, self.cy),
            'm' => (self.mx, self.my),
            'y' => (self.yx, self.yy),
            _ => (0.0, 0.0),
        }
    }
}

/// Resolved `inkskip` parameters.
#[derive(Debug, Clone, Copy)]
pub struct InkSkipParams {
    /// Skip intensity.
    pub intensity: f32,
    /// Blob scale.
    pub scale: f32,
}

impl InkSkipParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            intensity: get_f32(params, "inkskip", "intensity", 0.3),
            scale: get_f32(params, "inkskip", "scale", 0.4),
        }
    }
}

/// Resolved `paper` parameters.
#[derive(Debug, Clone, Copy)]
pub struct PaperParams {
    /// Base texture noise amount.
    pub texture: f32,
    /// Fiber density.
    pub fibers: f32,
}

impl PaperParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            texture: get_f32(params, "paper", "texture", 0.15),
            fibers: get_f32(params, "paper", "fibers", 0.05),
        }
    }
}

/// Resolved `inkbleed` parameters.
#[derive(Debug, Clone, Copy)]
pub struct InkBleedParams {
    /// Kernel radius, in pixels.
    pub radius: u32,
    /// Paper absorbency.
    pub absorbency: f32,
    /// Directionality of the wicking.
    pub directionality: f32,
}

impl InkBleedParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            radius: get_i64(params, "inkbleed", "radius", 3).clamp(1, 16) as u32,
            absorbency: get_f32(params, "inkbleed", "absorbency", 0.8),
            directionality: get_f32(params, "inkbleed", "directionality", 0.7),
        }
    }
}

/// Resolved `hickeys` parameters.
#[derive(Debug, Clone, Copy)]
pub struct HickeysParams {
    /// Number of defects per plate.
    pub count: u32,
    /// Maximum outer radius.
    pub size_max: u32,
}

impl HickeysParams {
    /// Resolves from a parameter bundle, falling back to documented defaults.
    pub fn resolve(params: &ModuleParams) -> Self {
        Self {
            count: get_i64(params, "hickeys", "count", 12).clamp(1, 100) as u32,
            size_max: get_i64(params, "hickeys", "sizeMax", 8).clamp(3, 30) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        let params = ModuleParams::new();
        let fs = FilmStockParams::resolve(&params);
        assert_eq!(fs.stock, "kodachrome");
        assert_eq!(fs.exposure, 0.0);
        assert_eq!(fs.halation, 0.5);

        let velox = VeloxParams::resolve(&params);
        assert_eq!(velox.threshold, 0.5);
        assert_eq!(velox.contrast, 1.5);

        let grain = GrainParams::resolve(&params);
        assert_eq!(grain.amount, 0.12);
        assert!(grain.weighted);

        let halftone = HalftoneParams::resolve(&params);
        assert_eq!(halftone.mode, HalftoneMode::Cmyk);
        assert_eq!(halftone.cell_size, 10);

        let press = PressParams::resolve(&params);
        assert_eq!(press.feed, FeedDir::Vertical);
        assert_eq!(press.laydown, "k-c-m-y");
    }

    #[test]
    fn unknown_param_falls_back_silently() {
        let mut params = ModuleParams::new();
        params.set("velox", "nonexistent", 5.0f32);
        assert!(validate(&params).is_ok());
    }

    #[test]
    fn out_of_range_known_param_is_rejected() {
        let mut params = ModuleParams::new();
        params.set("velox", "threshold", 5.0f32);
        let err = validate(&params).unwrap_err();
        assert!(matches!(err, Error::ParameterOutOfRange { .. }));
    }

    #[test]
    fn out_of_range_enum_is_rejected() {
        let mut params = ModuleParams::new();
        params.set("halftone", "mode", "rgb");
        assert!(validate(&params).is_err());
    }

    #[test]
    fn in_range_values_pass() {
        let mut params = ModuleParams::new();
        params.set("velox", "threshold", 0.7f32);
        params.set("halftone", "cellSize", 12i64);
        assert!(validate(&params).is_ok());
    }
}
