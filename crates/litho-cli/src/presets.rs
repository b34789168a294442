//! Bundled presets (§10.4).
//!
//! Plain Rust data, not parsed config files — persistence is a host
//! concern the core pipeline doesn't carry (§1).

use litho_core::ModuleParams;

/// Looks up a bundled preset by name.
pub fn lookup(name: &str) -> Option<ModuleParams> {
    match name {
        "trix-bw" => Some(trix_bw()),
        "duotone-news" => Some(duotone_news()),
        "cmyk-glossy" => Some(cmyk_glossy()),
        "faded-polaroid" => Some(faded_polaroid()),
        _ => None,
    }
}

/// The names of every bundled preset, for `--help` text and CLI validation.
pub const NAMES: &[&str] = &["trix-bw", "duotone-news", "cmyk-glossy", "faded-polaroid"];

fn trix_bw() -> ModuleParams {
    let mut p = ModuleParams::new();
    p.set("filmstock", "stock", "trix");
    p.set("filmstock", "exposure", 0.3f32);
    p.set("filmstock", "halation", 0.2f32);
    p.set("halftone", "mode", "bw");
    p.set("halftone", "dotShape", "circle");
    p.set("halftone", "cellSize", 8i64);
    p.set("press", "laydown", "k-c-m-y");
    p.set("dotgain", "amount", 0.3f32);
    p
}

fn duotone_news() -> ModuleParams {
    let mut p = ModuleParams::new();
    p.set("filmstock", "stock", "hp5");
    p.set("halftone", "mode", "duotone");
    p.set("halftone", "duotoneColor1", "#1a1511");
    p.set("halftone", "duotoneColor2", "#2b5c8a");
    p.set("halftone", "cellSize", 6i64);
    p.set("dotgain", "amount", 0.4f32);
    p.set("dotgain", "shadow", 0.5f32);
    p.set("paper", "texture", 0.25f32);
    p.set("paper", "fibers", 0.1f32);
    p
}

fn cmyk_glossy() -> ModuleParams {
    let mut p = ModuleParams::new();
    p.set("filmstock", "stock", "kodachrome");
    p.set("halftone", "mode", "cmyk");
    p.set("halftone", "cellSize", 12i64);
    p.set("dotgain", "amount", 0.2f32);
    p.set("inkbleed", "radius", 2i64);
    p.set("inkbleed", "absorbency", 0.3f32);
    p.set("paper", "texture", 0.05f32);
    p
}

fn faded_polaroid() -> ModuleParams {
    let mut p = ModuleParams::new();
    p.set("filmstock", "stock", "ektachrome");
    p.set("filmstock", "fade", 0.6f32);
    p.set("filmstock", "halation", 0.6f32);
    p.set("grain", "amount", 0.2f32);
    p.set("grain", "weighted", true);
    p.set("halftone", "mode", "cmyk");
    p.set("halftone", "cellSize", 14i64);
    p.set("paper", "texture", 0.2f32);
    p.set("paper", "fibers", 0.15f32);
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in NAMES {
            assert!(lookup(name).is_some(), "{name} should resolve");
        }
    }

    #[test]
    fn unknown_preset_is_none() {
        assert!(lookup("not-a-preset").is_none());
    }
}
