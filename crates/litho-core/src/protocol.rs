//! Host-to-worker message protocol.
//!
//! When the host and the pipeline run across a task boundary (§5), this
//! is the shape of the request and response. Within a single process
//! these types are plain data; nothing in this crate assumes any
//! particular transport.

use crate::{ActiveSet, ModuleParams, Raster};

/// Which scale a run renders at, and the debounce class the host uses to
/// collapse redundant requests of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskId {
    /// A bounded-size preview render.
    Preview,
    /// A full-resolution sample used for the loupe/magnifier.
    Loupe,
    /// A full-resolution, possibly-upscaled final render.
    Export,
}

impl TaskId {
    /// The lowercase name used on the wire and in presets/CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Loupe => "loupe",
            Self::Export => "export",
        }
    }
}

impl std::str::FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(Self::Preview),
            "loupe" => Ok(Self::Loupe),
            "export" => Ok(Self::Export),
            other => Err(format!("unknown task class '{other}'")),
        }
    }
}

/// Resample behavior for a run, per §4.0 and §6.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Whether this run targets export (enables upscale) or preview/loupe
    /// (enables the preview downscale cap).
    pub for_export: bool,
    /// Preview downscale cap: if `max(W,H) > previewMaxPx`, the source is
    /// downscaled so that `max(W',H') == previewMaxPx`.
    pub preview_max_px: u32,
    /// Integer upscale factor applied on export when `>= 2`.
    pub upscale: u32,
}

impl RenderOptions {
    /// Options for a bounded preview render.
    pub fn preview(preview_max_px: u32) -> Self {
        Self {
            for_export: false,
            preview_max_px,
            upscale: 1,
        }
    }

    /// Options for a full-resolution loupe sample (no resample either way).
    pub fn loupe() -> Self {
        Self {
            for_export: false,
            preview_max_px: u32::MAX,
            upscale: 1,
        }
    }

    /// Options for a final export render at the given upscale factor.
    pub fn export(upscale: u32) -> Self {
        Self {
            for_export: true,
            preview_max_px: u32::MAX,
            upscale: upscale.max(1),
        }
    }
}

/// A render request as the host would hand it to the worker.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Which task class this run belongs to.
    pub task_id: TaskId,
    /// The decoded source raster. Never mutated by the pipeline.
    pub source: Raster,
    /// Which optional modules are active.
    pub active: ActiveSet,
    /// Resolved module parameters.
    pub params: ModuleParams,
    /// Resample/upscale behavior for this run.
    pub options: RenderOptions,
}

/// A render response as the worker would hand back to the host.
#[derive(Debug, Clone)]
pub struct RenderResponse {
    /// Echoes the request's task class, so the host can match results to
    /// requests that may have been coalesced or reordered in flight.
    pub task_id: TaskId,
    /// The finished raster.
    pub result: Raster,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_roundtrips_through_str() {
        for t in [TaskId::Preview, TaskId::Loupe, TaskId::Export] {
            let parsed: TaskId = t.as_str().parse().unwrap();
            assert_eq!(parsed, t);
        }
    }

    #[test]
    fn unknown_task_class_is_rejected() {
        assert!("magnify".parse::<TaskId>().is_err());
    }

    #[test]
    fn export_options_clamp_upscale_to_at_least_one() {
        let opts = RenderOptions::export(0);
        assert_eq!(opts.upscale, 1);
        assert!(opts.for_export);
    }
}
