//! # litho-ops
//!
//! The press-simulation pipeline itself: parameter defaulting and
//! validation, the seven ordered stages, the `render` entry point, and
//! the sequential FIFO worker that runs it off the host's thread.
//!
//! # Modules
//!
//! - [`params`] — per-module parameter resolution and range validation
//! - [`stages`] — the seven pipeline stages, in execution order
//! - [`render`] — the core `render(source, active, params, options)` entry point
//! - [`worker`] — a background thread that runs `render` on queued requests
//! - [`resize`] and [`filter`] — shared resampling and convolution utilities
//!   the stages are built on
//!
//! # Example
//!
//! ```rust
//! use litho_core::{ActiveSet, ModuleParams, Raster, RenderOptions};
//! use litho_ops::render::render;
//!
//! let source = Raster::filled(64, 64, [180, 120, 90, 255]);
//! let active = ActiveSet::from_ids(["filmstock", "grain"]);
//! let params = ModuleParams::new();
//! let options = RenderOptions::loupe();
//! let result = render(&source, &active, &params, &options).unwrap();
//! assert_eq!(result.dimensions(), (64, 64));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod params;
pub mod render;
pub mod resize;
pub mod stages;
pub mod worker;

pub use error::{OpsError, OpsResult};
pub use resize::Filter;
