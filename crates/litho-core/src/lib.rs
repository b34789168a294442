//! # litho-core
//!
//! Foundation types for the press-simulation pipeline: the [`Raster`]
//! image buffer, the module-parameter bundle ([`ModuleParams`],
//! [`ActiveSet`]), the host/worker message protocol ([`TaskId`],
//! [`RenderRequest`], [`RenderResponse`], [`RenderOptions`]), and the
//! unified [`Error`]/[`Result`] type.
//!
//! This crate has no knowledge of any individual pipeline stage; stage
//! logic lives in `litho-ops`.
//!
//! ## Crate structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies:
//!
//! ```text
//! litho-core (this crate)
//!    ^
//!    |
//!    +-- litho-math (PRNG, LUTs, interpolation, blur)
//!    +-- litho-stock (film-stock catalog)
//!    +-- litho-ops (stage implementations, render())
//!    +-- litho-cli (the Host)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod params;
mod protocol;
mod raster;

pub use error::{Error, Result};
pub use params::{ActiveSet, ModuleParams, ParamValue};
pub use protocol::{RenderOptions, RenderRequest, RenderResponse, TaskId};
pub use raster::{luminance_rec601, Raster};
