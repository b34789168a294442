//! Error types for litho-core and downstream crates.
//!
//! This module provides a unified error taxonomy for the rendering
//! pipeline, covering malformed input, resource exhaustion, and internal
//! invariant violations. `ParameterMissing` is deliberately absent from
//! this enum: per policy it is not an error at all, it silently falls
//! back to documented defaults (see `litho-ops`'s parameter resolution).
//!
//! # Usage
//!
//! ```rust
//! use litho_core::{Error, Result};
//!
//! fn check(width: u32, height: u32) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_source("zero-dimension raster"));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a pipeline run.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
///
/// # Categories
///
/// - **Input errors**: [`InvalidSource`](Error::InvalidSource), [`ParameterOutOfRange`](Error::ParameterOutOfRange) — reject the run, caller returns the unchanged source.
/// - **Resource errors**: [`ResourceExhausted`](Error::ResourceExhausted) — fail the run, report to host.
/// - **Invariant violations**: [`InvariantViolation`](Error::InvariantViolation) — fatal, indicates a bug in a stage.
#[derive(Debug, Error)]
pub enum Error {
    /// The source raster is unusable: null, zero-dimension, or otherwise
    /// malformed.
    ///
    /// Policy: reject the run, return the unchanged source.
    #[error("invalid source raster: {reason}")]
    InvalidSource {
        /// Human-readable description of what was wrong with the source.
        reason: String,
    },

    /// A module parameter's value fell outside its documented range.
    ///
    /// Policy: reject the run, return the unchanged source. This is
    /// distinct from an *unknown* parameter, which is not an error at all
    /// (see the module's `ParameterMissing` handling).
    #[error("parameter {module}.{param} out of range: {value} (expected {expected})")]
    ParameterOutOfRange {
        /// Module id the parameter belongs to.
        module: String,
        /// Parameter id.
        param: String,
        /// The offending value, formatted for display.
        value: String,
        /// The documented valid range, formatted for display.
        expected: String,
    },

    /// A buffer allocation failed, typically because the requested raster
    /// is too large for available memory.
    ///
    /// Policy: fail the run, report to host.
    #[error("failed to allocate {requested} bytes for a {width}x{height} raster")]
    ResourceExhausted {
        /// Bytes requested.
        requested: usize,
        /// Raster width that triggered the allocation.
        width: u32,
        /// Raster height that triggered the allocation.
        height: u32,
    },

    /// A stage produced a raster with different dimensions than its
    /// input.
    ///
    /// Policy: fatal, abort the run. This should never be reachable in
    /// correct code; it exists to catch stage bugs via `debug_assert`.
    #[error("stage '{stage}' violated the dimension invariant: {in_w}x{in_h} -> {out_w}x{out_h}")]
    InvariantViolation {
        /// Name of the stage that broke the invariant.
        stage: String,
        /// Input width.
        in_w: u32,
        /// Input height.
        in_h: u32,
        /// Output width actually produced.
        out_w: u32,
        /// Output height actually produced.
        out_h: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidSource`] error.
    #[inline]
    pub fn invalid_source(reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ParameterOutOfRange`] error.
    #[inline]
    pub fn parameter_out_of_range(
        module: impl Into<String>,
        param: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::ParameterOutOfRange {
            module: module.into(),
            param: param.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Creates an [`Error::ResourceExhausted`] error.
    #[inline]
    pub fn resource_exhausted(requested: usize, width: u32, height: u32) -> Self {
        Self::ResourceExhausted {
            requested,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvariantViolation`] error.
    #[inline]
    pub fn invariant_violation(
        stage: impl Into<String>,
        input: (u32, u32),
        output: (u32, u32),
    ) -> Self {
        Self::InvariantViolation {
            stage: stage.into(),
            in_w: input.0,
            in_h: input.1,
            out_w: output.0,
            out_h: output.1,
        }
    }

    /// Returns `true` if the caller's policy is to return the unchanged
    /// source (input errors).
    #[inline]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidSource { .. } | Self::ParameterOutOfRange { .. })
    }

    /// Returns `true` if this is a resource error.
    #[inline]
    pub fn is_resource_error(&self) -> bool {
        matches!(self, Self::ResourceExhausted { .. })
    }

    /// Returns `true` if this is a fatal internal invariant violation.
    #[inline]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}
