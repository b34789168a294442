//! The film-stock catalog.
//!
//! Treated as static configuration, not code (§9): every entry is a
//! `const` value built into the binary, not parsed from a file. Adding a
//! new stock means adding an array entry here, not writing a parser.

use crate::curve::ControlPoints;
use crate::{StockError, StockResult};

/// Halation bloom parameters for a stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalationSpec {
    /// Separable box blur radius, in pixels, for the bloom (§4.1 step 2).
    pub radius: usize,
    /// Per-channel tint applied to the bloom before adding it back.
    pub tint: [f32; 3],
    /// The stock's overall halation strength multiplier.
    pub strength: f32,
}

/// One entry in the film-stock catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmStock {
    /// The catalog key, e.g. `"kodachrome"`.
    pub id: &'static str,
    /// Red channel response curve control points.
    pub r: ControlPoints,
    /// Green channel response curve control points.
    pub g: ControlPoints,
    /// Blue channel response curve control points.
    pub b: ControlPoints,
    /// Saturation scalar applied after the response curves (color stocks only).
    pub saturation: f32,
    /// `Some(weights)` for black-and-white stocks, where `weights` are the
    /// `[wR, wG, wB]` luminance mix used by §4.1 step 4.
    pub bw_weights: Option<[f32; 3]>,
    /// Halation bloom parameters.
    pub halation: HalationSpec,
}

impl FilmStock {
    /// `true` for black-and-white stocks.
    #[inline]
    pub fn is_bw(&self) -> bool {
        self.bw_weights.is_some()
    }
}

const LINEAR: ControlPoints = [0.0, 0.25, 0.5, 0.75, 1.0];

/// The five recognized stock ids.
pub const STOCKS: &[FilmStock] = &[
    FilmStock {
        id: "trix",
        r: [0.0, 0.22, 0.52, 0.80, 1.0],
        g: [0.0, 0.22, 0.52, 0.80, 1.0],
        b: [0.0, 0.22, 0.52, 0.80, 1.0],
        saturation: 0.0,
        bw_weights: Some([0.35, 0.50, 0.15]),
        halation: HalationSpec {
            radius: 8,
            tint: [1.0, 0.95, 0.85],
            strength: 0.3,
        },
    },
    FilmStock {
        id: "hp5",
        r: [0.0, 0.20, 0.48, 0.78, 1.0],
        g: [0.0, 0.20, 0.48, 0.78, 1.0],
        b: [0.0, 0.20, 0.48, 0.78, 1.0],
        saturation: 0.0,
        bw_weights: Some([0.30, 0.55, 0.15]),
        halation: HalationSpec {
            radius: 10,
            tint: [1.0, 0.92, 0.80],
            strength: 0.35,
        },
    },
    FilmStock {
        id: "kodachrome",
        r: [0.0, 0.23, 0.50, 0.77, 1.0],
        g: [0.0, 0.24, 0.51, 0.78, 1.0],
        b: [0.0, 0.20, 0.47, 0.76, 1.0],
        saturation: 1.25,
        bw_weights: None,
        halation: HalationSpec {
            radius: 6,
            tint: [1.0, 0.55, 0.2],
            strength: 0.45,
        },
    },
    FilmStock {
        id: "portra",
        r: LINEAR,
        g: [0.0, 0.26, 0.5, 0.74, 1.0],
        b: [0.0, 0.22, 0.48, 0.76, 1.0],
        saturation: 0.9,
        bw_weights: None,
        halation: HalationSpec {
            radius: 7,
            tint: [1.0, 0.75, 0.55],
            strength: 0.25,
        },
    },
    FilmStock {
        id: "ektachrome",
        r: [0.0, 0.24, 0.49, 0.76, 1.0],
        g: [0.0, 0.25, 0.5, 0.77, 1.0],
        b: [0.0, 0.27, 0.53, 0.80, 1.0],
        saturation: 1.15,
        bw_weights: None,
        halation: HalationSpec {
            radius: 5,
            tint: [0.6, 0.75, 1.0],
            strength: 0.2,
        },
    },
];

/// Looks up a stock by id.
///
/// # Errors
///
/// Returns [`StockError::UnknownStock`] if `id` isn't in [`STOCKS`].
pub fn lookup(id: &str) -> StockResult<&'static FilmStock> {
    STOCKS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| StockError::UnknownStock(id.to_string()))
}

/// The default stock id, `"kodachrome"` (§6).
pub const DEFAULT_STOCK: &str = "kodachrome";
