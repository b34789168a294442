//! # litho-stock
//!
//! The film-stock catalog (§3, §9) and the hex color parsing used for
//! ink, paper, and duotone colors (§6).
//!
//! # Usage
//!
//! ```rust
//! use litho_stock::{lookup, parse_hex_rgb, piecewise_smoothstep};
//!
//! let stock = lookup("kodachrome").unwrap();
//! let curve_value = piecewise_smoothstep(&stock.r, 0.5);
//! let paper = parse_hex_rgb("#f0ead8").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod catalog;
mod color;
mod curve;
mod error;

pub use catalog::{lookup, FilmStock, HalationSpec, DEFAULT_STOCK, STOCKS};
pub use color::{ink, parse_hex_rgb};
pub use curve::{piecewise_smoothstep, ControlPoints};
pub use error::{StockError, StockResult};
