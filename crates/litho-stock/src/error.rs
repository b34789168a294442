//! Error types for film-stock and color lookups.

use thiserror::Error;

/// Result type for stock/color operations.
pub type StockResult<T> = Result<T, StockError>;

/// Errors that can occur resolving a stock id or parsing a color.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    /// A stock id that isn't in the catalog.
    #[error("unknown film stock id: {0}")]
    UnknownStock(String),

    /// A `#rrggbb` string that doesn't parse.
    #[error("invalid hex color '{0}': {1}")]
    InvalidColor(String, String),
}
