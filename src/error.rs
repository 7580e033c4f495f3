//! Error types for map generation and configuration.

use thiserror::Error;

/// Failure of a single generation call. No partial raster is ever returned
/// alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    /// Grid-producing operation asked for an empty grid.
    #[error("invalid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimension { width: usize, height: usize },

    /// A generation or blur parameter is outside its valid range.
    #[error("invalid parameter `{name}` = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A NaN or infinite value reached a stage that must not silently clamp it.
    #[error("numeric anomaly in {stage}: {value}")]
    NumericAnomaly { stage: &'static str, value: f64 },

    /// Biome bands are malformed or overlap.
    #[error("invalid biome table: {0}")]
    InvalidBiomeTable(String),
}

impl GenError {
    pub(crate) fn param(name: &'static str, value: impl Into<f64>) -> Self {
        Self::InvalidParameter { name, value: value.into() }
    }
}

/// Failure while loading or saving a [`crate::config::MapConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] GenError),
}
