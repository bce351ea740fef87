//! Error types for building a simulation.

use thiserror::Error;

/// Errors raised while validating or loading a [`SimConfig`](crate::SimConfig).
///
/// The frame step itself never fails; every degenerate parameter that could
/// feed NaNs into it is rejected here instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A quantity that must be strictly positive (mass, length, rate).
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A quantity that may be zero but not negative (drag, friction).
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Wall has no blocks.
    #[error("wall must have at least one row and one column, got {rows}x{columns}")]
    EmptyWall {
        /// Row count.
        rows: usize,
        /// Column count.
        columns: usize,
    },

    /// Wall block count overflows or exceeds [`MAX_WALL_BLOCKS`](crate::consts::MAX_WALL_BLOCKS).
    #[error("wall of {rows}x{columns} blocks is too large")]
    WallTooLarge {
        /// Row count.
        rows: usize,
        /// Column count.
        columns: usize,
    },

    /// Position or offset that is NaN or infinite.
    #[error("{name} must be finite")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
    },

    /// Unrecognized preset name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config JSON could not be parsed.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Check that `value` is finite and strictly positive.
    pub fn require_positive(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NotPositive { name, value })
        }
    }

    /// Check that `value` is finite and not negative.
    pub fn require_non_negative(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(Self::Negative { name, value })
        }
    }

    /// Check that every component of a vector is finite.
    pub fn require_finite(name: &'static str, value: glam::DVec3) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFinite { name })
        }
    }
}
