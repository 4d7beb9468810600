//! Engine configuration
//!
//! Values come from defaults, then the environment, then whatever the
//! caller overrides. [`EngineConfig::validate`] runs before any grid is built.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_COLUMNS, DEFAULT_ROWS, INITIAL_DROP_MS, MAX_COLUMNS, MAX_ROWS, PIECE_BOX_SIZE,
};

/// Environment variable overriding the column count
pub const ENV_COLUMNS: &str = "BLOCKFALL_COLUMNS";
/// Environment variable overriding the row count
pub const ENV_ROWS: &str = "BLOCKFALL_ROWS";
/// Environment variable overriding the initial drop interval
pub const ENV_DROP_MS: &str = "BLOCKFALL_DROP_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub columns: u16,
    pub rows: u16,
    pub drop_interval_ms: u32,
}

impl EngineConfig {
    /// Defaults: 10x16 grid, 500ms gravity
    pub fn new() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            drop_interval_ms: INITIAL_DROP_MS,
        }
    }

    /// Create from environment variables, falling back to defaults for unset ones.
    ///
    /// A set but unparsable variable is an error rather than a silent default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::new();
        let config = Self {
            columns: env_or(ENV_COLUMNS, defaults.columns)?,
            rows: env_or(ENV_ROWS, defaults.rows)?,
            drop_interval_ms: env_or(ENV_DROP_MS, defaults.drop_interval_ms)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check dimensions and timing.
    ///
    /// Grids narrower or shorter than the 4x4 piece box are rejected, since
    /// boundary correction could never settle a piece inside them. Grids
    /// wider than [`MAX_COLUMNS`] or taller than [`MAX_ROWS`] are rejected too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.columns, self.rows)?;
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_dimensions(columns: u16, rows: u16) -> Result<(), ConfigError> {
    if columns < PIECE_BOX_SIZE {
        return Err(ConfigError::TooFewColumns {
            min: PIECE_BOX_SIZE,
            got: columns,
        });
    }
    if rows < PIECE_BOX_SIZE {
        return Err(ConfigError::TooFewRows {
            min: PIECE_BOX_SIZE,
            got: rows,
        });
    }
    if columns > MAX_COLUMNS {
        return Err(ConfigError::TooManyColumns {
            max: MAX_COLUMNS,
            got: columns,
        });
    }
    if rows > MAX_ROWS {
        return Err(ConfigError::TooManyRows {
            max: MAX_ROWS,
            got: rows,
        });
    }
    Ok(())
}

fn env_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(default);
            }
            trimmed
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { var, value: raw })
        }
        Err(_) => Ok(default),
    }
}
