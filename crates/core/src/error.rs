//! Error types for engine construction and configuration.
//!
//! Gameplay never errors: a refused move or rotation is a `false` return.
//! Only building a playfield or session from bad dimensions or timings fails.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("playfield needs at least {min} columns, got {got}")]
    TooFewColumns { min: u16, got: u16 },

    #[error("playfield needs at least {min} rows, got {got}")]
    TooFewRows { min: u16, got: u16 },

    #[error("playfield allows at most {max} columns, got {got}")]
    TooManyColumns { max: u16, got: u16 },

    #[error("playfield allows at most {max} rows, got {got}")]
    TooManyRows { max: u16, got: u16 },

    #[error("drop interval must be at least 1ms")]
    ZeroDropInterval,

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}
