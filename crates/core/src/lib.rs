//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole simulation and has no dependency on rendering,
//! input devices or I/O:
//!
//! - **Deterministic**: a seeded session replays identically
//! - **Headless**: front ends feed commands and elapsed time, and read snapshots
//! - **Transactional**: every move or rotation either commits fully or does nothing
//!
//! # Module Structure
//!
//! - [`cell`]: grid cells and points
//! - [`playfield`]: the grid of locked cells, line detection and resolution
//! - [`pieces`]: shape table and the quarter-turn transform
//! - [`piece`]: the falling piece with rotation kicks and movement
//! - [`factory`]: seedable random piece generation
//! - [`session`]: state machine, drop cadence, lock/clear/spawn sequencing
//! - [`snapshot`]: serializable read-only views for front ends
//! - [`config`] and [`error`]: engine configuration and its validation
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, Session};
//! use blockfall_types::{Command, SessionState};
//!
//! let mut game = Session::new(EngineConfig::default(), 12345).unwrap();
//! game.go_to(SessionState::Running);
//!
//! game.apply(Command::Rotate);
//! game.apply(Command::MoveToColumn(6));
//! game.tick(500);
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.state, SessionState::Running);
//! assert!(snapshot.active.is_some());
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod factory;
pub mod piece;
pub mod pieces;
pub mod playfield;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use cell::{Cell, Point};
pub use config::EngineConfig;
pub use error::ConfigError;
pub use factory::{GameRng, PieceFactory};
pub use piece::Piece;
pub use pieces::{rotate_ccw, shape_cells, shape_pivot};
pub use playfield::{Bounds, Playfield};
pub use session::Session;
pub use snapshot::{CellSnapshot, LockEvent, PieceSnapshot, SessionSnapshot};
