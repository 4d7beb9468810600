//! Core types module - shared data structures and constants
//!
//! This module defines the plain data used throughout the engine: shape and
//! colour enums, the session state machine states, the command surface and
//! the grid/timing constants. Nothing here holds game logic.
//!
//! # Grid Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 16 (indexed 0-15, top to bottom)
//! - **Terminal row**: 0; a locked cell there ends the game
//!
//! Rows above the visible grid are negative. Freshly promoted pieces start
//! there and fall into view.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 500 | Gravity interval when a game starts |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, ShapeKind, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(Command::from_str("moveToColumn:4"), Some(Command::MoveToColumn(4)));
//!
//! assert_eq!(DEFAULT_COLUMNS, 10);
//! assert_eq!(DEFAULT_ROWS, 16);
//! ```

use serde::{Deserialize, Serialize};

/// Default playfield width in cells (10 columns)
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default playfield height in cells (16 rows)
pub const DEFAULT_ROWS: u16 = 16;

/// Side length of the square box every shape is defined in.
///
/// Also the size of the preview grid and the smallest legal playfield.
pub const PIECE_BOX_SIZE: u16 = 4;

/// Widest playfield accepted
pub const MAX_COLUMNS: u16 = 256;

/// Tallest playfield accepted
pub const MAX_ROWS: u16 = 256;

/// Number of cells in every piece
pub const PIECE_CELLS: usize = 4;

/// Row index whose occupation by a locked cell ends the game
pub const TERMINAL_ROW: i32 = 0;

/// Gravity interval when a game starts (500ms per row)
pub const INITIAL_DROP_MS: u32 = 500;

/// Rightward kick stages tried after a blocked rotation (2 shifts, then 4 more)
pub const KICK_STAGES: [u8; 2] = [2, 4];

/// The seven piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl ShapeKind {
    /// All shapes, in factory draw order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::T => "t",
        }
    }
}

/// Cell colours a piece can be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Red,
    Cyan,
    Green,
    Yellow,
    Orange,
    Gray,
    Pink,
}

impl Color {
    /// All colours, in factory draw order
    pub const ALL: [Color; 8] = [
        Color::Blue,
        Color::Red,
        Color::Cyan,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Gray,
        Color::Pink,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Cyan => "cyan",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Gray => "gray",
            Color::Pink => "pink",
        }
    }

    /// Single-letter code, handy for text dumps of the grid
    pub fn glyph(&self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Red => 'R',
            Color::Cyan => 'C',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Orange => 'O',
            Color::Gray => 'A',
            Color::Pink => 'P',
        }
    }
}

/// Screens of the game session state machine
///
/// - **MainMenu**: start screen
/// - **Instructions**: the "how to play" screen
/// - **Controls**: key/pointer reference screen
/// - **Running**: a game in progress (possibly paused)
/// - **GameOver**: a locked cell reached the terminal row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    MainMenu,
    Instructions,
    Controls,
    Running,
    GameOver,
}

impl SessionState {
    /// Parse state from string
    ///
    /// Accepts camelCase names, plus `howToPlay` for the instructions screen.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mainmenu" | "menu" => Some(SessionState::MainMenu),
            "instructions" | "howtoplay" => Some(SessionState::Instructions),
            "controls" => Some(SessionState::Controls),
            "running" => Some(SessionState::Running),
            "gameover" => Some(SessionState::GameOver),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::MainMenu => "mainMenu",
            SessionState::Instructions => "instructions",
            SessionState::Controls => "controls",
            SessionState::Running => "running",
            SessionState::GameOver => "gameOver",
        }
    }
}

/// Commands a front end can apply to a running session
///
/// Keyboard and pointer input both reduce to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° counter-clockwise about its pivot
    Rotate,
    /// Run one drop step immediately
    SoftDrop,
    /// Run drop steps until the piece locks
    HardDrop,
    /// Walk the piece until its pivot sits in the given column (pointer drag)
    MoveToColumn(i32),
}

impl Command {
    /// Parse command from string
    ///
    /// `moveToColumn` takes its column after a colon.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotate"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("moveToColumn:7"), Some(Command::MoveToColumn(7)));
    /// assert_eq!(Command::from_str("moveToColumn"), None);
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Some(column) = lower.strip_prefix("movetocolumn:") {
            return column.trim().parse().ok().map(Command::MoveToColumn);
        }
        match lower.as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotate" => Some(Command::Rotate),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase name (without the column argument)
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::MoveToColumn(_) => "moveToColumn",
        }
    }
}
