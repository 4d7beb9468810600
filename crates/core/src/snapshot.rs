use arrayvec::ArrayVec;
use serde::Serialize;

use crate::cell::{Cell, Point};
use crate::piece::Piece;
use crate::types::{Color, SessionState, ShapeKind, PIECE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellSnapshot {
    pub column: i32,
    pub row: i32,
    pub color: Color,
}

impl From<&Cell> for CellSnapshot {
    fn from(value: &Cell) -> Self {
        Self {
            column: value.column,
            row: value.row,
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub shape: ShapeKind,
    pub color: Color,
    pub pivot: Point,
    pub cells: [CellSnapshot; PIECE_CELLS],
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            shape: value.shape(),
            color: value.color(),
            pivot: value.pivot(),
            cells: value.cells().map(|c| CellSnapshot::from(&c)),
        }
    }
}

/// Summary of the most recent lock, cleared rows in scan order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub rows_cleared: u32,
    pub cleared_rows: ArrayVec<i32, PIECE_CELLS>,
    pub score: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub paused: bool,
    pub score: u32,
    pub columns: u16,
    pub rows: u16,
    pub drop_interval_ms: u32,
    pub pieces_locked: u32,
    pub locked: Vec<CellSnapshot>,
    pub active: Option<PieceSnapshot>,
    /// Queued piece, in preview-grid coordinates
    pub next: Option<PieceSnapshot>,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.state = SessionState::MainMenu;
        self.paused = false;
        self.score = 0;
        self.columns = 0;
        self.rows = 0;
        self.drop_interval_ms = 0;
        self.pieces_locked = 0;
        self.locked.clear();
        self.active = None;
        self.next = None;
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Running && !self.paused
    }

    /// Colour at a visible grid position, active piece drawn over the stack
    pub fn color_at(&self, column: i32, row: i32) -> Option<Color> {
        let active = self
            .active
            .iter()
            .flat_map(|p| p.cells.iter())
            .find(|c| c.column == column && c.row == row);
        active
            .or_else(|| {
                self.locked
                    .iter()
                    .find(|c| c.column == column && c.row == row)
            })
            .map(|c| c.color)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            state: SessionState::MainMenu,
            paused: false,
            score: 0,
            columns: 0,
            rows: 0,
            drop_interval_ms: 0,
            pieces_locked: 0,
            locked: Vec::new(),
            active: None,
            next: None,
        }
    }
}
