//! Grid cells and integer points.
//!
//! Columns grow to the right, rows grow downward. Both are signed: pieces
//! are placed above the visible grid (negative rows) before they fall in.

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub column: i32,
    pub row: i32,
}

impl Point {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// This point moved by (dc, dr)
    pub const fn offset(self, dc: i32, dr: i32) -> Self {
        Self {
            column: self.column + dc,
            row: self.row + dr,
        }
    }
}

/// One square of a piece or of the locked stack.
///
/// `locked == false` while the cell belongs to a falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
    pub color: Color,
    pub locked: bool,
}

impl Cell {
    /// An active (unlocked) cell
    pub const fn new(column: i32, row: i32, color: Color) -> Self {
        Self {
            column,
            row,
            color,
            locked: false,
        }
    }

    /// A cell already resting on the playfield
    pub const fn locked(column: i32, row: i32, color: Color) -> Self {
        Self {
            column,
            row,
            color,
            locked: true,
        }
    }

    pub const fn position(&self) -> Point {
        Point::new(self.column, self.row)
    }

    #[inline]
    pub fn is_at(&self, column: i32, row: i32) -> bool {
        self.column == column && self.row == row
    }

    #[inline]
    pub(crate) fn shift(&mut self, dc: i32, dr: i32) {
        self.column += dc;
        self.row += dr;
    }
}
