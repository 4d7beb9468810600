//! Playfield module - the grid of locked cells
//!
//! A playfield is `columns x rows` with row 0 at the top. Locked cells are
//! kept in a flat list rather than a dense array because cells may rest
//! above the visible grid (negative rows) when a piece locks while still
//! entering. Grids are small, so linear scans stay cheap.
//!
//! Line resolution is a single ascending pass over rows `1..rows`: each full
//! row is deleted and everything above it drops one row. Row 0 is never
//! cleared; a cell locking there ends the game instead.

use tracing::trace;

use crate::cell::Cell;
use crate::config::validate_dimensions;
use crate::error::ConfigError;
use crate::types::TERMINAL_ROW;

/// Column/row extent of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub columns: u16,
    pub rows: u16,
}

impl Bounds {
    #[inline]
    pub fn last_column(&self) -> i32 {
        self.columns as i32 - 1
    }

    #[inline]
    pub fn last_row(&self) -> i32 {
        self.rows as i32 - 1
    }

    #[inline]
    pub fn contains_column(&self, column: i32) -> bool {
        column >= 0 && column <= self.last_column()
    }
}

/// The grid of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty playfield
    pub fn new(columns: u16, rows: u16) -> Result<Self, ConfigError> {
        validate_dimensions(columns, rows)?;
        Ok(Self {
            bounds: Bounds { columns, rows },
            cells: Vec::new(),
        })
    }

    pub fn columns(&self) -> u16 {
        self.bounds.columns
    }

    pub fn rows(&self) -> u16 {
        self.bounds.rows
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Locked cells in insertion order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a locked cell sits at (column, row)
    pub fn is_occupied(&self, column: i32, row: i32) -> bool {
        self.cells.iter().any(|c| c.is_at(column, row))
    }

    /// Check if a locked cell in `column` sits at `row` or anywhere above it.
    ///
    /// A falling cell cannot enter `row` when this holds.
    pub fn has_locked_cell_at_or_above(&self, column: i32, row: i32) -> bool {
        self.cells
            .iter()
            .any(|c| c.column == column && c.row <= row)
    }

    /// Number of locked cells on a row
    pub fn row_count(&self, row: i32) -> usize {
        self.cells.iter().filter(|c| c.row == row).count()
    }

    /// Check if a row holds exactly `columns` locked cells
    pub fn is_row_full(&self, row: i32) -> bool {
        self.row_count(row) == self.bounds.columns as usize
    }

    /// Remove every locked cell on `row`, returning how many were removed
    pub fn clear_row(&mut self, row: i32) -> usize {
        let before = self.cells.len();
        self.cells.retain(|c| c.row != row);
        before - self.cells.len()
    }

    /// Move every locked cell strictly above `row` down by one
    pub fn compact_above(&mut self, row: i32) {
        for cell in self.cells.iter_mut().filter(|c| c.row < row) {
            cell.shift(0, 1);
        }
    }

    pub fn has_locked_cell_on_row(&self, row: i32) -> bool {
        self.cells.iter().any(|c| c.row == row)
    }

    /// Check if the stack has reached the terminal row
    pub fn is_topped_out(&self) -> bool {
        self.has_locked_cell_on_row(TERMINAL_ROW)
    }

    /// Empty the grid
    pub fn remove_all_cells(&mut self) {
        self.cells.clear();
    }

    /// Take ownership of released piece cells.
    ///
    /// Cells are stored locked whatever flag they arrive with.
    pub fn lock_cells<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        for mut cell in cells {
            debug_assert!(
                !self.is_occupied(cell.column, cell.row),
                "two locked cells at ({}, {})",
                cell.column,
                cell.row
            );
            cell.locked = true;
            self.cells.push(cell);
        }
    }

    /// Clear every full row in one ascending pass over rows `1..rows`.
    ///
    /// Returns the cleared row indices in scan order.
    pub fn resolve_lines(&mut self) -> Vec<i32> {
        let mut cleared = Vec::new();
        for row in 1..self.bounds.rows as i32 {
            if self.is_row_full(row) {
                self.clear_row(row);
                self.compact_above(row);
                trace!(row, "row cleared");
                cleared.push(row);
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn fill_row(field: &mut Playfield, row: i32) {
        let columns = field.columns() as i32;
        field.lock_cells((0..columns).map(|c| Cell::locked(c, row, Color::Gray)));
    }

    #[test]
    fn test_new_rejects_tiny_grid() {
        assert!(Playfield::new(3, 16).is_err());
        assert!(Playfield::new(10, 0).is_err());
        assert!(Playfield::new(4, 4).is_ok());
    }

    #[test]
    fn test_lock_cells_forces_locked_flag() {
        let mut field = Playfield::new(10, 16).unwrap();
        field.lock_cells([Cell::new(2, 3, Color::Red)]);
        assert!(field.cells()[0].locked);
        assert!(field.is_occupied(2, 3));
    }

    #[test]
    fn test_row_full_needs_every_column() {
        let mut field = Playfield::new(4, 4).unwrap();
        field.lock_cells((0..3).map(|c| Cell::locked(c, 2, Color::Blue)));
        assert!(!field.is_row_full(2));
        field.lock_cells([Cell::locked(3, 2, Color::Blue)]);
        assert!(field.is_row_full(2));
    }

    #[test]
    fn test_adjacent_full_rows_clear_in_one_pass() {
        let mut field = Playfield::new(4, 6).unwrap();
        fill_row(&mut field, 4);
        fill_row(&mut field, 5);
        field.lock_cells([Cell::locked(1, 3, Color::Pink)]);

        let cleared = field.resolve_lines();

        assert_eq!(cleared, vec![4, 5]);
        assert_eq!(field.cells().len(), 1);
        assert!(field.is_occupied(1, 5));
    }

    #[test]
    fn test_row_zero_is_never_cleared() {
        let mut field = Playfield::new(4, 4).unwrap();
        fill_row(&mut field, 0);
        assert!(field.resolve_lines().is_empty());
        assert!(field.is_topped_out());
    }

    #[test]
    fn test_compaction_moves_hidden_rows_too() {
        let mut field = Playfield::new(4, 4).unwrap();
        field.lock_cells([Cell::locked(0, -1, Color::Cyan)]);
        field.compact_above(2);
        assert!(field.is_occupied(0, 0));
    }
}
