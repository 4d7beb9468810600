//! Piece module - the falling shape under player control
//!
//! A [`Piece`] owns its four cells by value and remembers the extent of the
//! grid it currently belongs to. Collision queries borrow the [`Playfield`]
//! holding the locked stack.
//!
//! # Rotation
//!
//! Rotation is computed on a candidate copy and only committed once a legal
//! placement is found:
//!
//! 1. Turn every cell a quarter counter-clockwise about the pivot.
//! 2. Pull the candidate back inside the grid (see [`Piece::stay_within_bounds`]).
//! 3. If it overlaps the stack or leaves the columns, shift it right one
//!    column at a time: first up to 2 shifts, then up to 4 more.
//! 4. Commit the first placement that fits. The pivot follows the
//!    boundary correction and the kick. If none fits nothing changes.
//!
//! Kicks only ever go right.
//!
//! # Lifecycle
//!
//! A piece is built unspawned, may be turned into a random orientation by
//! the factory, and is then marked spawned. Movement and rotation are
//! refused until then. When it can no longer fall, [`Piece::release_cells`]
//! consumes it and hands its cells, now locked, to the playfield.

use tracing::trace;

use crate::cell::{Cell, Point};
use crate::pieces::{rotate_ccw, shape_cells, shape_pivot};
use crate::playfield::{Bounds, Playfield};
use crate::types::{Color, ShapeKind, KICK_STAGES, PIECE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: ShapeKind,
    color: Color,
    pivot: Point,
    cells: [Cell; PIECE_CELLS],
    bounds: Bounds,
    spawned: bool,
}

impl Piece {
    /// Build a piece in table orientation in the top-left 4x4 box of `grid`.
    ///
    /// The piece is not spawned yet and ignores movement and rotation.
    pub fn new(shape: ShapeKind, color: Color, grid: &Playfield) -> Self {
        let offsets = shape_cells(shape);
        let cells = offsets.map(|(c, r)| Cell::new(c, r, color));
        let (pc, pr) = shape_pivot(shape);
        Self {
            shape,
            color,
            pivot: Point::new(pc, pr),
            cells,
            bounds: grid.bounds(),
            spawned: false,
        }
    }

    /// Build a piece in table orientation and mark it spawned
    pub fn spawn(shape: ShapeKind, color: Color, grid: &Playfield) -> Self {
        let mut piece = Self::new(shape, color, grid);
        piece.mark_spawned();
        piece
    }

    /// Finish spawning; movement and rotation are allowed from now on
    pub fn mark_spawned(&mut self) {
        self.spawned = true;
    }

    pub fn is_spawned(&self) -> bool {
        self.spawned
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    pub fn cells(&self) -> &[Cell; PIECE_CELLS] {
        &self.cells
    }

    /// Extent of the grid this piece belongs to
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn occupies(&self, column: i32, row: i32) -> bool {
        self.cells.iter().any(|c| c.is_at(column, row))
    }

    /// Rotate 90° counter-clockwise, kicking right if needed.
    ///
    /// Returns false, leaving the piece untouched, when no placement fits or
    /// the piece has not been spawned.
    pub fn rotate(&mut self, playfield: &Playfield) -> bool {
        if !self.spawned {
            return false;
        }
        self.rotate_unguarded(playfield)
    }

    /// Rotation without the spawn guard; the factory uses it to pick the
    /// initial orientation.
    pub(crate) fn rotate_unguarded(&mut self, playfield: &Playfield) -> bool {
        let mut candidate = self.cells;
        for cell in &mut candidate {
            let turned = rotate_ccw(cell.position(), self.pivot);
            cell.column = turned.column;
            cell.row = turned.row;
        }

        // Trial correction only; the live pivot moves on commit.
        let (dc, dr) = keep_within(&mut candidate, self.bounds);

        let Some(kick) = self.find_kick(&candidate, playfield) else {
            trace!(shape = ?self.shape, pivot = ?self.pivot, "rotation blocked");
            return false;
        };

        shift_cells(&mut candidate, kick, 0);
        self.cells = candidate;
        self.pivot = self.pivot.offset(dc + kick, dr);
        true
    }

    /// Smallest rightward shift at which `candidate` fits, trying 0 first
    /// and then each kick stage in turn.
    fn find_kick(&self, candidate: &[Cell; PIECE_CELLS], playfield: &Playfield) -> Option<i32> {
        if self.fits(candidate, 0, playfield) {
            return Some(0);
        }
        let mut offset = 0;
        for stage in KICK_STAGES {
            for _ in 0..stage {
                offset += 1;
                if self.fits(candidate, offset, playfield) {
                    return Some(offset);
                }
            }
        }
        None
    }

    fn fits(&self, cells: &[Cell; PIECE_CELLS], dc: i32, playfield: &Playfield) -> bool {
        cells.iter().all(|c| {
            let column = c.column + dc;
            self.bounds.contains_column(column) && !playfield.is_occupied(column, c.row)
        })
    }

    /// Pull the piece back inside its grid, moving the pivot along.
    ///
    /// Each cell in turn pushes the whole piece right while it sits left of
    /// column 0, left while it sits past the last column, and up while it
    /// sits below the last row. Nothing pushes a piece down from the top.
    pub fn stay_within_bounds(&mut self) {
        let (dc, dr) = keep_within(&mut self.cells, self.bounds);
        self.pivot = self.pivot.offset(dc, dr);
    }

    /// Fall one row.
    ///
    /// Refused if any cell is on the last row, or if a locked cell in that
    /// cell's column sits at or above the row it would enter.
    pub fn move_down(&mut self, playfield: &Playfield) -> bool {
        if !self.spawned {
            return false;
        }
        let last_row = self.bounds.last_row();
        let blocked = self.cells.iter().any(|c| {
            c.row >= last_row || playfield.has_locked_cell_at_or_above(c.column, c.row + 1)
        });
        if blocked {
            return false;
        }
        self.translate(0, 1);
        true
    }

    /// Shift one column left, refused at the wall or against the stack
    pub fn move_left(&mut self, playfield: &Playfield) -> bool {
        self.move_sideways(-1, playfield)
    }

    /// Shift one column right, refused at the wall or against the stack
    pub fn move_right(&mut self, playfield: &Playfield) -> bool {
        self.move_sideways(1, playfield)
    }

    fn move_sideways(&mut self, dc: i32, playfield: &Playfield) -> bool {
        if !self.spawned {
            return false;
        }
        let blocked = self.cells.iter().any(|c| {
            let column = c.column + dc;
            !self.bounds.contains_column(column) || playfield.is_occupied(column, c.row)
        });
        if blocked {
            return false;
        }
        self.translate(dc, 0);
        true
    }

    /// Shift one row up without any checks (placement above the grid)
    pub fn move_up(&mut self) -> bool {
        if !self.spawned {
            return false;
        }
        self.translate(0, -1);
        true
    }

    /// Step sideways until the pivot reaches `column` or a step is refused.
    ///
    /// Returns whether the piece moved at all, so a piece stopped partway by
    /// the stack still reports true. Already on `column` counts as no move.
    pub fn move_to_column(&mut self, column: i32, playfield: &Playfield) -> bool {
        let start = self.pivot.column;
        while self.pivot.column != column {
            let stepped = if self.pivot.column < column {
                self.move_right(playfield)
            } else {
                self.move_left(playfield)
            };
            if !stepped {
                break;
            }
        }
        self.pivot.column != start
    }

    /// Re-parent the piece onto another grid
    pub fn change_grid(&mut self, grid: &Playfield) {
        self.bounds = grid.bounds();
    }

    /// Consume the piece, returning its cells flagged as locked
    pub fn release_cells(self) -> [Cell; PIECE_CELLS] {
        self.cells.map(|mut c| {
            c.locked = true;
            c
        })
    }

    fn translate(&mut self, dc: i32, dr: i32) {
        shift_cells(&mut self.cells, dc, dr);
        self.pivot = self.pivot.offset(dc, dr);
    }
}

/// Shift `cells` back inside `bounds`, returning the total (columns, rows) moved
fn keep_within(cells: &mut [Cell; PIECE_CELLS], bounds: Bounds) -> (i32, i32) {
    let last_column = bounds.last_column();
    let last_row = bounds.last_row();
    let (mut dc, mut dr) = (0, 0);

    for i in 0..PIECE_CELLS {
        while cells[i].column < 0 {
            shift_cells(cells, 1, 0);
            dc += 1;
        }
        while cells[i].column > last_column {
            shift_cells(cells, -1, 0);
            dc -= 1;
        }
        while cells[i].row > last_row {
            shift_cells(cells, 0, -1);
            dr -= 1;
        }
    }
    (dc, dr)
}

fn shift_cells(cells: &mut [Cell; PIECE_CELLS], dc: i32, dr: i32) {
    for cell in cells.iter_mut() {
        cell.shift(dc, dr);
    }
}
