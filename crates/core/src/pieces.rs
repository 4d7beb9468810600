//! Pieces module - shape table and the rotation transform
//!
//! Every shape is four cells inside a 4x4 box, plus a pivot inside that box
//! about which it turns. There is one table entry per shape; other
//! orientations come from rotating the spawn orientation.

use crate::cell::Point;
use crate::types::ShapeKind;

/// Offset of a single cell inside the 4x4 box, as (column, row)
pub type CellOffset = (i32, i32);

/// Four cell offsets of a shape
pub type ShapeCells = [CellOffset; 4];

/// Spawn-orientation cells of a shape
pub fn shape_cells(shape: ShapeKind) -> ShapeCells {
    match shape {
        ShapeKind::I => [(1, 0), (1, 1), (1, 2), (1, 3)],
        ShapeKind::J => [(2, 0), (2, 1), (2, 2), (1, 2)],
        ShapeKind::L => [(1, 0), (1, 1), (1, 2), (2, 2)],
        ShapeKind::O => [(1, 0), (2, 0), (1, 1), (2, 1)],
        ShapeKind::S => [(3, 0), (2, 0), (2, 1), (1, 1)],
        ShapeKind::Z => [(1, 0), (2, 0), (2, 1), (3, 1)],
        ShapeKind::T => [(1, 0), (2, 0), (3, 0), (2, 1)],
    }
}

/// Pivot of a shape inside its box
pub fn shape_pivot(shape: ShapeKind) -> CellOffset {
    match shape {
        ShapeKind::I => (1, 1),
        ShapeKind::J => (2, 1),
        ShapeKind::L => (1, 1),
        ShapeKind::O => (1, 0),
        ShapeKind::S => (2, 0),
        ShapeKind::Z => (2, 1),
        ShapeKind::T => (2, 0),
    }
}

/// Turn `point` a quarter counter-clockwise about `pivot`.
///
/// With rows growing downward, offset (dx, dy) becomes (dy, -dx).
#[inline]
pub fn rotate_ccw(point: Point, pivot: Point) -> Point {
    let dx = point.column - pivot.column;
    let dy = point.row - pivot.row;
    Point::new(pivot.column + dy, pivot.row - dx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_fits_its_box() {
        for shape in ShapeKind::ALL {
            for (c, r) in shape_cells(shape) {
                assert!((0..4).contains(&c) && (0..4).contains(&r), "{shape:?}");
            }
            let (pc, pr) = shape_pivot(shape);
            assert!((0..4).contains(&pc) && (0..4).contains(&pr));
        }
    }

    #[test]
    fn test_cells_are_distinct() {
        for shape in ShapeKind::ALL {
            let mut cells = shape_cells(shape).to_vec();
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells.len(), 4, "{shape:?}");
        }
    }

    #[test]
    fn test_rotate_right_goes_up() {
        let pivot = Point::new(5, 5);
        assert_eq!(rotate_ccw(Point::new(6, 5), pivot), Point::new(5, 4));
        assert_eq!(rotate_ccw(Point::new(5, 4), pivot), Point::new(4, 5));
        assert_eq!(rotate_ccw(pivot, pivot), pivot);
    }

    #[test]
    fn test_four_turns_are_identity() {
        let pivot = Point::new(2, 1);
        let start = Point::new(4, 3);
        let mut p = start;
        for _ in 0..4 {
            p = rotate_ccw(p, pivot);
        }
        assert_eq!(p, start);
    }
}
