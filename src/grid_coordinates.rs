//! Coordinate math shared by every other module: the row major linearisation of
//! a `width * height` rectangle and neighbour enumeration.

use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, DIAGONAL_DIRECTIONS, PRIMARY_DIRECTIONS};
use crate::units::{Height, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateWithDiagonalsSmallVec = SmallVec<[Cartesian2DCoordinate; 8]>;

/// Convert a grid coordinate to its row major index, `y * width + x`.
///
/// There is no bounds check, the caller guarantees the coordinate is on the grid.
#[inline]
pub fn to_index(coord: Cartesian2DCoordinate, width: Width) -> usize {
    coord.y as usize * width.0 + coord.x as usize
}

/// Inverse of `to_index`.
#[inline]
pub fn to_coordinate(index: usize, width: Width) -> Cartesian2DCoordinate {
    Cartesian2DCoordinate::new((index % width.0) as u32, (index / width.0) as u32)
}

/// Is the (possibly negative) position inside the `width * height` rectangle?
#[inline]
pub fn in_bounds(x: isize, y: isize, width: Width, height: Height) -> bool {
    x >= 0 && y >= 0 && (x as usize) < width.0 && (y as usize) < height.0
}

/// The coordinate one `(dx, dy)` step away, if it is on the grid.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         (dx, dy): (isize, isize),
                         width: Width,
                         height: Height)
                         -> Option<Cartesian2DCoordinate> {
    let x = coord.x as isize + dx;
    let y = coord.y as isize + dy;
    if in_bounds(x, y, width, height) {
        Some(Cartesian2DCoordinate::new(x as u32, y as u32))
    } else {
        None
    }
}

/// The 4-connected neighbours in the order up, down, left, right, skipping any
/// that fall off the grid.
pub fn neighbours4(coord: Cartesian2DCoordinate,
                   width: Width,
                   height: Height)
                   -> CoordinateSmallVec {
    PRIMARY_DIRECTIONS.iter()
        .filter_map(|dir| offset_coordinate(coord, dir.offset(), width, height))
        .collect()
}

/// `neighbours4` followed by the diagonal neighbours up-left, up-right,
/// down-left, down-right.
pub fn neighbours8(coord: Cartesian2DCoordinate,
                   width: Width,
                   height: Height)
                   -> CoordinateWithDiagonalsSmallVec {
    let diagonals = DIAGONAL_DIRECTIONS.iter()
        .filter_map(|dir| offset_coordinate(coord, dir.offset(), width, height));

    neighbours4(coord, width, height)
        .into_iter()
        .chain(diagonals)
        .collect()
}

/// Are two cells 4-adjacent (manhattan distance exactly one)?
pub fn is_adjacent(a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
    let dx = (a.x as i64 - b.x as i64).abs();
    let dy = (a.y as i64 - b.y as i64).abs();
    dx + dy == 1
}
