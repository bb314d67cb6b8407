use std::convert::From;
use std::fmt;

/// The state of one grid cell. Passages are traversable, walls are not.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Passage,
    Wall,
}

impl CellState {
    #[inline]
    pub fn is_passage(self) -> bool {
        self == CellState::Passage
    }

    /// Text layout glyph: `.` for a passage, `#` for a wall.
    pub fn glyph(self) -> char {
        match self {
            CellState::Passage => '.',
            CellState::Wall => '#',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<CellState> {
        match glyph {
            '.' => Some(CellState::Passage),
            '#' => Some(CellState::Wall),
            _ => None,
        }
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Directions to the 4-connected neighbours of a cell.
/// y grows downwards, so North is "up".
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    West,
    East,
}

/// Directions to the diagonal neighbours of a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassDiagonal {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

/// Up, down, left, right. Search tie-breaking depends on this order.
pub const PRIMARY_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                     CompassPrimary::South,
                                                     CompassPrimary::West,
                                                     CompassPrimary::East];

pub const DIAGONAL_DIRECTIONS: [CompassDiagonal; 4] = [CompassDiagonal::NorthWest,
                                                       CompassDiagonal::NorthEast,
                                                       CompassDiagonal::SouthWest,
                                                       CompassDiagonal::SouthEast];

impl CompassPrimary {
    /// (dx, dy) step to the neighbour in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::West => (-1, 0),
            CompassPrimary::East => (1, 0),
        }
    }
}

impl CompassDiagonal {
    pub fn offset(self) -> (isize, isize) {
        match self {
            CompassDiagonal::NorthWest => (-1, -1),
            CompassDiagonal::NorthEast => (1, -1),
            CompassDiagonal::SouthWest => (-1, 1),
            CompassDiagonal::SouthEast => (1, 1),
        }
    }
}
