use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::grid::Grid;
use crate::utils::{self, FnvHashSet};

/// Overrides the glyph of some cells when a grid is rendered as text.
pub trait GridDisplay {
    /// None leaves the cell's own glyph.
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<char>;
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay { on_path_coordinates }
    }

    pub fn from_indices(grid: &Grid, path: &[usize]) -> Self {
        let coords = path.iter().map(|index| grid.coordinate(*index)).collect::<Vec<_>>();
        PathDisplay::new(&coords)
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<char> {
        if self.on_path_coordinates.contains(&coord) {
            Some('o')
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: Cartesian2DCoordinate,
    end: Cartesian2DCoordinate,
}

impl StartEndPointsDisplay {
    pub fn new(start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> Option<char> {
        if coord == self.start {
            Some('S')
        } else if coord == self.end {
            Some('E')
        } else {
            None
        }
    }
}

/// One line per grid row. Wall cells always render as `#`; for passages the first
/// display with an opinion wins, otherwise `.` is used.
pub fn render_grid(grid: &Grid, displays: &[&dyn GridDisplay]) -> String {
    let width = grid.width().0;
    let mut output = String::with_capacity(grid.size() + grid.height().0);

    for (index, state) in grid.iter() {
        let glyph = match state {
            CellState::Wall => state.glyph(),
            CellState::Passage => {
                let coord = grid.coordinate(index);
                displays.iter()
                    .filter_map(|display| display.render_cell_body(coord))
                    .next()
                    .unwrap_or_else(|| state.glyph())
            }
        };
        output.push(glyph);
        if (index + 1) % width == 0 {
            output.push('\n');
        }
    }
    output
}

/// The same `.`/`#` layout `Grid::from_str` reads.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&render_grid(self, &[]))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::pathing;
    use crate::units::{Height, Width};

    #[test]
    fn plain_grid_round_trips() {
        let layout = "..#\n#..\n";
        let g: Grid = layout.parse().unwrap();
        assert_eq!(g.to_string(), layout);
        assert_eq!(g.to_string().parse::<Grid>().unwrap(), g);
    }

    #[test]
    fn path_with_end_points() {
        let g: Grid = "
            ..#
            #..
        ".parse().unwrap();
        let solution = pathing::breadth_first(&g, 0, 5).unwrap();
        let path = PathDisplay::from_indices(&g, solution.path().unwrap());
        let ends = StartEndPointsDisplay::new(g.coordinate(0), g.coordinate(5));

        // Earlier displays take priority.
        assert_eq!(render_grid(&g, &[&ends, &path]), "So#\n#oE\n");
        assert_eq!(render_grid(&g, &[&path, &ends]), "oo#\n#oo\n");
    }

    #[test]
    fn walls_are_never_overridden() {
        let g = Grid::filled(Width(2), Height(1), CellState::Wall).unwrap();
        let ends = StartEndPointsDisplay::new(g.coordinate(0), g.coordinate(1));
        assert_eq!(render_grid(&g, &[&ends]), "##\n");
    }
}
