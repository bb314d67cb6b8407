use std::fmt;
use std::str::FromStr;

use error_chain::bail;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::errors::*;
use crate::grid_coordinates;
use crate::units::{self, Height, Width};

pub type IndexSmallVec = SmallVec<[usize; 4]>;

/// Dense row major container of cell states.
///
/// Built once (by a generator or one of the constructors) and then only read by
/// the searches and the animation.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    width: Width,
    height: Height,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, passages: {}",
               self.width, self.height, self.passage_count())
    }
}

impl Grid {
    /// A grid where every cell has the same state.
    pub fn filled(width: Width, height: Height, state: CellState) -> Result<Grid> {
        if width.0 == 0 || height.0 == 0 {
            bail!(ErrorKind::InvalidDimensions(width.0, height.0));
        }
        Ok(Grid {
            cells: vec![state; units::cells_count(width, height)],
            width,
            height,
        })
    }

    /// A grid without any walls.
    pub fn open(width: Width, height: Height) -> Result<Grid> {
        Grid::filled(width, height, CellState::Passage)
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).cloned()
    }

    /// Out of grid indices are never passages.
    #[inline]
    pub fn is_passage(&self, index: usize) -> bool {
        self.get(index).map_or(false, CellState::is_passage)
    }

    pub fn set(&mut self, index: usize, state: CellState) -> Result<()> {
        let size = self.size();
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = state;
                Ok(())
            }
            None => bail!(ErrorKind::CellOutOfBounds(index, size)),
        }
    }

    pub fn fill(&mut self, state: CellState) {
        for cell in self.cells.iter_mut() {
            *cell = state;
        }
    }

    #[inline]
    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.size()
    }

    /// The coordinate of a cell index. The index is not checked.
    #[inline]
    pub fn coordinate(&self, index: usize) -> Cartesian2DCoordinate {
        grid_coordinates::to_coordinate(index, self.width)
    }

    /// The index of a coordinate, or None if the coordinate is off the grid.
    pub fn index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0 {
            Some(grid_coordinates::to_index(coord, self.width))
        } else {
            None
        }
    }

    /// Indices of the 4-connected neighbours, in up, down, left, right order.
    pub fn neighbours(&self, index: usize) -> IndexSmallVec {
        grid_coordinates::neighbours4(self.coordinate(index), self.width, self.height)
            .iter()
            .map(|coord| grid_coordinates::to_index(*coord, self.width))
            .collect()
    }

    pub fn passage_neighbours_count(&self, index: usize) -> usize {
        self.neighbours(index)
            .iter()
            .filter(|neighbour| self.is_passage(**neighbour))
            .count()
    }

    pub fn passage_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_passage()).count()
    }

    /// (index, state) for every cell in row major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, CellState)> + '_ {
        self.cells.iter().cloned().enumerate()
    }

    /// Every pair of 4-adjacent passage cells, each pair once, lower index first.
    pub fn passage_links(&self) -> Vec<(usize, usize)> {
        let mut links = Vec::new();
        for (index, state) in self.iter() {
            if !state.is_passage() {
                continue;
            }
            let coord = self.coordinate(index);
            if (coord.x as usize) + 1 < self.width.0 && self.is_passage(index + 1) {
                links.push((index, index + 1));
            }
            if (coord.y as usize) + 1 < self.height.0 && self.is_passage(index + self.width.0) {
                links.push((index, index + self.width.0));
            }
        }
        links
    }

    /// The passage cells as an undirected petgraph graph. Node weights are the
    /// cell indices; an edge joins every pair of 4-adjacent passages.
    pub fn passage_graph(&self) -> UnGraph<usize, ()> {
        let links = self.passage_links();
        let mut graph = UnGraph::with_capacity(self.passage_count(), links.len());
        let mut nodes: Vec<Option<NodeIndex>> = vec![None; self.size()];

        for (index, state) in self.iter() {
            if state.is_passage() {
                nodes[index] = Some(graph.add_node(index));
            }
        }
        for (a, b) in links {
            if let (Some(node_a), Some(node_b)) = (nodes[a], nodes[b]) {
                graph.add_edge(node_a, node_b, ());
            }
        }
        graph
    }
}

/// Parses one line per row: `.` is a passage, `#` is a wall.
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(layout: &str) -> Result<Grid> {
        let rows = layout.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();

        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut grid = Grid::filled(Width(width), Height(rows.len()), CellState::Wall)
            .chain_err(|| ErrorKind::GridParse(String::from("the layout has no cells")))?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                bail!(ErrorKind::GridParse(format!("row {} is not {} cells wide", y, width)));
            }
            for (x, glyph) in row.chars().enumerate() {
                let state = CellState::from_glyph(glyph).ok_or_else(|| {
                    ErrorKind::GridParse(format!("unknown cell glyph '{}' at ({}, {})", glyph, x, y))
                })?;
                grid.cells[y * width + x] = state;
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use petgraph::algo;

    use super::*;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        for &(w, h) in &[(0, 0), (0, 3), (3, 0)] {
            match Grid::open(Width(w), Height(h)) {
                Err(Error(ErrorKind::InvalidDimensions(ew, eh), _)) => assert_eq!((ew, eh), (w, h)),
                other => panic!("expected invalid dimensions, got {:?}", other),
            }
        }
    }

    #[test]
    fn filled_grid() {
        let g = Grid::filled(Width(4), Height(3), CellState::Wall).unwrap();
        assert_eq!(g.size(), 12);
        assert_eq!(g.passage_count(), 0);
        assert!(g.iter().all(|(_, state)| state == CellState::Wall));
    }

    #[test]
    fn set_and_get() {
        let mut g = Grid::filled(Width(2), Height(2), CellState::Wall).unwrap();
        g.set(3, CellState::Passage).unwrap();
        assert_eq!(g.get(3), Some(CellState::Passage));
        assert!(g.is_passage(3));
        assert!(!g.is_passage(0));
        assert_eq!(g.get(4), None);
        assert!(!g.is_passage(4));
        assert!(g.set(4, CellState::Passage).is_err());
    }

    #[test]
    fn index_and_coordinate() {
        let g = Grid::open(Width(3), Height(2)).unwrap();
        assert_eq!(g.index(gc(2, 1)), Some(5));
        assert_eq!(g.index(gc(3, 0)), None);
        assert_eq!(g.index(gc(0, 2)), None);
        assert_eq!(g.coordinate(4), gc(1, 1));
    }

    #[test]
    fn neighbour_indices() {
        let g = Grid::open(Width(3), Height(3)).unwrap();
        assert_eq!(&*g.neighbours(4), &[1, 7, 3, 5]);
        assert_eq!(&*g.neighbours(0), &[3, 1]);
        assert_eq!(&*g.neighbours(8), &[5, 7]);
    }

    #[test]
    fn parse_layout() {
        let g: Grid = "
            ..#
            #..
        ".parse().unwrap();
        assert_eq!(g.width(), Width(3));
        assert_eq!(g.height(), Height(2));
        let states = g.iter().map(|(_, state)| state.glyph()).collect::<String>();
        assert_eq!(states, "..##..");
        assert_eq!(g.passage_neighbours_count(0), 1);
        assert_eq!(g.passage_neighbours_count(1), 2);
        assert_eq!(g.passage_neighbours_count(2), 2);
        assert_eq!(g.passage_neighbours_count(3), 2);
    }

    #[test]
    fn parse_errors() {
        assert!("".parse::<Grid>().is_err());
        assert!("..\n...".parse::<Grid>().is_err());
        assert!(".x.".parse::<Grid>().is_err());
    }

    #[test]
    fn links_between_adjacent_passages() {
        let g: Grid = "
            ..#
            #..
        ".parse().unwrap();
        assert_eq!(g.passage_links(), vec![(0, 1), (1, 4), (4, 5)]);
    }

    #[test]
    fn open_grid_graph() {
        let g = Grid::open(Width(3), Height(3)).unwrap();
        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 9);
        // 2 horizontal links per row and 2 vertical links per column
        assert_eq!(graph.edge_count(), 12);
        assert_eq!(algo::connected_components(&graph), 1);
        let weights = graph.node_indices().map(|n| graph[n]).sorted().collect::<Vec<_>>();
        assert_eq!(weights, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn disconnected_passages() {
        let g: Grid = "
            .#.
            .#.
        ".parse().unwrap();
        let graph = g.passage_graph();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(algo::connected_components(&graph), 2);
        assert!(!algo::is_cyclic_undirected(&graph));
    }
}
