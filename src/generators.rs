use log::debug;
use rand::{self, Rng};

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, Width};
use crate::utils::RandomSet;

/// Generate a perfect maze with the randomised Prim algorithm, using the thread local rng.
///
/// Every cell starts as a wall. The maze tree grows from the top left cell: a wall cell
/// adjacent to the tree is picked uniformly at random and carved into a passage only if
/// exactly one of its neighbours is already a passage. Carving a cell with two passage
/// neighbours would close a loop between two parts of the tree, so such cells stay walls.
///
/// The passages form a spanning tree that always contains the top left and bottom right
/// corner cells: exactly one path connects any two passages.
pub fn prim(width: Width, height: Height) -> Result<Grid> {
    prim_with_rng(width, height, &mut rand::thread_rng())
}

/// `prim` with a caller supplied random number generator, e.g. a seeded rng for a
/// reproducible maze.
pub fn prim_with_rng<R: Rng>(width: Width, height: Height, rng: &mut R) -> Result<Grid> {

    let mut grid = Grid::filled(width, height, CellState::Wall)?;
    let origin = 0;
    let goal = grid.size() - 1;

    // The tree stops growing wherever no frontier cell passes the single passage
    // neighbour test. When that leaves the far corner walled, carving it afterwards would
    // close a loop or leave it cut off, so grow a fresh tree instead.
    let mut attempts = 1;
    carve_spanning_tree(&mut grid, origin, rng)?;
    while !grid.is_passage(goal) {
        debug!("maze tree did not reach the goal corner {}, regrowing (attempt {})",
               grid.coordinate(goal), attempts);
        attempts += 1;
        grid.fill(CellState::Wall);
        carve_spanning_tree(&mut grid, origin, rng)?;
    }

    // Both corners are search endpoints for the driver; they are passages already.
    grid.set(origin, CellState::Passage)?;
    grid.set(goal, CellState::Passage)?;

    debug!("prim maze {}x{}: {} passages after {} attempt(s)",
           width.0, height.0, grid.passage_count(), attempts);
    Ok(grid)
}

fn carve_spanning_tree<R: Rng>(grid: &mut Grid, root: usize, rng: &mut R) -> Result<()> {

    grid.set(root, CellState::Passage)?;

    let mut frontier = RandomSet::with_capacity(grid.size() / 2 + 1);
    for neighbour in grid.neighbours(root).iter() {
        if !grid.is_passage(*neighbour) {
            frontier.insert(*neighbour);
        }
    }

    while let Some(candidate) = frontier.remove_random(rng) {

        if grid.passage_neighbours_count(candidate) != 1 {
            continue;
        }
        grid.set(candidate, CellState::Passage)?;

        for neighbour in grid.neighbours(candidate).iter().cloned() {
            if !grid.is_passage(neighbour) && !frontier.contains(neighbour) &&
               grid.passage_neighbours_count(neighbour) > 0 {
                frontier.insert(neighbour);
            }
        }
    }
    Ok(())
}

/// The top left corner, where the maze tree is rooted, and the bottom right corner.
/// Both are passages in every generated maze.
pub fn maze_corners(width: Width, height: Height) -> (Cartesian2DCoordinate, Cartesian2DCoordinate) {
    (Cartesian2DCoordinate::new(0, 0),
     Cartesian2DCoordinate::new(width.0.saturating_sub(1) as u32, height.0.saturating_sub(1) as u32))
}

#[cfg(test)]
mod tests {

    use petgraph::algo;
    use quickcheck::{quickcheck, TestResult};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::pathing;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn corners(g: &Grid) -> (usize, usize) {
        (0, g.size() - 1)
    }

    fn is_perfect_maze(g: &Grid) -> bool {
        let graph = g.passage_graph();
        graph.node_count() > 0 &&
        graph.edge_count() == graph.node_count() - 1 &&
        algo::connected_components(&graph) == 1
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(prim(Width(0), Height(5)).is_err());
        assert!(prim(Width(5), Height(0)).is_err());
    }

    #[test]
    fn single_cell_maze() {
        let g = prim(Width(1), Height(1)).unwrap();
        assert_eq!(g.passage_count(), 1);
        assert!(g.is_passage(0));
    }

    #[test]
    fn line_mazes_are_fully_carved() {
        // Every cell of a one cell wide grid has a single passage neighbour when it is picked.
        let row = prim_with_rng(Width(7), Height(1), &mut seeded(3)).unwrap();
        assert_eq!(row.passage_count(), 7);
        let column = prim_with_rng(Width(1), Height(9), &mut seeded(3)).unwrap();
        assert_eq!(column.passage_count(), 9);
    }

    #[test]
    fn corners_are_passages() {
        for seed in 0..50 {
            let g = prim_with_rng(Width(6), Height(5), &mut seeded(seed)).unwrap();
            let (start, goal) = corners(&g);
            assert!(g.is_passage(start), "seed {}", seed);
            assert!(g.is_passage(goal), "seed {}", seed);
        }
    }

    #[test]
    fn two_by_two_is_an_l_shape() {
        // The fourth cell always has two passage neighbours, so exactly three cells are carved.
        for seed in 0..20 {
            let g = prim_with_rng(Width(2), Height(2), &mut seeded(seed)).unwrap();
            assert_eq!(g.passage_count(), 3);
            assert!(is_perfect_maze(&g));
        }
    }

    #[test]
    fn passages_form_a_spanning_tree() {
        for seed in 0..30 {
            let g = prim_with_rng(Width(17), Height(11), &mut seeded(seed)).unwrap();
            assert!(is_perfect_maze(&g), "seed {} made {:?}", seed, g);
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = prim_with_rng(Width(12), Height(12), &mut seeded(99)).unwrap();
        let b = prim_with_rng(Width(12), Height(12), &mut seeded(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn walls_never_have_exactly_one_passage_neighbour() {
        // Such a wall would still have been a frontier cell that passes the carve test.
        let g = prim_with_rng(Width(20), Height(20), &mut seeded(5)).unwrap();
        for (index, state) in g.iter() {
            if state == CellState::Wall {
                assert_ne!(g.passage_neighbours_count(index), 1, "wall {}", index);
            }
        }
    }

    #[test]
    fn breadth_first_from_origin_reaches_every_passage() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 24 + 2, h as usize % 24 + 2);
            let g = prim_with_rng(Width(w), Height(h), &mut seeded(seed)).unwrap();

            let traversal = pathing::explore(&g, 0).unwrap();
            TestResult::from_bool(traversal.visited_count() == g.passage_count() && is_perfect_maze(&g))
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn corner_coordinates() {
        assert_eq!(maze_corners(Width(4), Height(3)),
                   (Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(3, 2)));
        assert_eq!(maze_corners(Width(1), Height(1)),
                   (Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(0, 0)));
    }
}
