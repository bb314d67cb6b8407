//! Depth first and breadth first search over the passages of a grid.
//!
//! Both searches run the same loop and differ only in the discipline of the frontier of
//! discovered but unexpanded cells: a stack gives depth first order, a queue breadth first.
//! A search records the order cells were discovered in and the cell each was discovered
//! from, which is all the animation needs to replay it and rebuild paths.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use bit_set::BitSet;
use error_chain::bail;
use itertools::Itertools;
use log::{debug, info};

use crate::errors::*;
use crate::grid::Grid;
use crate::grid_coordinates;

/// Container of discovered cells waiting to be expanded.
pub trait Frontier {
    fn with_capacity(capacity: usize) -> Self;
    fn push(&mut self, index: usize);
    fn pop(&mut self) -> Option<usize>;
}

/// Last in first out: depth first search.
impl Frontier for Vec<usize> {
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    #[inline]
    fn push(&mut self, index: usize) {
        Vec::push(self, index)
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        Vec::pop(self)
    }
}

/// First in first out: breadth first search.
impl Frontier for VecDeque<usize> {
    fn with_capacity(capacity: usize) -> Self {
        VecDeque::with_capacity(capacity)
    }

    #[inline]
    fn push(&mut self, index: usize) {
        self.push_back(index)
    }

    #[inline]
    fn pop(&mut self) -> Option<usize> {
        self.pop_front()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SearchStrategy {
    DepthFirst,
    BreadthFirst,
}

impl SearchStrategy {
    pub fn solve(self, grid: &Grid, start: usize, goal: usize) -> Result<Solution> {
        solve(grid, start, goal, self)
    }

    /// Short upper case name, e.g. for a status line.
    pub fn name(self) -> &'static str {
        match self {
            SearchStrategy::DepthFirst => "DFS",
            SearchStrategy::BreadthFirst => "BFS",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(name: &str) -> Result<SearchStrategy> {
        match name.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(SearchStrategy::DepthFirst),
            "bfs" | "breadth-first" => Ok(SearchStrategy::BreadthFirst),
            _ => bail!("unknown search strategy '{}', expected dfs or bfs", name),
        }
    }
}

/// The cell each discovered cell was first discovered from.
///
/// Only the start cell is discovered without a parent, so the map knows which cell that
/// is in order to tell "discovered from nowhere" apart from "never discovered".
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParentMap {
    start: usize,
    parents: Vec<Option<usize>>,
}

impl ParentMap {
    fn new(start: usize, cells_count: usize) -> ParentMap {
        ParentMap {
            start,
            parents: vec![None; cells_count],
        }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents.get(index).cloned().unwrap_or(None)
    }

    #[inline]
    pub fn is_discovered(&self, index: usize) -> bool {
        index == self.start || self.parent(index).is_some()
    }

    /// The cells from the start to `target` by following parent links back from the target.
    ///
    /// None if the search never discovered `target`; a path to the start itself is just
    /// the start cell.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_discovered(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        debug_assert_eq!(current, self.start);

        path.reverse();
        Some(path)
    }
}

/// Everything a search discovered, in discovery order.
#[derive(Debug, Clone)]
pub struct Traversal {
    visited_order: Vec<usize>,
    parents: ParentMap,
    elapsed: Duration,
}

impl Traversal {
    #[inline]
    pub fn visited_order(&self) -> &[usize] {
        &self.visited_order
    }

    #[inline]
    pub fn parents(&self) -> &ParentMap {
        &self.parents
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited_order.len()
    }

    /// Wall clock time of the search loop.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// The result of searching from a start cell to a goal cell.
#[derive(Debug, Clone)]
pub struct Solution {
    strategy: SearchStrategy,
    goal: usize,
    traversal: Traversal,
    path: Option<Vec<usize>>,
}

impl Solution {
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn start(&self) -> usize {
        self.traversal.parents.start()
    }

    pub fn goal(&self) -> usize {
        self.goal
    }

    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    pub fn visited_order(&self) -> &[usize] {
        self.traversal.visited_order()
    }

    pub fn parents(&self) -> &ParentMap {
        self.traversal.parents()
    }

    pub fn visited_count(&self) -> usize {
        self.traversal.visited_count()
    }

    /// Time spent in the search loop. Path reconstruction is not included.
    pub fn elapsed(&self) -> Duration {
        self.traversal.elapsed()
    }

    pub fn elapsed_ms(&self) -> f64 {
        let elapsed = self.elapsed();
        elapsed.as_secs() as f64 * 1000.0 + f64::from(elapsed.subsec_nanos()) / 1_000_000.0
    }

    /// Start to goal cells, or None when the goal could not be reached.
    pub fn path(&self) -> Option<&[usize]> {
        self.path.as_ref().map(|path| path.as_slice())
    }

    pub fn is_solved(&self) -> bool {
        self.path.is_some()
    }

    /// Number of cells on the path, zero when unsolved.
    pub fn path_length(&self) -> usize {
        self.path.as_ref().map_or(0, |path| path.len())
    }
}

pub fn depth_first(grid: &Grid, start: usize, goal: usize) -> Result<Solution> {
    solve(grid, start, goal, SearchStrategy::DepthFirst)
}

pub fn breadth_first(grid: &Grid, start: usize, goal: usize) -> Result<Solution> {
    solve(grid, start, goal, SearchStrategy::BreadthFirst)
}

/// Search the passages of `grid` from `start` until `goal` is expanded or every passage
/// reachable from `start` has been discovered.
///
/// Both endpoints must be passages on the grid. An unreachable goal is not an error:
/// the solution has no path and the traversal covers the whole region around the start.
pub fn solve(grid: &Grid, start: usize, goal: usize, strategy: SearchStrategy) -> Result<Solution> {
    check_endpoint(grid, start)?;
    check_endpoint(grid, goal)?;

    let traversal = match strategy {
        SearchStrategy::DepthFirst => traverse::<Vec<usize>>(grid, start, Some(goal)),
        SearchStrategy::BreadthFirst => traverse::<VecDeque<usize>>(grid, start, Some(goal)),
    };
    let path = traversal.parents.path_to(goal);

    info!("{} from {} to {}: visited {} cells in {:?}, path length {}",
          strategy,
          grid.coordinate(start),
          grid.coordinate(goal),
          traversal.visited_count(),
          traversal.elapsed(),
          path.as_ref().map_or(0, |p| p.len()));
    if path.is_none() {
        info!("{}: goal {} is not reachable", strategy, grid.coordinate(goal));
    }

    Ok(Solution {
        strategy,
        goal,
        traversal,
        path,
    })
}

/// Breadth first flood from `start` over every passage reachable from it.
pub fn explore(grid: &Grid, start: usize) -> Result<Traversal> {
    check_endpoint(grid, start)?;
    Ok(traverse::<VecDeque<usize>>(grid, start, None))
}

/// The search loop shared by every strategy. `start` must be a valid index.
pub(crate) fn traverse<F: Frontier>(grid: &Grid, start: usize, goal: Option<usize>) -> Traversal {

    let cells_count = grid.size();
    let mut visited = BitSet::with_capacity(cells_count);
    let mut parents = ParentMap::new(start, cells_count);
    let mut visited_order = Vec::with_capacity(cells_count);
    let mut frontier = F::with_capacity(cells_count);

    let timer = Instant::now();

    visited.insert(start);
    visited_order.push(start);
    frontier.push(start);

    while let Some(current) = frontier.pop() {
        if Some(current) == goal {
            break;
        }

        for neighbour in grid.neighbours(current).iter().cloned() {
            if grid.is_passage(neighbour) && visited.insert(neighbour) {
                parents.parents[neighbour] = Some(current);
                visited_order.push(neighbour);
                frontier.push(neighbour);
            }
        }
    }

    let elapsed = timer.elapsed();
    debug!("traversal from {} discovered {} of {} cells", start, visited_order.len(), cells_count);

    Traversal {
        visited_order,
        parents,
        elapsed,
    }
}

/// Are all cells of the path passages, with every consecutive pair 4-adjacent?
pub fn is_contiguous_path(grid: &Grid, path: &[usize]) -> bool {
    path.iter().all(|index| grid.is_passage(*index)) &&
    path.iter().tuple_windows().all(|(a, b)| {
        grid_coordinates::is_adjacent(grid.coordinate(*a), grid.coordinate(*b))
    })
}

fn check_endpoint(grid: &Grid, index: usize) -> Result<()> {
    if !grid.is_valid_index(index) {
        bail!(ErrorKind::CellOutOfBounds(index, grid.size()));
    }
    if !grid.is_passage(index) {
        bail!(ErrorKind::WallEndpoint(index));
    }
    Ok(())
}
