//! **mazesolver** generates perfect mazes on a square cell grid with randomised Prim,
//! solves them with depth first or breadth first search and replays the search as a
//! batched animation onto any drawing surface.
//!
//! ```no_run
//! use mazesolver::{animation, generators, pathing::SearchStrategy, renderers::ImageSurface, units};
//!
//! # fn main() -> mazesolver::errors::Result<()> {
//! let (width, height) = (units::Width(64), units::Height(64));
//! let maze = generators::prim(width, height)?;
//! let solution = SearchStrategy::BreadthFirst.solve(&maze, 0, maze.size() - 1)?;
//!
//! let mut surface = ImageSurface::new(width, height, 4)?;
//! surface.paint_maze(&maze, 0, maze.size() - 1);
//! animation::animate_solution(&maze,
//!                             &solution,
//!                             &mut surface,
//!                             &mut animation::Immediate,
//!                             animation::AnimationOptions::default())?;
//! surface.save_png("maze.png")?;
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_coordinates;
pub mod grid_displays;
pub mod pathing;
pub mod renderers;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod units;
mod utils;
