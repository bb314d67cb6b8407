//! Batched replay of a search onto a drawing surface.
//!
//! The visit order of a search is painted a batch at a time. After each batch the path from
//! the start to the most recently painted cell is drawn over the visited cells and the surface
//! is committed; the host then gets a chance to show the frame before the next batch. When the
//! visit order is exhausted the real start to goal path is drawn one last time.

use std::cmp;
use std::thread;
use std::time::{Duration, Instant};

use bit_set::BitSet;
use error_chain::bail;
use log::trace;

use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_coordinates;
use crate::pathing::{ParentMap, Solution};
use crate::units::Width;

pub const DEFAULT_BATCH_SIZE: usize = 600;

/// An opaque RGB colour.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }
}

pub const VISITED_GREY: Colour = Colour::new(176, 176, 176);
pub const PATH_GREEN: Colour = Colour::new(34, 139, 34);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Palette {
    pub visited: Colour,
    pub path: Colour,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            visited: VISITED_GREY,
            path: PATH_GREEN,
        }
    }
}

/// Anything cells can be coloured on.
///
/// The animation only ever sets single cells and commits; how a cell maps to pixels,
/// and what committing means, is up to the surface.
pub trait DrawSurface {
    fn set_cell(&mut self, coord: Cartesian2DCoordinate, colour: Colour);

    /// Make everything set since the last commit visible.
    fn commit(&mut self) -> Result<()>;
}

impl<'a, S: DrawSurface + ?Sized> DrawSurface for &'a mut S {
    fn set_cell(&mut self, coord: Cartesian2DCoordinate, colour: Colour) {
        (**self).set_cell(coord, colour)
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }
}

/// Called between batches to wait for the next chance to show a frame.
pub trait FrameScheduler {
    fn wait_for_frame(&mut self) -> Result<()>;
}

/// Never waits, e.g. when writing frames to files.
#[derive(Debug, Copy, Clone, Default)]
pub struct Immediate;

impl FrameScheduler for Immediate {
    fn wait_for_frame(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Sleeps so that successive frames are at least one frame interval apart.
#[derive(Debug, Clone)]
pub struct FixedFrameRate {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FixedFrameRate {
    /// A frame rate of 0 is treated as 1 frame per second.
    pub fn new(frames_per_second: u32) -> FixedFrameRate {
        let fps = cmp::max(frames_per_second, 1);
        FixedFrameRate {
            interval: Duration::from_secs(1) / fps,
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for FixedFrameRate {
    fn default() -> FixedFrameRate {
        FixedFrameRate::new(60)
    }
}

impl FrameScheduler for FixedFrameRate {
    fn wait_for_frame(&mut self) -> Result<()> {
        if let Some(last_frame) = self.last_frame {
            let elapsed = last_frame.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AnimationOptions {
    batch_size: usize,
    palette: Palette,
}

impl AnimationOptions {
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }
}

impl Default for AnimationOptions {
    fn default() -> AnimationOptions {
        AnimationOptions {
            batch_size: DEFAULT_BATCH_SIZE,
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct AnimationOptionsBuilder {
    options: AnimationOptions,
}

impl Default for AnimationOptionsBuilder {
    fn default() -> AnimationOptionsBuilder {
        AnimationOptionsBuilder::new()
    }
}

impl AnimationOptionsBuilder {
    pub fn new() -> AnimationOptionsBuilder {
        AnimationOptionsBuilder { options: AnimationOptions::default() }
    }

    /// Number of visit order cells painted between frames.
    pub fn batch_size(mut self, batch_size: usize) -> AnimationOptionsBuilder {
        self.options.batch_size = batch_size;
        self
    }

    pub fn visited_colour(mut self, colour: Colour) -> AnimationOptionsBuilder {
        self.options.palette.visited = colour;
        self
    }

    pub fn path_colour(mut self, colour: Colour) -> AnimationOptionsBuilder {
        self.options.palette.path = colour;
        self
    }

    pub fn build(self) -> Result<AnimationOptions> {
        if self.options.batch_size == 0 {
            bail!(ErrorKind::InvalidBatchSize);
        }
        Ok(self.options)
    }
}

/// What one pull of an `Animation` drew before committing.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AnimationStep {
    Batch {
        /// Zero based batch number.
        number: usize,
        /// Cells painted in the visited colour by this batch.
        newly_painted: usize,
        /// The last cell of the batch window, where the drawn path ends.
        head: usize,
        path_length: usize,
    },
    /// The start to goal path, None when the search never reached the goal.
    Final { path_length: Option<usize> },
}

/// Lazy replay of a visit order: every `next` paints one batch (or the final path) and
/// commits the surface. Stopping early just means not pulling any more steps.
pub struct Animation<'a, S: DrawSurface + ?Sized> {
    width: Width,
    visited_order: &'a [usize],
    parents: &'a ParentMap,
    goal: usize,
    surface: &'a mut S,
    options: AnimationOptions,
    painted: BitSet,
    next_boundary: usize,
    batches: usize,
    finished: bool,
}

impl<'a, S: DrawSurface + ?Sized> Animation<'a, S> {
    pub fn new(width: Width,
               visited_order: &'a [usize],
               parents: &'a ParentMap,
               goal: usize,
               surface: &'a mut S,
               options: AnimationOptions)
               -> Animation<'a, S> {
        Animation {
            width,
            visited_order,
            parents,
            goal,
            surface,
            options,
            painted: BitSet::with_capacity(visited_order.len()),
            next_boundary: 0,
            batches: 0,
            finished: false,
        }
    }

    /// Number of batch steps in the whole animation, excluding the final path step.
    pub fn batch_count(&self) -> usize {
        let batch_size = self.options.batch_size;
        (self.visited_order.len() + batch_size - 1) / batch_size
    }

    fn coordinate(&self, index: usize) -> Cartesian2DCoordinate {
        grid_coordinates::to_coordinate(index, self.width)
    }

    fn draw_path_to(&mut self, target: usize) -> Option<usize> {
        let path = self.parents.path_to(target)?;
        let colour = self.options.palette.path;
        for index in path.iter() {
            let coord = self.coordinate(*index);
            self.surface.set_cell(coord, colour);
        }
        Some(path.len())
    }

    fn paint_batch(&mut self) -> Result<AnimationStep> {
        let batch_size = self.options.batch_size;
        let boundary = self.next_boundary;
        let window_start = boundary.saturating_sub(batch_size);
        let window_end = cmp::min(boundary + batch_size, self.visited_order.len());

        let visited_order = self.visited_order;
        let visited_colour = self.options.palette.visited;
        let mut newly_painted = 0;
        for index in visited_order[window_start..window_end].iter().cloned() {
            if self.painted.insert(index) {
                let coord = self.coordinate(index);
                self.surface.set_cell(coord, visited_colour);
                newly_painted += 1;
            }
        }

        let head = visited_order[window_end - 1];
        let path_length = self.draw_path_to(head).unwrap_or(0);
        self.surface.commit()?;

        let step = AnimationStep::Batch {
            number: self.batches,
            newly_painted,
            head,
            path_length,
        };
        trace!("{:?}", step);

        self.next_boundary += batch_size;
        self.batches += 1;
        Ok(step)
    }

    fn paint_final_path(&mut self) -> Result<AnimationStep> {
        let goal = self.goal;
        let path_length = self.draw_path_to(goal);
        self.surface.commit()?;

        let step = AnimationStep::Final { path_length };
        trace!("{:?} after {} batches", step, self.batches);
        Ok(step)
    }
}

impl<'a, S: DrawSurface + ?Sized> Iterator for Animation<'a, S> {
    type Item = Result<AnimationStep>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let step = if self.next_boundary < self.visited_order.len() {
            self.paint_batch()
        } else {
            self.finished = true;
            self.paint_final_path()
        };
        if step.is_err() {
            self.finished = true;
        }
        Some(step)
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct AnimationSummary {
    pub batches: usize,
    pub commits: usize,
    pub cells_painted: usize,
    /// Length of the final start to goal path, None when the goal was not reached.
    pub path_length: Option<usize>,
}

/// Replay a whole visit order onto `surface`, waiting on `scheduler` after every batch.
pub fn animate<S, F>(width: Width,
                     visited_order: &[usize],
                     parents: &ParentMap,
                     goal: usize,
                     surface: &mut S,
                     scheduler: &mut F,
                     options: AnimationOptions)
                     -> Result<AnimationSummary>
    where S: DrawSurface + ?Sized,
          F: FrameScheduler + ?Sized
{
    let mut summary = AnimationSummary::default();
    let animation = Animation::new(width, visited_order, parents, goal, surface, options);

    for step in animation {
        summary.commits += 1;
        match step? {
            AnimationStep::Batch { newly_painted, .. } => {
                summary.batches += 1;
                summary.cells_painted += newly_painted;
                scheduler.wait_for_frame()?;
            }
            AnimationStep::Final { path_length } => {
                summary.path_length = path_length;
            }
        }
    }
    Ok(summary)
}

/// `animate` fed from a solution of a search over `grid`.
pub fn animate_solution<S, F>(grid: &Grid,
                              solution: &Solution,
                              surface: &mut S,
                              scheduler: &mut F,
                              options: AnimationOptions)
                              -> Result<AnimationSummary>
    where S: DrawSurface + ?Sized,
          F: FrameScheduler + ?Sized
{
    animate(grid.width(),
            solution.visited_order(),
            solution.parents(),
            solution.goal(),
            surface,
            scheduler,
            options)
}
