//! Pixel buffer drawing surfaces.

use std::fs;
use std::path::{Path, PathBuf};

use error_chain::bail;
use image::{ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::animation::{Colour, DrawSurface};
use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{Height, Width};

pub const PASSAGE_WHITE: Colour = Colour::new(255, 255, 255);
pub const WALL_BLACK: Colour = Colour::new(0, 0, 0);
pub const START_BLUE: Colour = Colour::new(0, 0, 255);
pub const GOAL_RED: Colour = Colour::new(255, 0, 0);

fn to_rgb(colour: Colour) -> Rgb<u8> {
    Rgb([colour.r, colour.g, colour.b])
}

/// Pixel size of a grid drawn at `cell_pixels` pixels per cell side, None on u32 overflow.
pub fn image_dimensions(width: Width, height: Height, cell_pixels: u32) -> Option<(u32, u32)> {
    let scaled = |cells: usize| {
        if cells > u32::max_value() as usize {
            None
        } else {
            (cells as u32).checked_mul(cell_pixels)
        }
    };
    Some((scaled(width.0)?, scaled(height.0)?))
}

/// Draws cells as filled squares of an in memory RGB image.
///
/// Every commit counts a frame. With a frames directory set each committed frame is also
/// written there as a numbered PNG, which is how an animation can be watched without a window.
pub struct ImageSurface {
    image: RgbImage,
    cell_pixels: u32,
    frames: usize,
    frames_dir: Option<PathBuf>,
}

impl ImageSurface {
    /// A white image for a `width * height` cell grid. A cell is at least one pixel.
    pub fn new(width: Width, height: Height, cell_pixels: u32) -> Result<ImageSurface> {
        let cell_pixels = cell_pixels.max(1);
        if width.0 == 0 || height.0 == 0 {
            bail!(ErrorKind::InvalidDimensions(width.0, height.0));
        }
        let (image_width, image_height) = image_dimensions(width, height, cell_pixels)
            .ok_or_else(|| ErrorKind::InvalidDimensions(width.0, height.0))?;

        Ok(ImageSurface {
            image: RgbImage::from_pixel(image_width, image_height, to_rgb(PASSAGE_WHITE)),
            cell_pixels,
            frames: 0,
            frames_dir: None,
        })
    }

    /// Also write every committed frame to `dir`, creating it if needed.
    pub fn with_frames_dir<P: AsRef<Path>>(mut self, dir: P) -> Result<ImageSurface> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .chain_err(|| format!("Failed to create the frames directory {}", dir.display()))?;
        self.frames_dir = Some(dir.to_path_buf());
        Ok(self)
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn cell_pixels(&self) -> u32 {
        self.cell_pixels
    }

    pub fn frames_committed(&self) -> usize {
        self.frames
    }

    /// Passages white, walls black, then the start cell outlined blue and the goal outlined red.
    pub fn paint_maze(&mut self, grid: &Grid, start: usize, goal: usize) {
        for (index, state) in grid.iter() {
            let colour = match state {
                CellState::Passage => PASSAGE_WHITE,
                CellState::Wall => WALL_BLACK,
            };
            self.fill_cell(grid.coordinate(index), colour);
        }
        self.outline_cell(grid.coordinate(start), START_BLUE);
        self.outline_cell(grid.coordinate(goal), GOAL_RED);
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.image.save_with_format(path, ImageFormat::Png)
            .chain_err(|| format!("Failed to save the maze image to {}", path.display()))?;
        Ok(())
    }

    fn cell_origin(&self, coord: Cartesian2DCoordinate) -> Option<(u32, u32)> {
        let x = coord.x.checked_mul(self.cell_pixels)?;
        let y = coord.y.checked_mul(self.cell_pixels)?;
        if x < self.image.width() && y < self.image.height() {
            Some((x, y))
        } else {
            None
        }
    }

    fn fill_cell(&mut self, coord: Cartesian2DCoordinate, colour: Colour) {
        if let Some((x0, y0)) = self.cell_origin(coord) {
            let pixel = to_rgb(colour);
            for y in y0..y0 + self.cell_pixels {
                for x in x0..x0 + self.cell_pixels {
                    self.image.put_pixel(x, y, pixel);
                }
            }
        }
    }

    /// A one pixel border inside the cell. Cells too small for a border are filled.
    fn outline_cell(&mut self, coord: Cartesian2DCoordinate, colour: Colour) {
        if self.cell_pixels <= 2 {
            self.fill_cell(coord, colour);
            return;
        }
        if let Some((x0, y0)) = self.cell_origin(coord) {
            let pixel = to_rgb(colour);
            let (x1, y1) = (x0 + self.cell_pixels - 1, y0 + self.cell_pixels - 1);
            for i in 0..self.cell_pixels {
                self.image.put_pixel(x0 + i, y0, pixel);
                self.image.put_pixel(x0 + i, y1, pixel);
                self.image.put_pixel(x0, y0 + i, pixel);
                self.image.put_pixel(x1, y0 + i, pixel);
            }
        }
    }
}

impl DrawSurface for ImageSurface {
    fn set_cell(&mut self, coord: Cartesian2DCoordinate, colour: Colour) {
        self.fill_cell(coord, colour);
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(ref dir) = self.frames_dir {
            let frame_path = dir.join(format!("frame_{:05}.png", self.frames));
            debug!("writing animation frame {}", frame_path.display());
            self.image.save_with_format(&frame_path, ImageFormat::Png)
                .chain_err(|| format!("Failed to write animation frame {}", frame_path.display()))?;
        }
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use std::env;
    use std::process;

    use super::*;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn pixel(surface: &ImageSurface, x: u32, y: u32) -> Colour {
        let Rgb([r, g, b]) = *surface.image().get_pixel(x, y);
        Colour::new(r, g, b)
    }

    #[test]
    fn image_size_scales_with_cell_pixels() {
        let surface = ImageSurface::new(Width(5), Height(3), 4).unwrap();
        assert_eq!(surface.image().dimensions(), (20, 12));
        assert_eq!(pixel(&surface, 19, 11), PASSAGE_WHITE);

        let tiny = ImageSurface::new(Width(5), Height(3), 0).unwrap();
        assert_eq!(tiny.cell_pixels(), 1);
        assert_eq!(tiny.image().dimensions(), (5, 3));

        assert!(ImageSurface::new(Width(0), Height(3), 4).is_err());
        assert_eq!(image_dimensions(Width(1 << 20), Height(1), 1 << 20), None);
    }

    #[test]
    fn set_cell_fills_the_cell_square() {
        let mut surface = ImageSurface::new(Width(3), Height(3), 2).unwrap();
        let green = Colour::new(34, 139, 34);
        surface.set_cell(gc(1, 2), green);
        for &(x, y) in &[(2, 4), (3, 4), (2, 5), (3, 5)] {
            assert_eq!(pixel(&surface, x, y), green);
        }
        assert_eq!(pixel(&surface, 1, 4), PASSAGE_WHITE);
        assert_eq!(pixel(&surface, 4, 4), PASSAGE_WHITE);

        // off the image
        surface.set_cell(gc(3, 0), green);
        surface.set_cell(gc(0, 7), green);
    }

    #[test]
    fn maze_colours() {
        let g: Grid = "
            ...
            .#.
            ...
        ".parse().unwrap();
        let mut surface = ImageSurface::new(g.width(), g.height(), 4).unwrap();
        surface.paint_maze(&g, 0, 8);

        assert_eq!(pixel(&surface, 5, 5), WALL_BLACK);
        assert_eq!(pixel(&surface, 9, 1), PASSAGE_WHITE);
        // start outline and inside
        assert_eq!(pixel(&surface, 0, 0), START_BLUE);
        assert_eq!(pixel(&surface, 3, 1), START_BLUE);
        assert_eq!(pixel(&surface, 1, 1), PASSAGE_WHITE);
        // goal outline
        assert_eq!(pixel(&surface, 11, 11), GOAL_RED);
        assert_eq!(pixel(&surface, 8, 10), GOAL_RED);
        assert_eq!(pixel(&surface, 9, 9), PASSAGE_WHITE);
    }

    #[test]
    fn commits_count_and_write_frames() {
        let dir = env::temp_dir().join(format!("mazesolver-frames-{}", process::id()));
        let mut surface = ImageSurface::new(Width(2), Height(2), 1)
            .unwrap()
            .with_frames_dir(&dir)
            .unwrap();
        surface.commit().unwrap();
        surface.commit().unwrap();
        assert_eq!(surface.frames_committed(), 2);
        assert!(dir.join("frame_00000.png").is_file());
        assert!(dir.join("frame_00001.png").is_file());

        let saved = dir.join("maze.png");
        surface.save_png(&saved).unwrap();
        let reloaded = image::open(&saved).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (2, 2));

        fs::remove_dir_all(&dir).unwrap();
    }
}
