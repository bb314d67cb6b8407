//! A window to watch an animation in, available with the `sdl` feature.

use std::thread;
use std::time::Duration;

use error_chain::bail;
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::animation::{Colour, DrawSurface};
use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::grid::Grid;
use crate::renderers::ImageSurface;

const MAX_WINDOW_SIDE: u32 = 1280;

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
}

fn display_error<E: ToString>(error: E) -> Error {
    ErrorKind::Display(error.to_string()).into()
}

pub fn init() -> Result<SdlSetup> {
    let sdl_context = sdl2::init().map_err(display_error)?;
    let video_subsystem = sdl_context.video().map_err(display_error)?;
    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
    })
}

/// Cells are drawn into a pixel buffer; a commit streams the buffer to the window.
///
/// Closing the window (or pressing q / escape) makes the next commit fail, which ends
/// an animation early.
pub struct SdlSurface {
    pixels: ImageSurface,
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    events: EventPump,
    _setup: SdlSetup,
}

impl SdlSurface {
    pub fn new(title: &str, pixels: ImageSurface) -> Result<SdlSurface> {
        let setup = init()?;
        let (image_width, image_height) = pixels.image().dimensions();

        // Large mazes are scaled down to fit, SDL keeps the aspect ratio.
        let window = setup.video_subsystem
            .window(title, image_width.min(MAX_WINDOW_SIDE), image_height.min(MAX_WINDOW_SIDE))
            .position_centered()
            .resizable()
            .build()
            .map_err(display_error)?;
        let mut canvas = window.into_canvas()
            .present_vsync()
            .accelerated()
            .build()
            .map_err(display_error)?;
        canvas.set_logical_size(image_width, image_height).map_err(display_error)?;

        let texture_creator = canvas.texture_creator();
        let events = setup.sdl_context.event_pump().map_err(display_error)?;

        Ok(SdlSurface {
            pixels,
            canvas,
            texture_creator,
            events,
            _setup: setup,
        })
    }

    pub fn paint_maze(&mut self, grid: &Grid, start: usize, goal: usize) {
        self.pixels.paint_maze(grid, start, goal);
    }

    pub fn pixels(&self) -> &ImageSurface {
        &self.pixels
    }

    /// Close the window, keeping the last frame.
    pub fn into_pixels(self) -> ImageSurface {
        self.pixels
    }

    /// Keep showing the last frame until the window is closed.
    pub fn wait_until_closed(&mut self) -> Result<()> {
        info!("animation finished, close the window or press q to exit");
        while !self.is_close_requested() {
            self.present()?;
            thread::sleep(Duration::from_millis(16));
        }
        Ok(())
    }

    fn is_close_requested(&mut self) -> bool {
        self.events.poll_iter().any(|event| match event {
            Event::Quit { .. } |
            Event::KeyDown { keycode: Some(Keycode::Q), .. } |
            Event::KeyDown { keycode: Some(Keycode::Escape), .. } => true,
            _ => false,
        })
    }

    fn present(&mut self) -> Result<()> {
        let image = self.pixels.image();
        let (width, height) = image.dimensions();
        let mut texture = self.texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, width, height)
            .map_err(display_error)?;
        texture.update(None, image.as_raw(), width as usize * 3).map_err(display_error)?;

        self.canvas.set_draw_color(Color::RGB(0, 0, 0));
        self.canvas.clear();
        self.canvas.copy(&texture, None, None).map_err(display_error)?;
        self.canvas.present();
        Ok(())
    }
}

impl DrawSurface for SdlSurface {
    fn set_cell(&mut self, coord: Cartesian2DCoordinate, colour: Colour) {
        self.pixels.set_cell(coord, colour);
    }

    fn commit(&mut self) -> Result<()> {
        if self.is_close_requested() {
            bail!(ErrorKind::Display(String::from("the window was closed")));
        }
        self.pixels.commit()?;
        self.present()
    }
}
