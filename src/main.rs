use docopt::Docopt;
use log::info;
use mazesolver::{
    animation::{self, AnimationOptionsBuilder, DrawSurface, Immediate},
    generators,
    grid::Grid,
    grid_displays::{self, GridDisplay, PathDisplay, StartEndPointsDisplay},
    pathing::{SearchStrategy, Solution},
    renderers::ImageSurface,
    units::{Height, Width},
};
use rand::{rngs::StdRng, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Solver

Generates a perfect maze with randomised Prim and solves it from the top left corner
to the bottom right corner with depth first or breadth first search.

Usage:
    mazesolver_driver -h | --help
    mazesolver_driver [options]
    mazesolver_driver solve (dfs|bfs) [options]
    mazesolver_driver compare [options]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid size is n * n.
    --grid-width=<w>       The grid width in a w*h grid [default: 320].
    --grid-height=<h>      The grid height in a w*h grid [default: 320].
    --seed=<s>             Seed the maze generator for a reproducible maze.
    --batch-size=<n>       Visited cells painted per animation frame [default: 600].
    --cell-pixels=<n>      Pixel side length of one cell in image output [default: 4].
    --fps=<n>              Animation frames per second in the on screen view [default: 60].
    --image-out=<path>     Output file path for a PNG of the maze, after the animation when solving.
    --frames-dir=<path>    Directory to write every animation frame to as a numbered PNG.
    --text-out=<path>      Output file path for a textual rendering of the maze and solution path.
    --show-text            Print a textual rendering of the maze and solution path.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --screen-view          Animate the search in a window. Needs the sdl feature.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_solve: bool,
    cmd_dfs: bool,
    cmd_bfs: bool,
    cmd_compare: bool,
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_batch_size: usize,
    flag_cell_pixels: u32,
    flag_fps: u32,
    flag_image_out: String,
    flag_frames_dir: String,
    flag_text_out: String,
    flag_show_text: bool,
    flag_save_edges: String,
    flag_screen_view: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazesolver::errors::Error, ::mazesolver::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (Width(square_grid_size), Height(square_grid_size))
    } else {
        (Width(args.flag_grid_width), Height(args.flag_grid_height))
    };

    let maze = generate_maze(width, height, args.flag_seed)?;
    let (start, goal) = (0, maze.size() - 1);

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    if args.cmd_compare {
        let solutions = [SearchStrategy::DepthFirst, SearchStrategy::BreadthFirst]
            .iter()
            .map(|strategy| strategy.solve(&maze, start, goal))
            .collect::<mazesolver::errors::Result<Vec<_>>>()?;
        for solution in solutions.iter() {
            println!("{}", status_line(solution));
        }
        let breadth_first = &solutions[1];
        render_text(&maze, Some(breadth_first), &args)?;
        render_image(&maze, Some(breadth_first), &args)?;

    } else if args.cmd_solve {
        let strategy = if args.cmd_dfs {
            SearchStrategy::DepthFirst
        } else {
            SearchStrategy::BreadthFirst
        };
        let solution = strategy.solve(&maze, start, goal)?;
        println!("{}", status_line(&solution));
        render_text(&maze, Some(&solution), &args)?;
        animate_solution(&maze, &solution, &args)?;

    } else {
        println!("Maze {}x{}: {} passages out of {} cells",
                 width.0, height.0, maze.passage_count(), maze.size());
        render_text(&maze, None, &args)?;
        render_image(&maze, None, &args)?;
    }

    Ok(())
}

fn generate_maze(width: Width, height: Height, seed: Option<u64>) -> Result<Grid> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let maze = generators::prim_with_rng(width, height, &mut rng)
        .chain_err(|| format!("Failed to generate a {}x{} maze", width.0, height.0))?;
    info!("generated a {}x{} maze with {} passages", width.0, height.0, maze.passage_count());
    Ok(maze)
}

/// The status line shown after every solve, e.g.
/// `Runtime: 1.25 ms | Visited: 2048 | Path Length: 640 (BFS)`
fn status_line(solution: &Solution) -> String {
    format!("Runtime: {:.2} ms | Visited: {} | Path Length: {} ({})",
            solution.elapsed_ms(),
            solution.visited_count(),
            solution.path_length(),
            solution.strategy())
}

fn render_text(maze: &Grid, solution: Option<&Solution>, args: &MazeArgs) -> Result<()> {
    if !args.flag_show_text && args.flag_text_out.is_empty() {
        return Ok(());
    }

    let end_points = StartEndPointsDisplay::new(maze.coordinate(0), maze.coordinate(maze.size() - 1));
    let path = solution.and_then(Solution::path)
        .map(|path| PathDisplay::from_indices(maze, path));

    let mut displays: Vec<&dyn GridDisplay> = vec![&end_points];
    if let Some(ref path) = path {
        displays.push(path);
    }
    let text = grid_displays::render_grid(maze, &displays);

    if args.flag_show_text {
        print!("{}", text);
    }
    if !args.flag_text_out.is_empty() {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }
    Ok(())
}

fn new_image_surface(maze: &Grid, args: &MazeArgs) -> Result<ImageSurface> {
    let mut surface = ImageSurface::new(maze.width(), maze.height(), args.flag_cell_pixels)?;
    if !args.flag_frames_dir.is_empty() {
        surface = surface.with_frames_dir(&args.flag_frames_dir)?;
    }
    surface.paint_maze(maze, 0, maze.size() - 1);
    Ok(surface)
}

/// Still image of the maze, with the solution path drawn when there is one.
fn render_image(maze: &Grid, solution: Option<&Solution>, args: &MazeArgs) -> Result<()> {
    if args.flag_image_out.is_empty() {
        return Ok(());
    }
    let mut surface = ImageSurface::new(maze.width(), maze.height(), args.flag_cell_pixels)?;
    surface.paint_maze(maze, 0, maze.size() - 1);
    if let Some(path) = solution.and_then(Solution::path) {
        let colour = animation::PATH_GREEN;
        for index in path {
            surface.set_cell(maze.coordinate(*index), colour);
        }
    }
    surface.save_png(&args.flag_image_out)?;
    Ok(())
}

fn animate_solution(maze: &Grid, solution: &Solution, args: &MazeArgs) -> Result<()> {
    let wants_animation = args.flag_screen_view || !args.flag_image_out.is_empty() ||
                          !args.flag_frames_dir.is_empty();
    if !wants_animation {
        return Ok(());
    }

    let options = AnimationOptionsBuilder::new()
        .batch_size(args.flag_batch_size)
        .build()?;
    let surface = new_image_surface(maze, args)?;

    let surface = if args.flag_screen_view {
        animate_on_screen(maze, solution, surface, options, args.flag_fps)?
    } else {
        let mut surface = surface;
        let summary = animation::animate_solution(maze, solution, &mut surface, &mut Immediate, options)?;
        info!("animation finished: {:?}", summary);
        surface
    };

    if !args.flag_image_out.is_empty() {
        surface.save_png(&args.flag_image_out)?;
    }
    Ok(())
}

#[cfg(feature = "sdl")]
fn animate_on_screen(maze: &Grid,
                     solution: &Solution,
                     surface: ImageSurface,
                     options: animation::AnimationOptions,
                     fps: u32)
                     -> Result<ImageSurface> {
    use mazesolver::{animation::FixedFrameRate, sdl::SdlSurface};

    let title = format!("Maze Solver ({})", solution.strategy());
    let mut window = SdlSurface::new(&title, surface)?;
    let mut scheduler = FixedFrameRate::new(fps);
    let summary = animation::animate_solution(maze, solution, &mut window, &mut scheduler, options)?;
    info!("animation finished: {:?}", summary);
    window.wait_until_closed()?;
    Ok(window.into_pixels())
}

#[cfg(not(feature = "sdl"))]
fn animate_on_screen(_maze: &Grid,
                     _solution: &Solution,
                     _surface: ImageSurface,
                     _options: animation::AnimationOptions,
                     _fps: u32)
                     -> Result<ImageSurface> {
    Err("--screen-view needs the driver built with the sdl feature (cargo run --features sdl)".into())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let links = maze_grid.passage_links();
    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze_grid.size(), links.len()));

    for (index_a, index_b) in links {
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
