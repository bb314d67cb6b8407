// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`.
// Other modules in the crate `use errors::*;` to get access to everything
// `error_chain!` creates.
use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: width and height must both be at least 1", width, height)
        }
        CellOutOfBounds(index: usize, size: usize) {
            description("cell index outside of the grid")
            display("cell index {} is outside of a grid with {} cells", index, size)
        }
        WallEndpoint(index: usize) {
            description("search endpoint is a wall")
            display("cell {} is a wall and cannot start or end a search", index)
        }
        InvalidBatchSize {
            description("animation batch size must be at least 1")
        }
        GridParse(reason: String) {
            description("invalid grid layout")
            display("invalid grid layout: {}", reason)
        }
        Display(reason: String) {
            description("display surface failure")
            display("display surface failure: {}", reason)
        }
    }
}
