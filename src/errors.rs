// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// Defines the From conversions that let ? work for our `Error`.
use error_chain::error_chain;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ImageError(::image::ImageError);
        CellLink(crate::grid::CellLinkError);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: width and height must be at least 1", width, height)
        }
        GridTooLarge(width: usize, height: usize) {
            description("grid too large")
            display("grid dimensions {}x{} exceed the supported cell count", width, height)
        }
        WorkStackExhausted(cells: usize) {
            description("backtracking work stack could not be allocated")
            display("could not reserve a backtracking work stack for {} cells", cells)
        }
        InvalidWallRotation(degrees: f32) {
            description("invalid wall rotation")
            display("wall rotation must be a finite number of degrees, got {}", degrees)
        }
        InvalidCellSpacing(spacing: f32) {
            description("invalid cell spacing")
            display("cell spacing must be a finite distance, got {}", spacing)
        }
    }
}
