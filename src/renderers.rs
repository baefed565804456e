use std::path::Path;

use image::{Rgb, RgbImage};
use log::{debug, info};

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::{ErrorKind, Result};
use crate::grid::Grid;
use crate::pathing::Distances;

const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GREEN: Rgb<u8> = Rgb([0, 0xc0, 0]);
const RED: Rgb<u8> = Rgb([0xe0, 0, 0]);

pub const DEFAULT_CELL_SIDE_PIXELS: u8 = 10;

#[derive(Debug)]
pub struct RenderOptions<'path, 'dist> {
    colour_distances: bool,
    mark_start_end: bool,
    start: Option<Cartesian2DCoordinate>,
    end: Option<Cartesian2DCoordinate>,
    distances: Option<&'dist Distances>,
    output_file: Option<&'path Path>,
    cell_side_pixels_length: u8,
}

#[derive(Debug)]
pub struct RenderOptionsBuilder<'path, 'dist> {
    options: RenderOptions<'path, 'dist>,
}
impl<'path, 'dist> RenderOptionsBuilder<'path, 'dist> {
    pub fn new() -> RenderOptionsBuilder<'path, 'dist> {
        RenderOptionsBuilder {
            options: RenderOptions {
                colour_distances: false,
                mark_start_end: false,
                start: None,
                end: None,
                distances: None,
                output_file: None,
                cell_side_pixels_length: DEFAULT_CELL_SIDE_PIXELS,
            },
        }
    }
    pub fn colour_distances(mut self, colour_distances: bool) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.colour_distances = colour_distances;
        self
    }
    pub fn mark_start_end(mut self, mark_start_end: bool) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.mark_start_end = mark_start_end;
        self
    }
    pub fn start(mut self, start: Option<Cartesian2DCoordinate>) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.start = start;
        self
    }
    pub fn end(mut self, end: Option<Cartesian2DCoordinate>) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.end = end;
        self
    }
    pub fn distances(mut self, distances: Option<&'dist Distances>) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.distances = distances;
        self
    }
    pub fn output_file(mut self, output_file: Option<&'path Path>) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.output_file = output_file;
        self
    }
    pub fn cell_side_pixels_length(mut self, cell_side_pixels_length: u8) -> RenderOptionsBuilder<'path, 'dist> {
        self.options.cell_side_pixels_length = cell_side_pixels_length;
        self
    }
    pub fn build(self) -> RenderOptions<'path, 'dist> {
        self.options
    }
}
impl<'path, 'dist> Default for RenderOptionsBuilder<'path, 'dist> {
    fn default() -> RenderOptionsBuilder<'path, 'dist> {
        RenderOptionsBuilder::new()
    }
}

/// Draw the maze walls onto a white image, north at the top, then save it as a PNG if an output
/// file was given.
///
/// Walls are drawn from each cell's own wall flags, so entrance and exit openings in the outer
/// boundary are left as gaps.
pub fn render_png(grid: &Grid, options: &RenderOptions) -> Result<RgbImage> {

    let cell_size_pixels = u32::from(options.cell_side_pixels_length.max(1));
    let (img_width, img_height) = image_dimensions(grid, cell_size_pixels)?;
    let mut img = RgbImage::from_pixel(img_width, img_height, WHITE);
    let rows = grid.height().0 as u32;

    for coord in grid.iter() {
        // image rows grow downwards, grid rows grow northwards
        let x1 = coord.x * cell_size_pixels;
        let y1 = (rows - 1 - coord.y) * cell_size_pixels;
        let x2 = x1 + cell_size_pixels;
        let y2 = y1 + cell_size_pixels;

        if options.colour_distances {
            if let Some(distances) = options.distances {
                let colour = distance_colour(distances, coord);
                fill_rect(&mut img, (x1 + 1, y1 + 1), (x2, y2), colour);
            }
        }

        let cell = grid.cell(coord);
        if cell.wall(CompassPrimary::North) {
            draw_horizontal_line(&mut img, x1, x2, y1);
        }
        if cell.wall(CompassPrimary::South) {
            draw_horizontal_line(&mut img, x1, x2, y2);
        }
        if cell.wall(CompassPrimary::West) {
            draw_vertical_line(&mut img, x1, y1, y2);
        }
        if cell.wall(CompassPrimary::East) {
            draw_vertical_line(&mut img, x2, y1, y2);
        }
    }

    if options.mark_start_end {
        let markers = [(options.start, GREEN), (options.end, RED)];
        for &(point, colour) in &markers {
            if let Some(coord) = point.filter(|&c| grid.is_valid_coordinate(c)) {
                let x1 = coord.x * cell_size_pixels;
                let y1 = (rows - 1 - coord.y) * cell_size_pixels;
                let inset = cell_size_pixels / 4;
                fill_rect(&mut img,
                          (x1 + inset + 1, y1 + inset + 1),
                          (x1 + cell_size_pixels - inset, y1 + cell_size_pixels - inset),
                          colour);
            }
        }
    }

    if let Some(file_path) = options.output_file {
        img.save(file_path)?;
        info!("saved {}x{} maze image to {}", img_width, img_height, file_path.display());
    } else {
        debug!("rendered {}x{} maze image", img_width, img_height);
    }

    Ok(img)
}

fn image_dimensions(grid: &Grid, cell_size_pixels: u32) -> Result<(u32, u32)> {
    let side = |cells: usize| {
        (cells as u64)
            .checked_mul(u64::from(cell_size_pixels))
            .map(|pixels| pixels + 1)
            .filter(|&pixels| pixels <= u64::from(u32::MAX))
            .map(|pixels| pixels as u32)
    };
    match (side(grid.width().0), side(grid.height().0)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ErrorKind::GridTooLarge(grid.width().0, grid.height().0).into()),
    }
}

/// Green shading, bright near the distances start fading darker further away.
fn distance_colour(distances: &Distances, coord: Cartesian2DCoordinate) -> Rgb<u8> {
    match distances.distance_from_start_to(coord) {
        Some(d) => {
            let max = distances.max().max(1) as f32;
            let intensity = (max - d as f32) / max;
            let dark = (255.0 * intensity) as u8;
            let bright = 128 + (127.0 * intensity) as u8;
            Rgb([dark, bright, dark])
        }
        None => WHITE,
    }
}

// exclusive of the far corner
fn fill_rect(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), colour: Rgb<u8>) {
    for x in from.0..to.0 {
        for y in from.1..to.1 {
            img.put_pixel(x, y, colour);
        }
    }
}

fn draw_horizontal_line(img: &mut RgbImage, x1: u32, x2: u32, y: u32) {
    for x in x1..=x2 {
        img.put_pixel(x, y, BLACK);
    }
}

fn draw_vertical_line(img: &mut RgbImage, x: u32, y1: u32, y2: u32) {
    for y in y1..=y2 {
        img.put_pixel(x, y, BLACK);
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn closed_cell_has_walls_on_every_side() {
        let g = Grid::new(Width(1), Height(1)).unwrap();
        let img = render_png(&g, &RenderOptionsBuilder::new().build()).unwrap();
        assert_eq!(img.dimensions(), (11, 11));
        assert_eq!(*img.get_pixel(0, 5), BLACK);
        assert_eq!(*img.get_pixel(10, 5), BLACK);
        assert_eq!(*img.get_pixel(5, 0), BLACK);
        assert_eq!(*img.get_pixel(5, 10), BLACK);
        assert_eq!(*img.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn openings_and_passages_leave_gaps() {
        let mut g = Grid::new(Width(2), Height(1)).unwrap();
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        g.open_boundary(gc(0, 0), CompassPrimary::West).unwrap();
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(4).build();
        let img = render_png(&g, &options).unwrap();
        assert_eq!(img.dimensions(), (9, 5));
        assert_eq!(*img.get_pixel(0, 2), WHITE);
        assert_eq!(*img.get_pixel(4, 2), WHITE);
        assert_eq!(*img.get_pixel(8, 2), BLACK);
    }

    #[test]
    fn north_is_drawn_at_the_top() {
        let mut g = Grid::new(Width(1), Height(2)).unwrap();
        g.open_boundary(gc(0, 1), CompassPrimary::North).unwrap();
        let options = RenderOptionsBuilder::new().cell_side_pixels_length(4).build();
        let img = render_png(&g, &options).unwrap();
        assert_eq!(img.dimensions(), (5, 9));
        assert_eq!(*img.get_pixel(2, 0), WHITE);
        assert_eq!(*img.get_pixel(2, 8), BLACK);
    }

    #[test]
    fn distances_and_markers_fill_cells() {
        let mut g = Grid::new(Width(2), Height(1)).unwrap();
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        let options = RenderOptionsBuilder::new()
            .cell_side_pixels_length(8)
            .colour_distances(true)
            .distances(Some(&distances))
            .build();
        let img = render_png(&g, &options).unwrap();
        assert_eq!(*img.get_pixel(4, 4), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(12, 4), Rgb([0, 128, 0]));

        let options = RenderOptionsBuilder::new()
            .cell_side_pixels_length(8)
            .mark_start_end(true)
            .start(Some(gc(0, 0)))
            .end(Some(gc(1, 0)))
            .build();
        let img = render_png(&g, &options).unwrap();
        assert_eq!(*img.get_pixel(4, 4), GREEN);
        assert_eq!(*img.get_pixel(12, 4), RED);
    }

    #[test]
    fn saves_png_files() {
        let g = Grid::new(Width(3), Height(2)).unwrap();
        let path = std::env::temp_dir().join(format!("maze_gen_render_{}.png", std::process::id()));
        let options = RenderOptionsBuilder::new().output_file(Some(&path)).build();
        render_png(&g, &options).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (31, 21));
        std::fs::remove_file(&path).unwrap();
    }
}
