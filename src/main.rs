use docopt::Docopt;
use log::{info, warn};
use maze_gen::{
    cells::Cartesian2DCoordinate,
    config::{MazeConfig, MazeConfigBuilder},
    generators,
    grid::Grid,
    grid_displays::{self, StartEndPointsDisplay},
    pathing,
    renderers,
    turns::{self, InstanceKind, TurnLayout},
};
use serde_derive::Deserialize;
use std::{
    io::prelude::*,
    fs::File,
    io,
    path::Path,
};

const USAGE: &str = "Maze Gen

Usage:
    maze_gen_driver -h | --help
    maze_gen_driver backtrack [options]
    maze_gen_driver turn [options] [--instances-out=<path>]

Options:
    -h --help                Show this screen.
    --grid-size=<n>          The grid size is n * n.
    --width=<w>              The grid width in a w*h grid [default: 128].
    --height=<h>             The grid height in a w*h grid [default: 128].
    --seed=<s>               Seed for the random number generator. A random seed is chosen and logged if not given.
    --wall-rotation=<deg>    Yaw in degrees of the rotated walls in a turn layout [default: 90].
    --cell-spacing=<d>       Distance between neighbouring cells when placing turn layout geometry [default: 200].
    --text-out=<path>        Output file path for a textual rendering of a maze.
    --image-out=<path>       Output file path for an image rendering of a maze. Always PNG format.
    --cell-pixels=<n>        Pixel count to render one cell wall in a maze [default: 10] max 255.
    --mark-start-end         Mark the start (S) and end (E) cells.
    --show-distances         Show the passage distance from the start cell to every reachable cell.
    --colour-distances       Shade the image cells by their distance from the start cell.
    --save-edges=<path>      Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --instances-out=<path>   Write the floor and wall placements of a turn layout, one per line: kind x y position_x position_y yaw.

With no --text-out or --image-out the maze is printed as text on stdout.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_backtrack: bool,
    cmd_turn: bool,
    flag_grid_size: Option<usize>,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_wall_rotation: f32,
    flag_cell_spacing: f32,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_mark_start_end: bool,
    flag_show_distances: bool,
    flag_colour_distances: bool,
    flag_save_edges: String,
    flag_instances_out: String,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    // ResultExt adds the `chain_err` trait method.
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_gen::errors::Error, ::maze_gen::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

/// A generated grid with the cells a viewer should treat as start and end.
struct Generated {
    grid: Grid,
    text: String,
    start: Cartesian2DCoordinate,
    end: Cartesian2DCoordinate,
}

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_width, args.flag_height)
    };

    let config = MazeConfigBuilder::new()
        .width(width)
        .height(height)
        .seed(args.flag_seed)
        .wall_rotation_degrees(args.flag_wall_rotation)
        .cell_spacing(args.flag_cell_spacing)
        .build()?;

    let generated = if args.cmd_turn {
        generate_turn_layout(&config, &args)?
    } else {
        generate_backtracking_maze(&config, &args)?
    };

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&generated.grid, &args.flag_save_edges)?;
    }

    let distances = if args.flag_show_distances || args.flag_colour_distances {
        Some(pathing::Distances::new(&generated.grid, generated.start)
                 .ok_or("The start cell is not on the grid.")?)
    } else {
        None
    };

    let do_image_render = !args.flag_image_out.is_empty();
    let do_text_render = !args.flag_text_out.is_empty() || !do_image_render;

    if do_text_render {
        let text = if let (true, Some(distances)) = (args.flag_show_distances, distances.as_ref()) {
            grid_displays::render_text(&generated.grid, distances)
        } else {
            generated.text.clone()
        };

        if args.flag_text_out.is_empty() {
            println!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if do_image_render {
        let render_options = renderers::RenderOptionsBuilder::new()
            .colour_distances(args.flag_colour_distances)
            .mark_start_end(args.flag_mark_start_end)
            .start(Some(generated.start))
            .end(Some(generated.end))
            .distances(distances.as_ref())
            .output_file(Some(Path::new(&args.flag_image_out)))
            .cell_side_pixels_length(args.flag_cell_pixels)
            .build();
        renderers::render_png(&generated.grid, &render_options)
            .chain_err(|| format!("Failed to render maze image {}", args.flag_image_out))?;
    }

    Ok(())
}

fn generate_backtracking_maze(config: &MazeConfig, args: &MazeArgs) -> Result<Generated> {
    let maze = generators::backtracking_maze(config)?;

    let text = if args.flag_mark_start_end {
        maze.to_string()
    } else {
        maze.grid.to_string()
    };

    Ok(Generated {
        start: maze.openings.entrance,
        end: maze.openings.exit,
        text,
        grid: maze.grid,
    })
}

fn generate_turn_layout(config: &MazeConfig, args: &MazeArgs) -> Result<Generated> {
    let layout = turns::turn_layout(config)?;
    let grid = layout.to_wall_grid()?;

    let start = Cartesian2DCoordinate::new(0, 0);
    let end = Cartesian2DCoordinate::new((config.width.0 - 1) as u32, (config.height.0 - 1) as u32);
    if !pathing::path_exists(&grid, start, end) {
        warn!("no route between opposite corners of the turn layout");
    }

    if !args.flag_instances_out.is_empty() {
        save_turn_instances(&layout, config.cell_spacing, &args.flag_instances_out)?;
    }

    let text = if args.flag_mark_start_end {
        grid_displays::render_text(&grid, &StartEndPointsDisplay::new(&[start], &[end]))
    } else {
        layout.to_string()
    };

    Ok(Generated {
        grid,
        text,
        start,
        end,
    })
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.links_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.iter_links() {
        let index_a = maze_grid
            .grid_coordinate_to_index(src)
            .ok_or("Links iter should give valid coordinate")?;
        let index_b = maze_grid
            .grid_coordinate_to_index(dst)
            .ok_or("Links iter should give valid coordinate")?;
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("saved {} vertices and {} edges to {}", vertices_count, edges_count, file_path);

    Ok(())
}

fn save_turn_instances(layout: &TurnLayout, cell_spacing: f32, file_path: &str) -> Result<()> {

    let mut instance_data = String::new();
    for instance in layout.instances(cell_spacing) {
        let kind = match instance.kind {
            InstanceKind::Floor => "floor",
            InstanceKind::DefaultWall => "wall",
            InstanceKind::RotatedWall => "rotated_wall",
        };
        instance_data.push_str(&format!("{} {} {} {} {} {}\n",
                                        kind,
                                        instance.coord.x,
                                        instance.coord.y,
                                        instance.position.0,
                                        instance.position.1,
                                        instance.yaw_degrees));
    }

    write_text_to_file(&instance_data, file_path)
        .chain_err(|| format!("Failed to write turn layout instances to text file {}", file_path))?;

    Ok(())
}
