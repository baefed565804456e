use std::fmt;

use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::generators::{Maze, MazeOpenings};
use crate::grid::Grid;
use crate::pathing::Distances;
use crate::turns::TurnLayout;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cartesian2DCoordinate) -> String {
        String::from("   ")
    }
}

/// Empty cell bodies.
#[derive(Debug, Copy, Clone)]
pub struct BlankDisplay;
impl GridDisplay for BlankDisplay {}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: SmallVec<[Cartesian2DCoordinate; 4]>,
    end_coordinates: SmallVec<[Cartesian2DCoordinate; 4]>,
}
impl StartEndPointsDisplay {
    pub fn new(starts: &[Cartesian2DCoordinate],
               ends: &[Cartesian2DCoordinate])
               -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts.iter().cloned().collect(),
            end_coordinates: ends.iter().cloned().collect(),
        }
    }

    pub fn from_openings(openings: &MazeOpenings) -> StartEndPointsDisplay {
        StartEndPointsDisplay::new(&[openings.entrance], &[openings.exit])
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {

        let contains_coordinate = |coordinates: &[Cartesian2DCoordinate]| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")

        } else if contains_coordinate(&self.end_coordinates) {

            String::from(" E ")

        } else {
            String::from("   ")
        }
    }
}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// Render a grid as box drawing text, north at the top.
///
/// The walls are drawn on a lattice of `(width + 1) * (height + 1)` corner points. A lattice
/// segment is drawn if the wall of either cell beside it stands, so boundary openings show up
/// as gaps in the outline.
pub fn render_text(grid: &Grid, displayer: &dyn GridDisplay) -> String {
    let (w, h) = (grid.width().0, grid.height().0);
    let mut output = String::new();

    for corner_y in (0..=h).rev() {

        // corners and the horizontal walls between them
        for corner_x in 0..=w {
            let left = corner_x > 0 && horizontal_wall(grid, corner_x - 1, corner_y);
            let right = corner_x < w && horizontal_wall(grid, corner_x, corner_y);
            let up = corner_y < h && vertical_wall(grid, corner_x, corner_y);
            let down = corner_y > 0 && vertical_wall(grid, corner_x, corner_y - 1);
            output.push_str(corner_glyph(left, right, up, down));

            if corner_x < w {
                output.push_str(if right { WALL_LR_3 } else { "   " });
            }
        }
        output.push('\n');

        if corner_y == 0 {
            break;
        }

        // the row of cells below this line of corners
        let row = corner_y - 1;
        for column in 0..=w {
            output.push_str(if vertical_wall(grid, column, row) { WALL_UD } else { " " });
            if column < w {
                let coord = Cartesian2DCoordinate::new(column as u32, row as u32);
                output.push_str(displayer.render_cell_body(coord).as_str());
            }
        }
        output.push('\n');
    }

    output
}

/// The wall on the lattice line `y` under column `x`: the south wall of cell (x, y) or the
/// north wall of cell (x, y - 1).
fn horizontal_wall(grid: &Grid, x: usize, y: usize) -> bool {
    let above = Cartesian2DCoordinate::new(x as u32, y as u32);
    let below = Cartesian2DCoordinate::new(x as u32, y.wrapping_sub(1) as u32);
    let above_wall = y < grid.height().0 && grid.cell(above).wall(CompassPrimary::South);
    let below_wall = y > 0 && grid.cell(below).wall(CompassPrimary::North);
    above_wall || below_wall
}

/// The wall on the lattice line `x` beside row `y`: the west wall of cell (x, y) or the east
/// wall of cell (x - 1, y).
fn vertical_wall(grid: &Grid, x: usize, y: usize) -> bool {
    let right = Cartesian2DCoordinate::new(x as u32, y as u32);
    let left = Cartesian2DCoordinate::new(x.wrapping_sub(1) as u32, y as u32);
    let right_wall = x < grid.width().0 && grid.cell(right).wall(CompassPrimary::West);
    let left_wall = x > 0 && grid.cell(left).wall(CompassPrimary::East);
    right_wall || left_wall
}

fn corner_glyph(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, &BlankDisplay))
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let markers = StartEndPointsDisplay::from_openings(&self.openings);
        write!(f, "{}", render_text(&self.grid, &markers))
    }
}

impl fmt::Display for TurnLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_wall_grid() {
            Ok(grid) => write!(f, "{}", grid),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::ExitEdge;
    use crate::turns::WallOrientation;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn closed_single_cell() {
        let g = Grid::new(Width(1), Height(1)).unwrap();
        assert_eq!(g.to_string(), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn two_cells_with_openings() {
        let mut grid = Grid::new(Width(2), Height(1)).unwrap();
        grid.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        let openings = MazeOpenings {
            entrance: gc(0, 0),
            exit: gc(1, 0),
            exit_edge: ExitEdge::Right,
        };
        crate::generators::open_maze(&mut grid, &openings).unwrap();

        let expected = "╶───────╴\n         \n╶───────╴\n";
        assert_eq!(grid.to_string(), expected);

        let maze = Maze { grid, openings, seed: 0 };
        let expected_marked = "╶───────╴\n  S   E  \n╶───────╴\n";
        assert_eq!(maze.to_string(), expected_marked);
    }

    #[test]
    fn top_rows_print_first() {
        let mut g = Grid::new(Width(1), Height(2)).unwrap();
        g.carve_passage(gc(0, 0), gc(0, 1)).unwrap();
        let markers = StartEndPointsDisplay::new(&[gc(0, 1)], &[gc(0, 0)]);
        assert_eq!(render_text(&g, &markers), "┌───┐\n│ S │\n│   │\n│ E │\n└───┘\n");
    }

    #[test]
    fn distance_bodies() {
        let mut g = Grid::new(Width(3), Height(1)).unwrap();
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        g.carve_passage(gc(1, 0), gc(2, 0)).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.render_cell_body(gc(2, 0)), " 2 ");
        assert_eq!(render_text(&g, &distances),
                   "┌───────────┐\n│ 0   1   2 │\n└───────────┘\n");
    }

    #[test]
    fn turn_layout_text() {
        let layout = TurnLayout::from_orientations(Width(2), Height(1), 90.0,
                                                   vec![WallOrientation::Default,
                                                        WallOrientation::Rotated])
            .unwrap();
        assert_eq!(layout.to_string(), "┌───┬───┐\n│   │   │\n└───┴───┘\n");
    }
}
