use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::config::MazeConfig;
use crate::errors::{ErrorKind, Result};
use crate::grid::Grid;
use crate::units::{Height, Width};

/// Neighbour enumeration order used by the backtracker before shuffling: left, right, down, up.
const CANDIDATE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::West,
                                                   CompassPrimary::East,
                                                   CompassPrimary::South,
                                                   CompassPrimary::North];

/// Which outer edge of the maze holds the exit.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ExitEdge {
    /// The exit is in the east most column, through an east wall.
    Right,
    /// The exit is in the north most row, through a north wall.
    Top,
}

impl ExitEdge {
    #[inline]
    pub fn wall(self) -> CompassPrimary {
        match self {
            ExitEdge::Right => CompassPrimary::East,
            ExitEdge::Top => CompassPrimary::North,
        }
    }
}

/// The two boundary openings of a backtracking maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeOpenings {
    pub entrance: Cartesian2DCoordinate,
    pub exit: Cartesian2DCoordinate,
    pub exit_edge: ExitEdge,
}

impl MazeOpenings {
    /// The entrance is always through the west wall of `(0, 0)`.
    pub const ENTRANCE_WALL: CompassPrimary = CompassPrimary::West;

    #[inline]
    pub fn exit_wall(&self) -> CompassPrimary {
        self.exit_edge.wall()
    }
}

/// A finished perfect maze, its openings and the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub openings: MazeOpenings,
    pub seed: u64,
}

/// Generate a backtracking maze from a configuration, the explicit entry point for callers.
///
/// The configuration is validated before the grid is allocated. The seed used, drawn at random
/// when the configuration has none, is returned in the maze and logged.
pub fn backtracking_maze(config: &MazeConfig) -> Result<Maze> {
    config.validate()?;
    let (mut rng, seed) = config.rng();
    let (grid, openings) = carve_passages(config.width, config.height, &mut rng)?;
    info!("generated {}x{} backtracking maze with seed {}, exit at {:?} ({:?} edge)",
          config.width.0, config.height.0, seed, openings.exit, openings.exit_edge);
    Ok(Maze { grid, openings, seed })
}

/// Generate a backtracking maze from a fixed seed.
pub fn carve_maze(width: Width, height: Height, seed: u64) -> Result<Maze> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let (grid, openings) = carve_passages(width, height, &mut rng)?;
    Ok(Maze { grid, openings, seed })
}

/// Carve an opened perfect maze with an injected random source.
///
/// The exit edge and position are drawn first, then the grid is carved from the entrance
/// at `(0, 0)`, then both boundary walls are removed.
pub fn carve_passages<R: Rng>(width: Width, height: Height, rng: &mut R) -> Result<(Grid, MazeOpenings)> {
    let mut grid = Grid::new(width, height)?;
    let openings = choose_openings(width, height, rng);
    debug!("maze openings {:?}", openings);

    recursive_backtracker(&mut grid, openings.entrance, rng)?;
    open_maze(&mut grid, &openings)?;

    Ok((grid, openings))
}

/// Pick the entrance and exit of a maze.
///
/// The exit is on the right edge or the top edge with equal chance, at a uniformly random
/// position along that edge.
pub fn choose_openings<R: Rng>(width: Width, height: Height, rng: &mut R) -> MazeOpenings {
    let (Width(w), Height(h)) = (width, height);
    let is_right_edge: bool = rng.gen();
    let (exit, exit_edge) = if is_right_edge {
        let y = rng.gen_range(0..h);
        (Cartesian2DCoordinate::new((w - 1) as u32, y as u32), ExitEdge::Right)
    } else {
        let x = rng.gen_range(0..w);
        (Cartesian2DCoordinate::new(x as u32, (h - 1) as u32), ExitEdge::Top)
    };

    MazeOpenings {
        entrance: Cartesian2DCoordinate::new(0, 0),
        exit,
        exit_edge,
    }
}

/// Remove the entrance and exit walls.
pub fn open_maze(grid: &mut Grid, openings: &MazeOpenings) -> Result<()> {
    grid.open_boundary(openings.entrance, MazeOpenings::ENTRANCE_WALL)?;
    grid.open_boundary(openings.exit, openings.exit_wall())?;
    Ok(())
}

struct CarveFrame {
    coord: Cartesian2DCoordinate,
    candidates: CoordinateSmallVec,
    next: usize,
}

/// Apply the recursive backtracker maze generation algorithm to a grid, starting at `start`.
///
/// A depth first walk: mark the current cell visited, gather its unvisited neighbours, shuffle
/// them, then for each neighbour still unvisited when its turn comes carve a passage to it and
/// walk on from there. When a cell runs out of neighbours the walk backs up to the cell it came
/// from. Every cell is reached exactly once through exactly one passage, giving a perfect maze.
///
/// The path back to the start is kept on an explicit stack rather than the call stack, with one
/// frame per cell on the current path, so long corridors on big grids cannot overflow the thread's
/// stack. Random draws happen in the same order as the plain recursive formulation.
///
/// Panics if `start` is outside the grid.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid,
                                     start: Cartesian2DCoordinate,
                                     rng: &mut R)
                                     -> Result<()> {
    let cells_count = grid.size();
    let mut stack: Vec<CarveFrame> = Vec::new();
    let mut deepest = 0;

    let first = enter_cell(grid, start, rng);
    push_frame(&mut stack, first, cells_count)?;

    while let Some(frame) = stack.last_mut() {

        if frame.next >= frame.candidates.len() {
            // Dead end, back up.
            stack.pop();
            continue;
        }

        let current = frame.coord;
        let candidate = frame.candidates[frame.next];
        frame.next += 1;

        // A deeper walk from an earlier sibling may have reached this cell already.
        if !grid.cell(candidate).visited {
            grid.carve_passage(current, candidate)?;
            let next_frame = enter_cell(grid, candidate, rng);
            push_frame(&mut stack, next_frame, cells_count)?;
            deepest = deepest.max(stack.len());
        }
    }

    trace!("backtracker deepest path {} of {} cells", deepest, cells_count);
    Ok(())
}

fn enter_cell<R: Rng>(grid: &mut Grid, coord: Cartesian2DCoordinate, rng: &mut R) -> CarveFrame {
    grid.cell_mut(coord).visited = true;

    let mut candidates = CANDIDATE_DIRECTIONS
        .iter()
        .filter_map(|dir| grid.neighbour_at_direction(coord, *dir))
        .filter(|neighbour| !grid.cell(*neighbour).visited)
        .collect::<CoordinateSmallVec>();
    shuffle(&mut candidates, rng);

    CarveFrame {
        coord,
        candidates,
        next: 0,
    }
}

fn push_frame(stack: &mut Vec<CarveFrame>, frame: CarveFrame, cells_count: usize) -> Result<()> {
    if stack.len() == stack.capacity() {
        let additional = stack.len().max(16);
        stack.try_reserve(additional)
             .map_err(|_| ErrorKind::WorkStackExhausted(cells_count))?;
    }
    stack.push(frame);
    Ok(())
}

/// Fisher-Yates shuffle: from the last index down to 1, swap with a uniformly random index at or
/// below it.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
