//! The turn generator: every cell gets a floor tile and one wall at one of two orientations.
//!
//! Nothing links the cells together, so unlike the backtracker the layout is not guaranteed to be
//! solvable.

use log::info;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::config::MazeConfig;
use crate::errors::{ErrorKind, Result};
use crate::grid::{Grid, MAX_GRID_CELLS};
use crate::units::{Height, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallOrientation {
    /// Zero degrees, the wall runs along the cell's south edge.
    Default,
    /// Turned by the layout's wall rotation, the wall runs along the cell's west edge.
    Rotated,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct TurnTile {
    pub coord: Cartesian2DCoordinate,
    pub orientation: WallOrientation,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum InstanceKind {
    Floor,
    DefaultWall,
    RotatedWall,
}

/// One placed piece of geometry for a renderer.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Instance {
    pub kind: InstanceKind,
    pub coord: Cartesian2DCoordinate,
    /// `(x, y) * cell_spacing`
    pub position: (f32, f32),
    pub yaw_degrees: f32,
}

#[derive(PartialEq, Clone, Debug)]
pub struct TurnLayout {
    width: Width,
    height: Height,
    wall_rotation_degrees: f32,
    tiles: Vec<TurnTile>,
    seed: Option<u64>,
}

/// Generate a turn layout from a configuration. The seed used is kept in the layout and logged.
pub fn turn_layout(config: &MazeConfig) -> Result<TurnLayout> {
    config.validate()?;
    let (mut rng, seed) = config.rng();
    let layout = TurnLayout::generate(config.width,
                                      config.height,
                                      config.wall_rotation_degrees,
                                      &mut rng)?
        .with_seed(seed);
    info!("generated {}x{} turn layout with seed {}, {} rotated walls",
          config.width.0, config.height.0, seed, layout.rotated_count());
    Ok(layout)
}

impl TurnLayout {
    /// Visit the cells in row major order drawing one coin flip each: heads rotates the wall.
    pub fn generate<R: Rng>(width: Width,
                            height: Height,
                            wall_rotation_degrees: f32,
                            rng: &mut R)
                            -> Result<TurnLayout> {
        let cells_count = checked_cells_count(width, height, wall_rotation_degrees)?;
        let orientations = (0..cells_count)
            .map(|_| if rng.gen::<bool>() { WallOrientation::Rotated } else { WallOrientation::Default })
            .collect();
        TurnLayout::from_orientations(width, height, wall_rotation_degrees, orientations)
    }

    /// Build a layout from known orientations, one per cell in row major order.
    pub fn from_orientations(width: Width,
                             height: Height,
                             wall_rotation_degrees: f32,
                             orientations: Vec<WallOrientation>)
                             -> Result<TurnLayout> {
        let cells_count = checked_cells_count(width, height, wall_rotation_degrees)?;
        if orientations.len() != cells_count {
            return Err(format!("expected {} wall orientations for a {}x{} layout, got {}",
                               cells_count, width.0, height.0, orientations.len()).into());
        }

        let tiles = orientations
            .into_iter()
            .enumerate()
            .map(|(index, orientation)| TurnTile {
                coord: Cartesian2DCoordinate::from_row_major_index(index, width),
                orientation,
            })
            .collect();

        Ok(TurnLayout {
            width,
            height,
            wall_rotation_degrees,
            tiles,
            seed: None,
        })
    }

    /// Record the seed of the rng the layout was drawn from.
    pub fn with_seed(mut self, seed: u64) -> TurnLayout {
        self.seed = Some(seed);
        self
    }

    /// The seed that reproduces this layout, if it came from a seeded run.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn wall_rotation_degrees(&self) -> f32 {
        self.wall_rotation_degrees
    }

    /// Tiles in row major order.
    #[inline]
    pub fn tiles(&self) -> &[TurnTile] {
        &self.tiles
    }

    /// Panics if the coordinate is outside the layout.
    pub fn tile(&self, coord: Cartesian2DCoordinate) -> &TurnTile {
        let (Width(w), Height(h)) = (self.width, self.height);
        if (coord.x as usize) >= w || (coord.y as usize) >= h {
            panic!("coordinate ({}, {}) is outside the {}x{} layout", coord.x, coord.y, w, h);
        }
        &self.tiles[coord.y as usize * w + coord.x as usize]
    }

    pub fn rotated_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.orientation == WallOrientation::Rotated).count()
    }

    /// A floor then a wall instance for every cell, in row major order.
    pub fn instances(&self, cell_spacing: f32) -> Vec<Instance> {
        let mut instances = Vec::with_capacity(self.tiles.len() * 2);
        for tile in &self.tiles {
            let position = (tile.coord.x as f32 * cell_spacing, tile.coord.y as f32 * cell_spacing);
            instances.push(Instance {
                kind: InstanceKind::Floor,
                coord: tile.coord,
                position,
                yaw_degrees: 0.0,
            });
            let (kind, yaw_degrees) = match tile.orientation {
                WallOrientation::Default => (InstanceKind::DefaultWall, 0.0),
                WallOrientation::Rotated => (InstanceKind::RotatedWall, self.wall_rotation_degrees),
            };
            instances.push(Instance {
                kind,
                coord: tile.coord,
                position,
                yaw_degrees,
            });
        }
        instances
    }

    /// The layout as a walled grid: the outer boundary is closed, interior edges are open unless
    /// a tile's wall stands on them. A default wall covers the cell's south edge, a rotated wall
    /// its west edge.
    pub fn to_wall_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.width, self.height)?;
        for coord in grid.iter() {
            for dir in &[CompassPrimary::East, CompassPrimary::North] {
                if let Some(neighbour) = grid.neighbour_at_direction(coord, *dir) {
                    grid.carve_passage(coord, neighbour)?;
                }
            }
        }

        for tile in &self.tiles {
            let edge = match tile.orientation {
                WallOrientation::Default => CompassPrimary::South,
                WallOrientation::Rotated => CompassPrimary::West,
            };
            grid.cell_mut(tile.coord).set_wall(edge, true);
            if let Some(neighbour) = grid.neighbour_at_direction(tile.coord, edge) {
                grid.cell_mut(neighbour).set_wall(edge.opposite(), true);
            }
        }
        Ok(grid)
    }
}

fn checked_cells_count(width: Width, height: Height, wall_rotation_degrees: f32) -> Result<usize> {
    let (Width(w), Height(h)) = (width, height);
    if w == 0 || h == 0 {
        return Err(ErrorKind::InvalidDimensions(w, h).into());
    }
    if !wall_rotation_degrees.is_finite() {
        return Err(ErrorKind::InvalidWallRotation(wall_rotation_degrees).into());
    }
    w.checked_mul(h)
     .filter(|&count| count <= MAX_GRID_CELLS)
     .ok_or_else(|| ErrorKind::GridTooLarge(w, h).into())
}
