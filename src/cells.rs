use std::convert::From;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, RowIndex, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, width: Width) -> Cartesian2DCoordinate {
        let Width(w) = width;
        let x = index % w;
        let y = index / w;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// The coordinate one cell away in the given direction.
    /// Returns None if the coordinate is not representable (below zero or overflowing `u32`),
    /// it does not know about any grid bounds.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_add(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::South => y.checked_sub(1).map(|y| Cartesian2DCoordinate { x, y }),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate { x, y }),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate { x, y }),
        }
    }

    /// Which direction `other` lies in if it is one step away from this coordinate.
    pub fn direction_to(self, other: Cartesian2DCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::all()
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The four wall sides of a cell.
/// North is towards increasing `y`, East towards increasing `x`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    #[inline]
    pub fn all() -> [CompassPrimary; 4] {
        [CompassPrimary::North, CompassPrimary::South, CompassPrimary::East, CompassPrimary::West]
    }

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Wall state of one grid position.
///
/// Walls start present; `visited` is only meaningful while a backtracking generator runs.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub visited: bool,
    pub north_wall: bool,
    pub south_wall: bool,
    pub east_wall: bool,
    pub west_wall: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            visited: false,
            north_wall: true,
            south_wall: true,
            east_wall: true,
            west_wall: true,
        }
    }
}

impl Cell {
    #[inline]
    pub fn wall(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.north_wall,
            CompassPrimary::South => self.south_wall,
            CompassPrimary::East => self.east_wall,
            CompassPrimary::West => self.west_wall,
        }
    }

    #[inline]
    pub fn set_wall(&mut self, dir: CompassPrimary, present: bool) {
        match dir {
            CompassPrimary::North => self.north_wall = present,
            CompassPrimary::South => self.south_wall = present,
            CompassPrimary::East => self.east_wall = present,
            CompassPrimary::West => self.west_wall = present,
        }
    }

    /// The directions with no wall standing.
    pub fn open_directions(&self) -> DirectionSmallVec {
        CompassPrimary::all()
            .iter()
            .cloned()
            .filter(|dir| !self.wall(*dir))
            .collect()
    }

    pub fn walls_count(&self) -> usize {
        CompassPrimary::all().iter().filter(|dir| self.wall(**dir)).count()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn new_cell_is_walled_in_and_unvisited() {
        let c = Cell::default();
        assert!(!c.visited);
        assert_eq!(c.walls_count(), 4);
        assert!(c.open_directions().is_empty());
    }

    #[test]
    fn set_wall_by_direction() {
        let mut c = Cell::default();
        c.set_wall(CompassPrimary::East, false);
        assert!(!c.east_wall);
        assert!(!c.wall(CompassPrimary::East));
        assert!(c.north_wall && c.south_wall && c.west_wall);
        assert_eq!(&*c.open_directions(), &[CompassPrimary::East]);
        assert_eq!(c.walls_count(), 3);
    }

    #[test]
    fn opposite_directions() {
        for dir in CompassPrimary::all().iter() {
            assert_ne!(*dir, dir.opposite());
            assert_eq!(*dir, dir.opposite().opposite());
        }
        assert_eq!(CompassPrimary::North.opposite(), CompassPrimary::South);
        assert_eq!(CompassPrimary::East.opposite(), CompassPrimary::West);
    }

    #[test]
    fn coordinate_offsets() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let origin = gc(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), Some(gc(0, 1)));
        assert_eq!(origin.offset(CompassPrimary::East), Some(gc(1, 0)));
        assert_eq!(origin.offset(CompassPrimary::South), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(gc(u32::MAX, 0).offset(CompassPrimary::East), None);

        assert_eq!(gc(2, 2).direction_to(gc(1, 2)), Some(CompassPrimary::West));
        assert_eq!(gc(2, 2).direction_to(gc(2, 1)), Some(CompassPrimary::South));
        assert_eq!(gc(2, 2).direction_to(gc(3, 3)), None);
        assert_eq!(gc(2, 2).direction_to(gc(2, 2)), None);
    }

    #[test]
    fn row_major_index_conversion() {
        let coord = Cartesian2DCoordinate::from_row_major_index(7, Width(3));
        assert_eq!(coord, Cartesian2DCoordinate::new(1, 2));
        assert_eq!(Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(4), RowIndex(5)),
                   Cartesian2DCoordinate::from((4, 5)));
    }
}
