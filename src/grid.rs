use std::error::Error;
use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, CoordinateOptionSmallVec,
                   CoordinateSmallVec};
use crate::errors::{ErrorKind, Result};
use crate::grid_iterators::{BatchIterType, RectBatchIter, RectGridCellIter};
use crate::units::{ColumnsCount, EdgesCount, Height, NodesCount, RowsCount, Width};

/// Upper bound on `width * height` accepted by `Grid::new`.
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// A rectangular grid of walled cells stored in row major order.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: Width,
    height: Height,
    cells: Vec<Cell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    NotAdjacent,
    InteriorWall,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            CellLinkError::InvalidGridCoordinate => "coordinate outside the grid",
            CellLinkError::NotAdjacent => "cells are not adjacent",
            CellLinkError::InteriorWall => "wall is not on the grid boundary",
        };
        write!(f, "{}", reason)
    }
}

impl Error for CellLinkError {}

/// One cell's wall state as handed to renderers.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellWalls {
    pub x: u32,
    pub y: u32,
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, links: {:?}",
               self.width, self.height, self.links_count())
    }
}

impl Grid {
    /// Allocate a `width * height` grid with every wall standing.
    ///
    /// Zero sized dimensions and grids too big to address are rejected before anything is allocated.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            return Err(ErrorKind::InvalidDimensions(w, h).into());
        }
        let cells_count = w.checked_mul(h)
            .filter(|&count| count <= MAX_GRID_CELLS)
            .ok_or(ErrorKind::GridTooLarge(w, h))?;

        Ok(Grid {
            width,
            height,
            cells: vec![Cell::default(); cells_count],
        })
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
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.height.0)
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.width.0)
    }

    /// Node count and the number of interior wall pairs, the most passages a grid can hold.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.width.0, self.height.0);
        let interior_walls = (w - 1) * h + w * (h - 1);
        (NodesCount(self.size()), EdgesCount(interior_walls))
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Panics if the coordinate is outside the grid.
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> &Cell {
        let index = self.checked_index(coord);
        &self.cells[index]
    }

    /// Panics if the coordinate is outside the grid.
    pub fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> &mut Cell {
        let index = self.checked_index(coord);
        &mut self.cells[index]
    }

    /// Cells that are to the North, South, East or West of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::all()
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Is the wall on the `direction` side of the cell missing?
    /// Panics if the coordinate is outside the grid.
    #[inline]
    pub fn is_open(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        !self.cell(coord).wall(direction)
    }

    /// Are two cells in the grid adjacent and joined by a passage?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return false;
        }
        a.direction_to(b)
         .map_or(false, |dir| self.is_open(a, dir) && self.is_open(b, dir.opposite()))
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells joined to a particular cell by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let linked = CompassPrimary::all()
            .iter()
            .filter(|dir| self.is_open(coord, **dir))
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect();
        Some(linked)
    }

    /// Remove the wall pair shared by two adjacent cells.
    pub fn carve_passage(&mut self,
                         a: Cartesian2DCoordinate,
                         b: Cartesian2DCoordinate)
                         -> std::result::Result<(), CellLinkError> {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let dir = a.direction_to(b).ok_or(CellLinkError::NotAdjacent)?;
        self.cell_mut(a).set_wall(dir, false);
        self.cell_mut(b).set_wall(dir.opposite(), false);
        Ok(())
    }

    /// Remove a single wall on the outer edge of the grid, an entrance or exit.
    pub fn open_boundary(&mut self,
                         coord: Cartesian2DCoordinate,
                         direction: CompassPrimary)
                         -> std::result::Result<(), CellLinkError> {
        if !self.is_valid_coordinate(coord) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        if self.neighbour_at_direction(coord, direction).is_some() {
            return Err(CellLinkError::InteriorWall);
        }
        self.cell_mut(coord).set_wall(direction, false);
        Ok(())
    }

    /// Walls on the outer edge of the grid that have been removed.
    pub fn boundary_openings(&self) -> Vec<(Cartesian2DCoordinate, CompassPrimary)> {
        self.iter()
            .flat_map(|coord| {
                CompassPrimary::all()
                    .iter()
                    .cloned()
                    .filter(move |dir| coord.offset(*dir).map_or(true, |c| !self.is_valid_coordinate(c)))
                    .filter(move |dir| self.is_open(coord, *dir))
                    .map(move |dir| (coord, dir))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Number of interior wall pairs that have been carved into passages.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Every carved passage once, as a (west or south cell, east or north cell) pair.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + 'a {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::North]
                .iter()
                .filter_map(|dir| {
                    self.neighbour_at_direction(coord, *dir)
                        .filter(|neighbour| self.is_linked(coord, *neighbour))
                        .map(|neighbour| (coord, neighbour))
                })
                .collect::<SmallVec<[_; 2]>>()
        })
    }

    /// Do all neighbouring cells agree about the wall between them?
    pub fn has_consistent_walls(&self) -> bool {
        self.iter().all(|coord| {
            [CompassPrimary::East, CompassPrimary::North].iter().all(|dir| {
                self.neighbour_at_direction(coord, *dir)
                    .map_or(true, |neighbour| {
                        self.cell(coord).wall(*dir) == self.cell(neighbour).wall(dir.opposite())
                    })
            })
        })
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(self.width, self.height)
    }

    #[inline]
    pub fn iter_row(&self) -> RectBatchIter {
        RectBatchIter::new(BatchIterType::Row, self.width, self.height)
    }

    #[inline]
    pub fn iter_column(&self) -> RectBatchIter {
        RectBatchIter::new(BatchIterType::Column, self.width, self.height)
    }

    /// The wall state of every cell in row major order.
    pub fn iter_cells<'a>(&'a self) -> impl Iterator<Item = CellWalls> + ExactSizeIterator + 'a {
        self.iter().map(move |coord| {
            let cell = self.cell(coord);
            CellWalls {
                x: coord.x,
                y: coord.y,
                north: cell.north_wall,
                south: cell.south_wall,
                east: cell.east_wall,
                west: cell.west_wall,
            }
        })
    }

    /// The passages as an undirected graph. Node `i` is the cell at row major index `i`.
    pub fn to_graph(&self) -> UnGraph<Cartesian2DCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            let a_index = self.checked_index(a);
            let b_index = self.checked_index(b);
            let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }
        graph
    }

    fn checked_index(&self, coord: Cartesian2DCoordinate) -> usize {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => index,
            None => panic!("coordinate ({}, {}) is outside the {}x{} grid",
                           coord.x, coord.y, self.width.0, self.height.0),
        }
    }
}
