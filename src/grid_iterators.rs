use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::units::{ColumnIndex, Height, RowIndex, Width};

/// Row major iteration over every coordinate of a rectangular grid.
#[derive(Clone)]
pub struct RectGridCellIter {
    width: Width,
    current_cell_number: usize,
    cells_count: usize,
}

impl RectGridCellIter {
    pub fn new(width: Width, height: Height) -> RectGridCellIter {
        RectGridCellIter {
            width,
            current_cell_number: 0,
            cells_count: width.0 * height.0,
        }
    }
}

impl fmt::Debug for RectGridCellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for RectGridCellIter {} // default impl using size_hint()
impl Iterator for RectGridCellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                     self.width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
pub enum BatchIterType {
    Row,
    Column,
}

/// Iterates a rectangular grid one whole row (south to north) or one whole column
/// (west to east) at a time.
#[derive(Debug, Copy, Clone)]
pub struct RectBatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    width: Width,
    height: Height,
}

impl RectBatchIter {
    pub fn new(iter_type: BatchIterType, width: Width, height: Height) -> RectBatchIter {
        RectBatchIter {
            iter_type,
            current_index: 0,
            width,
            height,
        }
    }

    fn batches_count(&self) -> usize {
        match self.iter_type {
            BatchIterType::Row => self.height.0,
            BatchIterType::Column => self.width.0,
        }
    }
}

impl ExactSizeIterator for RectBatchIter {} // default impl using size_hint()
impl Iterator for RectBatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count() {
            return None;
        }

        let current = self.current_index;
        let coords = match self.iter_type {
            BatchIterType::Row => {
                (0..self.width.0)
                    .map(|i| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                       RowIndex(current))
                    })
                    .collect()
            }
            BatchIterType::Column => {
                (0..self.height.0)
                    .map(|i| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(current),
                                                                       RowIndex(i))
                    })
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count() - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
