use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::Grid;

/// Flood fill step counts from a start cell to every cell reachable through open walls.
///
/// This answers "can I get there, and how far is it along the passages"; for a perfect maze the
/// single passage route is also the shortest one, for any other layout it is only a reachability
/// measure.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None if the start coordinate is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = FnvHashMap::with_capacity_and_hasher(grid.size(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every step is one from the previous cell, so the first distance recorded for a cell is
        // final and the map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = grid.links(*cell_coord)
                                .expect("Frontier cells are always on the grid.");
                for link_coordinate in links {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Can every cell of `grid` be reached from the start?
    pub fn reaches_all(&self, grid: &Grid) -> bool {
        self.reachable_count() == grid.size()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[Cartesian2DCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Is there a route through open walls between two cells?
pub fn path_exists(grid: &Grid, from: Cartesian2DCoordinate, to: Cartesian2DCoordinate) -> bool {
    Distances::new(grid, from)
        .and_then(|distances| distances.distance_from_start_to(to))
        .is_some()
}

/// Is every cell reachable from every other cell?
pub fn is_connected(grid: &Grid) -> bool {
    Distances::new(grid, Cartesian2DCoordinate::new(0, 0))
        .map_or(false, |distances| distances.reaches_all(grid))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{Height, Width};

    static OUT_OF_GRID_COORDINATE: Cartesian2DCoordinate = Cartesian2DCoordinate {
        x: u32::MAX,
        y: u32::MAX,
    };

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).unwrap()
    }

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn open_square() -> Grid {
        let mut g = grid(2, 2);
        g.carve_passage(gc(0, 0), gc(1, 0)).expect("Link Failed");
        g.carve_passage(gc(0, 0), gc(0, 1)).expect("Link Failed");
        g.carve_passage(gc(1, 0), gc(1, 1)).expect("Link Failed");
        g.carve_passage(gc(0, 1), gc(1, 1)).expect("Link Failed");
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = grid(3, 3);
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
    }

    #[test]
    fn start() {
        let g = grid(3, 3);
        let start_coordinate = gc(1, 1);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        assert_eq!(start_coordinate, distances.start());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = grid(3, 3);
        let start_coordinate = gc(0, 0);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.reachable_count(), 1);
        assert!(!distances.reaches_all(&g));
        assert!(!is_connected(&g));
    }

    #[test]
    fn distance_to_invalid_coordinate_is_none() {
        let g = grid(3, 3);
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_square();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points_on_grid(), &[gc(1, 1)]);
        assert!(distances.reaches_all(&g));
        assert!(is_connected(&g));
    }

    #[test]
    fn boundary_openings_do_not_leave_the_grid() {
        let mut g = grid(1, 1);
        g.open_boundary(gc(0, 0), crate::cells::CompassPrimary::West).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.reachable_count(), 1);
        assert!(is_connected(&g));
    }

    #[test]
    fn paths_between_cells() {
        let mut g = grid(3, 1);
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        assert!(path_exists(&g, gc(0, 0), gc(1, 0)));
        assert!(path_exists(&g, gc(1, 0), gc(0, 0)));
        assert!(!path_exists(&g, gc(0, 0), gc(2, 0)));
        assert!(!path_exists(&g, OUT_OF_GRID_COORDINATE, gc(0, 0)));
        assert_eq!(&*Distances::new(&g, gc(0, 0)).unwrap().furthest_points_on_grid(), &[gc(1, 0)]);
    }
}
