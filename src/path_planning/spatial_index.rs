//! Radius queries over roadmap vertices
//!
//! Roadmap construction only talks to the [`SpatialIndex`] trait, so the
//! brute-force scan can be swapped for the hash grid (or any other index)
//! without changing the resulting graph.

use std::collections::HashMap;

use itertools::iproduct;
use serde::{Deserialize, Serialize};

use crate::common::Point2D;

/// Queries covering more grid cells than this scan the points linearly
const MAX_QUERY_CELLS: u128 = 4096;

/// Fixed-radius neighbour query over a static point set
pub trait SpatialIndex {
    /// Indices and distances of all points within `radius` of `center`,
    /// sorted by distance and then by index
    fn within_radius(&self, center: &Point2D, radius: f64) -> Vec<(usize, f64)>;
}

/// Which [`SpatialIndex`] the roadmap builder uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearch {
    /// O(V) scan per query
    #[default]
    BruteForce,
    /// Uniform hash grid with cell size equal to the query radius
    Grid,
}

impl NeighborSearch {
    pub fn build_index(&self, points: &[Point2D], radius: f64) -> Box<dyn SpatialIndex> {
        match self {
            NeighborSearch::BruteForce => Box::new(BruteForceIndex::new(points.to_vec())),
            NeighborSearch::Grid => Box::new(GridIndex::new(points.to_vec(), radius)),
        }
    }
}

fn sort_neighbors(neighbors: &mut [(usize, f64)]) {
    neighbors.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
}

/// Linear scan over all points
pub struct BruteForceIndex {
    points: Vec<Point2D>,
}

impl BruteForceIndex {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }
}

impl SpatialIndex for BruteForceIndex {
    fn within_radius(&self, center: &Point2D, radius: f64) -> Vec<(usize, f64)> {
        linear_scan(&self.points, center, radius)
    }
}

fn linear_scan(points: &[Point2D], center: &Point2D, radius: f64) -> Vec<(usize, f64)> {
    let mut neighbors: Vec<(usize, f64)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let d = center.distance(p);
            if d <= radius {
                Some((i, d))
            } else {
                None
            }
        })
        .collect();
    sort_neighbors(&mut neighbors);
    neighbors
}

/// Uniform hash grid, buckets of point indices keyed by cell coordinate.
///
/// A query walks every cell its radius box overlaps. When that box spans more
/// than `MAX_QUERY_CELLS` cells (a radius far larger than the cell size), the
/// query falls back to a linear scan, which returns the same result.
pub struct GridIndex {
    points: Vec<Point2D>,
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl GridIndex {
    /// Build a grid whose cells are `cell_size` wide. A non-positive or
    /// non-finite size falls back to unit cells.
    pub fn new(points: Vec<Point2D>, cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };

        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            cells
                .entry(Self::cell_of(p.x, p.y, cell_size))
                .or_default()
                .push(i);
        }

        Self { points, cell_size, cells }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    fn cell_of(x: f64, y: f64, cell_size: f64) -> (i64, i64) {
        ((x / cell_size).floor() as i64, (y / cell_size).floor() as i64)
    }
}

impl SpatialIndex for GridIndex {
    fn within_radius(&self, center: &Point2D, radius: f64) -> Vec<(usize, f64)> {
        let (x0, y0) = Self::cell_of(center.x - radius, center.y - radius, self.cell_size);
        let (x1, y1) = Self::cell_of(center.x + radius, center.y + radius, self.cell_size);

        let span = |lo: i64, hi: i64| (i128::from(hi) - i128::from(lo) + 1).max(0) as u128;
        if span(x0, x1).saturating_mul(span(y0, y1)) > MAX_QUERY_CELLS {
            return linear_scan(&self.points, center, radius);
        }

        let mut neighbors: Vec<(usize, f64)> = iproduct!(x0..=x1, y0..=y1)
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .filter_map(|&i| {
                let d = center.distance(&self.points[i]);
                if d <= radius {
                    Some((i, d))
                } else {
                    None
                }
            })
            .collect();
        sort_neighbors(&mut neighbors);
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_points(n: usize, seed: u64) -> Vec<Point2D> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point2D::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..6.0)))
            .collect()
    }

    #[test]
    fn test_brute_force_radius_query() {
        let index = BruteForceIndex::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 5.0),
        ]);
        let result = index.within_radius(&Point2D::new(0.0, 0.0), 3.0);
        assert_eq!(result, vec![(0, 0.0), (2, 1.0), (1, 3.0)]);
    }

    #[test]
    fn test_grid_matches_brute_force() {
        let points = random_points(300, 7);
        let radius = 1.3;
        let brute = BruteForceIndex::new(points.clone());
        let grid = GridIndex::new(points.clone(), radius);

        for p in &points {
            assert_eq!(brute.within_radius(p, radius), grid.within_radius(p, radius));
        }
    }

    #[test]
    fn test_grid_handles_negative_coordinates() {
        let points = vec![Point2D::new(-0.5, -0.5), Point2D::new(0.2, 0.1)];
        let grid = GridIndex::new(points, 1.0);
        let result = grid.within_radius(&Point2D::new(0.0, 0.0), 1.0);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0, 1);
    }

    #[test]
    fn test_grid_falls_back_to_unit_cells() {
        let grid = GridIndex::new(vec![Point2D::new(1.0, 1.0)], 0.0);
        assert_eq!(grid.cell_size(), 1.0);
        assert_eq!(grid.within_radius(&Point2D::new(1.0, 1.0), 0.0), vec![(0, 0.0)]);
    }

    #[test]
    fn test_grid_large_radius_over_tiny_cells() {
        let points = random_points(40, 11);
        let brute = BruteForceIndex::new(points.clone());
        let grid = GridIndex::new(points.clone(), 1e-9);

        // radius box would cover ~1e24 cells
        let result = grid.within_radius(&points[0], 1e3);
        assert_eq!(result.len(), points.len());
        assert_eq!(result, brute.within_radius(&points[0], 1e3));

        let center = Point2D::new(5.0, 3.0);
        assert_eq!(grid.within_radius(&center, 2.5), brute.within_radius(&center, 2.5));
    }

    #[test]
    fn test_neighbor_search_builds_index() {
        let points = random_points(50, 3);
        let a = NeighborSearch::BruteForce.build_index(&points, 2.0);
        let b = NeighborSearch::Grid.build_index(&points, 2.0);
        assert_eq!(
            a.within_radius(&points[0], 2.0),
            b.within_radius(&points[0], 2.0)
        );
    }
}
