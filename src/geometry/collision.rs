//! Collision queries against a fixed obstacle set

use crate::common::Point2D;
use crate::geometry::polygon::{Obstacles, Polygon};
use crate::geometry::segment::{intersects, Segment};

/// Precomputed boundary set for point and segment collision queries.
///
/// Built once per obstacle set; every query is pure and O(E) in the number
/// of boundary edges.
#[derive(Debug, Clone)]
pub struct CollisionChecker {
    boundary: Vec<Segment>,
    polygons: Vec<Polygon>,
}

impl CollisionChecker {
    pub fn new(obstacles: &Obstacles) -> Self {
        Self {
            boundary: obstacles.boundary_segments(),
            polygons: obstacles.polygons.clone(),
        }
    }

    /// Flattened list of all obstacle boundary segments
    pub fn boundary(&self) -> &[Segment] {
        &self.boundary
    }

    /// True when `p` is outside every obstacle, boundaries included
    pub fn point_is_free(&self, p: &Point2D) -> bool {
        !self.polygons.iter().any(|poly| poly.contains(p))
    }

    /// True when the straight connection crosses no obstacle boundary and
    /// does not run through any obstacle interior
    pub fn segment_is_free(&self, segment: &Segment) -> bool {
        if segment.is_degenerate() {
            return self.point_is_free(&segment.start);
        }
        if self.boundary.iter().any(|edge| intersects(segment, edge)) {
            return false;
        }
        !self
            .polygons
            .iter()
            .any(|poly| poly.segment_crosses_interior(segment))
    }

    pub fn is_connectable(&self, a: &Point2D, b: &Point2D) -> bool {
        self.segment_is_free(&Segment::new(*a, *b))
    }
}
