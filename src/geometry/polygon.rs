//! Polygonal obstacles

use itertools::Itertools;

use crate::common::{PlannerError, PlannerResult, Point2D};
use crate::geometry::segment::Segment;

/// Areas below this are treated as zero
const MIN_AREA: f64 = 1e-12;

/// Simple polygon obstacle, vertices in either winding order
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    min: Point2D,
    max: Point2D,
}

impl Polygon {
    /// Create a polygon from at least three vertices
    pub fn new(vertices: Vec<Point2D>) -> PlannerResult<Self> {
        if vertices.len() < 3 {
            return Err(PlannerError::InvalidInput(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(p) = vertices.iter().find(|p| !p.is_finite()) {
            return Err(PlannerError::InvalidInput(format!(
                "polygon vertex ({}, {}) is not finite",
                p.x, p.y
            )));
        }

        let min = Point2D::new(
            vertices.iter().map(|p| p.x).fold(f64::INFINITY, f64::min),
            vertices.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
        );
        let max = Point2D::new(
            vertices.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max),
            vertices.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
        );
        let polygon = Self { vertices, min, max };

        if let Some(edge) = polygon.edges().find(Segment::is_degenerate) {
            return Err(PlannerError::DegenerateGeometry(format!(
                "polygon has a zero-length edge at ({}, {})",
                edge.start.x, edge.start.y
            )));
        }
        if polygon.area() <= MIN_AREA {
            return Err(PlannerError::DegenerateGeometry(
                "polygon has zero area".to_string(),
            ));
        }

        Ok(polygon)
    }

    /// Convenience constructor for the triangle obstacles of the reference environment
    pub fn triangle(a: Point2D, b: Point2D, c: Point2D) -> PlannerResult<Self> {
        Self::new(vec![a, b, c])
    }

    /// Axis-aligned rectangle from two opposite corners
    pub fn rectangle(min: Point2D, max: Point2D) -> PlannerResult<Self> {
        Self::new(vec![
            min,
            Point2D::new(max.x, min.y),
            max,
            Point2D::new(min.x, max.y),
        ])
    }

    /// Boundary edges, consecutive vertex pairs with wraparound
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        self.vertices
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| Segment::new(*a, *b))
    }

    /// Unsigned area (shoelace formula)
    pub fn area(&self) -> f64 {
        let twice: f64 = self
            .vertices
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum();
        twice.abs() / 2.0
    }

    pub fn on_boundary(&self, p: &Point2D) -> bool {
        self.edges().any(|edge| edge.contains_point(p))
    }

    /// Interior test by crossing number, boundary excluded
    pub fn contains_strict(&self, p: &Point2D) -> bool {
        if !self.bbox_contains(p) || self.on_boundary(p) {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.vertices.iter().circular_tuple_windows() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Membership test, boundary included
    pub fn contains(&self, p: &Point2D) -> bool {
        self.bbox_contains(p) && (self.on_boundary(p) || self.contains_strict(p))
    }

    /// Whether any stretch of `segment` runs through the polygon interior.
    ///
    /// The segment is split at every polygon vertex lying on it; each piece
    /// either stays entirely inside or entirely outside, so its midpoint
    /// decides. Used together with the boundary crossing test, this also
    /// catches segments that enter and leave through vertices only.
    pub fn segment_crosses_interior(&self, segment: &Segment) -> bool {
        let (smin, smax) = segment.bounding_box();
        if smax.x < self.min.x || smin.x > self.max.x || smax.y < self.min.y || smin.y > self.max.y {
            return false;
        }

        let mut cuts = vec![0.0, 1.0];
        cuts.extend(
            self.vertices
                .iter()
                .filter(|v| segment.contains_point(v))
                .map(|v| segment.project(v).clamp(0.0, 1.0)),
        );
        cuts.sort_by(f64::total_cmp);
        cuts.dedup();

        cuts.iter()
            .tuple_windows()
            .any(|(t0, t1)| {
                let mid = segment.start.lerp(&segment.end, (t0 + t1) / 2.0);
                self.contains_strict(&mid)
            })
    }

    fn bbox_contains(&self, p: &Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Obstacle set for the planning area
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Obstacles {
    pub polygons: Vec<Polygon>,
}

impl Obstacles {
    pub fn new() -> Self {
        Self { polygons: Vec::new() }
    }

    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.iter()
    }

    /// Point-in-obstacle membership test, boundaries count as blocked
    pub fn contains(&self, p: &Point2D) -> bool {
        self.polygons.iter().any(|poly| poly.contains(p))
    }

    /// Every boundary edge of every obstacle, flattened
    pub fn boundary_segments(&self) -> Vec<Segment> {
        self.polygons.iter().flat_map(Polygon::edges).collect()
    }
}
