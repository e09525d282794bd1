//! Line segments and the orientation-based intersection predicate
//!
//! All tests go through the sign of the 2D cross product, so vertical,
//! horizontal and parallel segments need no special handling.

use crate::common::Point2D;

/// Relative tolerance for the cross product sign test
const ORIENTATION_EPS: f64 = 1e-12;

/// Segments shorter than this are treated as degenerate
const MIN_SEGMENT_LENGTH: f64 = 1e-12;

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    Collinear,
}

/// Orientation of the triple `(a, b, c)`
///
/// The cross product is compared against a tolerance scaled by the lengths of
/// `ab` and `ac`, so the result does not depend on the coordinate magnitude.
pub fn orientation(a: &Point2D, b: &Point2D, c: &Point2D) -> Orientation {
    let ab = b.to_vector() - a.to_vector();
    let ac = c.to_vector() - a.to_vector();
    let cross = ab.perp(&ac);
    let scale = ab.norm() * ac.norm();

    if cross.abs() <= ORIENTATION_EPS * scale {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// Closed line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Zero-length (coincident endpoint) segment
    pub fn is_degenerate(&self) -> bool {
        self.length() <= MIN_SEGMENT_LENGTH
    }

    /// Parameter of the projection of `p` onto the segment's line,
    /// `0` at `start` and `1` at `end`
    pub fn project(&self, p: &Point2D) -> f64 {
        let d = self.end.to_vector() - self.start.to_vector();
        let len_sq = d.norm_squared();
        if len_sq == 0.0 {
            return 0.0;
        }
        (p.to_vector() - self.start.to_vector()).dot(&d) / len_sq
    }

    /// Whether `p` lies on the closed segment
    pub fn contains_point(&self, p: &Point2D) -> bool {
        if self.is_degenerate() {
            return self.start.distance(p) <= MIN_SEGMENT_LENGTH;
        }
        if orientation(&self.start, &self.end, p) != Orientation::Collinear {
            return false;
        }
        let t = self.project(p);
        let slack = MIN_SEGMENT_LENGTH / self.length();
        t >= -slack && t <= 1.0 + slack
    }

    /// Axis-aligned bounding box as `(min, max)`
    pub fn bounding_box(&self) -> (Point2D, Point2D) {
        (
            Point2D::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point2D::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }
}

/// Whether two segments share an interior point.
///
/// True for a proper crossing and for a collinear overlap of positive length.
/// Touching at a single point (shared endpoints, or an endpoint resting on the
/// other segment) does not count. Zero-length segments never intersect.
pub fn intersects(a: &Segment, b: &Segment) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }

    let o1 = orientation(&a.start, &a.end, &b.start);
    let o2 = orientation(&a.start, &a.end, &b.end);
    let o3 = orientation(&b.start, &b.end, &a.start);
    let o4 = orientation(&b.start, &b.end, &a.end);

    let any_collinear = [o1, o2, o3, o4].contains(&Orientation::Collinear);
    if !any_collinear {
        return o1 != o2 && o3 != o4;
    }

    if o1 == Orientation::Collinear && o2 == Orientation::Collinear {
        return collinear_overlap(a, b) > MIN_SEGMENT_LENGTH;
    }

    false
}

/// Length of the shared stretch of two collinear segments
fn collinear_overlap(a: &Segment, b: &Segment) -> f64 {
    let t0 = a.project(&b.start);
    let t1 = a.project(&b.end);
    let lo = t0.min(t1).max(0.0);
    let hi = t0.max(t1).min(1.0);
    (hi - lo).max(0.0) * a.length()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point2D::new(x1, y1), Point2D::new(x2, y2))
    }

    #[test]
    fn test_orientation() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 0.0);
        assert_eq!(orientation(&a, &b, &Point2D::new(0.5, 1.0)), Orientation::CounterClockwise);
        assert_eq!(orientation(&a, &b, &Point2D::new(0.5, -1.0)), Orientation::Clockwise);
        assert_eq!(orientation(&a, &b, &Point2D::new(3.0, 0.0)), Orientation::Collinear);
    }

    #[test]
    fn test_proper_crossing() {
        assert!(intersects(&seg(0.0, 0.0, 2.0, 2.0), &seg(0.0, 2.0, 2.0, 0.0)));
        assert!(!intersects(&seg(0.0, 0.0, 1.0, 1.0), &seg(0.0, 2.0, 2.0, 3.0)));
    }

    #[test]
    fn test_vertical_and_horizontal() {
        let vertical = seg(1.0, -1.0, 1.0, 1.0);
        let horizontal = seg(0.0, 0.0, 2.0, 0.0);
        assert!(intersects(&vertical, &horizontal));
        assert!(intersects(&horizontal, &vertical));

        // vertical segment that stops short of the horizontal one
        assert!(!intersects(&seg(1.0, 0.5, 1.0, 1.0), &horizontal));

        // two vertical segments side by side
        assert!(!intersects(&seg(0.0, 0.0, 0.0, 5.0), &seg(1.0, 0.0, 1.0, 5.0)));
    }

    #[test]
    fn test_parallel_segments() {
        assert!(!intersects(&seg(0.0, 0.0, 4.0, 1.0), &seg(0.0, 1.0, 4.0, 2.0)));
    }

    #[test]
    fn test_collinear_cases() {
        let a = seg(0.0, 0.0, 4.0, 0.0);
        // overlapping
        assert!(intersects(&a, &seg(2.0, 0.0, 6.0, 0.0)));
        // contained
        assert!(intersects(&a, &seg(1.0, 0.0, 3.0, 0.0)));
        // disjoint on the same line
        assert!(!intersects(&a, &seg(5.0, 0.0, 6.0, 0.0)));
        // end to end
        assert!(!intersects(&a, &seg(4.0, 0.0, 6.0, 0.0)));
        // vertical collinear overlap
        assert!(intersects(&seg(1.0, 0.0, 1.0, 3.0), &seg(1.0, 2.0, 1.0, 5.0)));
    }

    #[test]
    fn test_touching_is_not_intersection() {
        // shared endpoint
        assert!(!intersects(&seg(0.0, 0.0, 1.0, 1.0), &seg(1.0, 1.0, 2.0, 0.0)));
        // endpoint resting on the other segment's interior
        assert!(!intersects(&seg(0.0, 0.0, 2.0, 0.0), &seg(1.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_degenerate_segments_never_intersect() {
        let point = seg(1.0, 0.0, 1.0, 0.0);
        assert!(point.is_degenerate());
        assert!(!intersects(&point, &seg(0.0, 0.0, 2.0, 0.0)));
        assert!(!intersects(&seg(0.0, -1.0, 2.0, 1.0), &point));
        assert!(!intersects(&point, &point));
    }

    #[test]
    fn test_large_coordinates() {
        let a = seg(1e9, 1e9, 1e9 + 2.0, 1e9 + 2.0);
        let b = seg(1e9, 1e9 + 2.0, 1e9 + 2.0, 1e9);
        assert!(intersects(&a, &b));
    }

    #[test]
    fn test_contains_point() {
        let s = seg(0.0, 0.0, 2.0, 2.0);
        assert!(s.contains_point(&Point2D::new(1.0, 1.0)));
        assert!(s.contains_point(&Point2D::new(2.0, 2.0)));
        assert!(!s.contains_point(&Point2D::new(3.0, 3.0)));
        assert!(!s.contains_point(&Point2D::new(1.0, 1.5)));
    }
}
