//! Common types used throughout prm_planner

use itertools::Itertools;
use nalgebra::Vector2;
use ordered_float::OrderedFloat;

use crate::common::error::{PlannerError, PlannerResult};

/// Hashable form of a [`Point2D`], used to key vertices by position
pub type PointKey = (OrderedFloat<f64>, OrderedFloat<f64>);

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Hash key for this point. `-0.0` and `0.0` map to the same key.
    pub fn key(&self) -> PointKey {
        // adding 0.0 turns -0.0 into 0.0
        (OrderedFloat(self.x + 0.0), OrderedFloat(self.y + 0.0))
    }

    /// Linear interpolation, `t = 0` is `self` and `t = 1` is `other`
    pub fn lerp(&self, other: &Point2D, t: f64) -> Point2D {
        Point2D::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

/// Rectangular planning area `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create bounds, rejecting non-positive or non-finite extents
    pub fn new(width: f64, height: f64) -> PlannerResult<Self> {
        let bounds = Self { width, height };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(PlannerError::InvalidInput(format!(
                "bounds width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(PlannerError::InvalidInput(format!(
                "bounds height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }

    /// Inclusive containment check
    pub fn contains(&self, p: &Point2D) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Path represented as a sequence of 2D points
#[derive(Debug, Clone, PartialEq)]
pub struct Path2D {
    pub points: Vec<Point2D>,
}

impl Path2D {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2D> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2D> {
        self.points.last()
    }

    pub fn total_length(&self) -> f64 {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance(b))
            .sum()
    }
}

impl Default for Path2D {
    fn default() -> Self {
        Self::new()
    }
}
