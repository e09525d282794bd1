//! Geometry primitives: segments, polygonal obstacles and collision queries

pub mod segment;
pub mod polygon;
pub mod collision;

pub use segment::{intersects, orientation, Orientation, Segment};
pub use polygon::{Obstacles, Polygon};
pub use collision::CollisionChecker;
