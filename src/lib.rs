//! prm_planner - probabilistic roadmap path planning in the plane
//!
//! Builds a roadmap of collision-free samples among polygonal obstacles,
//! searches it with A* and shortens the result by random shortcutting.

// Core modules
pub mod common;
pub mod config;
pub mod geometry;

// Algorithm modules
pub mod path_planning;

// Re-export common types for convenience
pub use common::{Bounds, Path2D, Point2D};
pub use common::PathPlanner;
pub use common::{PlannerError, PlannerResult};
pub use config::PlannerConfig;
pub use geometry::{CollisionChecker, Obstacles, Polygon, Segment};
pub use path_planning::{build_roadmap, find_path, smooth_path, PlanningContext, PrmPlanner, RoadmapGraph};
