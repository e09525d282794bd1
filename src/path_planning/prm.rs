//! Probabilistic Road-Map (PRM) path planning
//!
//! Samples collision-free vertices, connects every pair within a neighbour
//! radius whose straight segment is collision-free, searches the roadmap
//! with A* and finally shortcuts the result.
//!
//! All phases draw from an explicit [`PlanningContext`]; nothing is kept
//! between queries.

use std::collections::HashSet;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::common::{Bounds, Path2D, PathPlanner, PlannerError, PlannerResult, Point2D};
use crate::config::PlannerConfig;
use crate::geometry::{CollisionChecker, Obstacles};
use crate::path_planning::a_star::AStarSearch;
use crate::path_planning::roadmap::RoadmapGraph;
use crate::path_planning::shortcut::PathSmoother;
use crate::path_planning::spatial_index::{NeighborSearch, SpatialIndex};

/// Configuration for roadmap construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
    /// Number of random vertices besides start and goal
    pub sample_count: usize,
    /// Maximum edge length
    pub neighbor_radius: f64,
    /// Keep only the k nearest candidates per vertex, all when `None`
    pub max_neighbors: Option<usize>,
    /// Rejected draws allowed per sample before giving up
    pub max_sample_attempts: usize,
    /// Spatial index used for neighbour queries
    pub neighbor_search: NeighborSearch,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            sample_count: 200,
            neighbor_radius: 2.0,
            max_neighbors: None,
            max_sample_attempts: 10_000,
            neighbor_search: NeighborSearch::BruteForce,
        }
    }
}

impl RoadmapConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if !(self.neighbor_radius.is_finite() && self.neighbor_radius >= 0.0) {
            return Err(PlannerError::InvalidInput(format!(
                "neighbor radius must be finite and non-negative, got {}",
                self.neighbor_radius
            )));
        }
        if self.max_sample_attempts == 0 {
            return Err(PlannerError::InvalidInput(
                "max_sample_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment and random source threaded through every planning phase
pub struct PlanningContext {
    pub bounds: Bounds,
    pub obstacles: Obstacles,
    pub checker: CollisionChecker,
    pub rng: StdRng,
}

impl PlanningContext {
    /// Create a context; `seed = None` draws the seed from OS entropy
    pub fn new(bounds: Bounds, obstacles: Obstacles, seed: Option<u64>) -> PlannerResult<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(bounds, obstacles, rng)
    }

    pub fn with_rng(bounds: Bounds, obstacles: Obstacles, rng: StdRng) -> PlannerResult<Self> {
        bounds.validate()?;
        let checker = CollisionChecker::new(&obstacles);
        Ok(Self {
            bounds,
            obstacles,
            checker,
            rng,
        })
    }

    /// Check that a query point is finite, inside the bounds and collision-free
    pub fn validate_point(&self, name: &str, p: &Point2D) -> PlannerResult<()> {
        if !p.is_finite() {
            return Err(PlannerError::InvalidInput(format!("{} is not finite", name)));
        }
        if !self.bounds.contains(p) {
            return Err(PlannerError::InvalidInput(format!(
                "{} ({}, {}) is outside the {} x {} bounds",
                name, p.x, p.y, self.bounds.width, self.bounds.height
            )));
        }
        if !self.checker.point_is_free(p) {
            return Err(PlannerError::InvalidInput(format!(
                "{} ({}, {}) lies inside an obstacle",
                name, p.x, p.y
            )));
        }
        Ok(())
    }
}

/// Rejection-sample a point uniformly inside `bounds` that passes `is_free`.
///
/// Gives up with `SamplingExhausted` after `max_attempts` rejected draws.
/// Malformed bounds are rejected with `InvalidInput` before any draw.
pub fn sample_collision_free_point<R, F>(
    bounds: &Bounds,
    rng: &mut R,
    max_attempts: usize,
    is_free: F,
) -> PlannerResult<Point2D>
where
    R: Rng + ?Sized,
    F: Fn(&Point2D) -> bool,
{
    bounds.validate()?;
    let x_dist = Uniform::new_inclusive(0.0, bounds.width);
    let y_dist = Uniform::new_inclusive(0.0, bounds.height);

    for _ in 0..max_attempts {
        let p = Point2D::new(x_dist.sample(rng), y_dist.sample(rng));
        if is_free(&p) {
            return Ok(p);
        }
    }

    Err(PlannerError::SamplingExhausted {
        attempts: max_attempts,
    })
}

/// Builds a [`RoadmapGraph`] for one start/goal query
#[derive(Debug, Clone, Default)]
pub struct RoadmapBuilder {
    config: RoadmapConfig,
}

impl RoadmapBuilder {
    pub fn new(config: RoadmapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoadmapConfig {
        &self.config
    }

    /// Sample vertices and connect them with the configured spatial index
    pub fn build(&self, ctx: &mut PlanningContext, start: Point2D, goal: Point2D) -> PlannerResult<RoadmapGraph> {
        let vertices = self.sample_vertices(ctx, start, goal)?;
        let index = self
            .config
            .neighbor_search
            .build_index(&vertices, self.config.neighbor_radius);
        Ok(self.connect(&ctx.checker, &vertices, index.as_ref()))
    }

    /// Vertex set in the order `[start, goal, samples...]`, all distinct
    pub fn sample_vertices(&self, ctx: &mut PlanningContext, start: Point2D, goal: Point2D) -> PlannerResult<Vec<Point2D>> {
        self.config.validate()?;
        ctx.validate_point("start", &start)?;
        ctx.validate_point("goal", &goal)?;

        let mut vertices = vec![start];
        let mut seen = HashSet::new();
        seen.insert(start.key());
        if seen.insert(goal.key()) {
            vertices.push(goal);
        }

        let PlanningContext {
            bounds,
            checker,
            rng,
            ..
        } = ctx;

        // start == goal contributes a single vertex
        let target = vertices.len() + self.config.sample_count;
        while vertices.len() < target {
            let p = sample_collision_free_point(bounds, rng, self.config.max_sample_attempts, |p| {
                checker.point_is_free(p) && !seen.contains(&p.key())
            })?;
            seen.insert(p.key());
            vertices.push(p);
        }

        trace!("PRM: sampled {} vertices", vertices.len());
        Ok(vertices)
    }

    /// Connect `vertices` into a roadmap using any [`SpatialIndex`] over them.
    ///
    /// Each unordered candidate pair is tested once; accepted edges are
    /// inserted in both directions.
    pub fn connect(&self, checker: &CollisionChecker, vertices: &[Point2D], index: &dyn SpatialIndex) -> RoadmapGraph {
        let mut graph = RoadmapGraph::new();
        for p in vertices {
            graph.add_vertex(*p);
        }

        let mut tested: HashSet<(usize, usize)> = HashSet::new();
        let mut rejected = 0;

        for (i, p) in vertices.iter().enumerate() {
            let candidates = index
                .within_radius(p, self.config.neighbor_radius)
                .into_iter()
                .filter(|&(j, _)| j != i)
                .take(self.config.max_neighbors.unwrap_or(usize::MAX));

            for (j, _) in candidates {
                let pair = (i.min(j), i.max(j));
                if !tested.insert(pair) {
                    continue;
                }
                if checker.is_connectable(p, &vertices[j]) {
                    graph.add_edge(i, j);
                } else {
                    rejected += 1;
                }
            }
        }

        debug!(
            "PRM: roadmap with {} vertices, {} edges ({} candidate edges rejected)",
            graph.vertex_count(),
            graph.edge_count(),
            rejected
        );
        graph
    }
}

/// Build the roadmap for one query
pub fn build_roadmap(
    ctx: &mut PlanningContext,
    start: Point2D,
    goal: Point2D,
    config: &RoadmapConfig,
) -> PlannerResult<RoadmapGraph> {
    RoadmapBuilder::new(config.clone()).build(ctx, start, goal)
}

/// Everything a renderer needs from one planning query
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub roadmap: RoadmapGraph,
    pub raw_path: Path2D,
    pub path: Path2D,
}

/// PRM planner: roadmap construction, A* search and shortcut smoothing
pub struct PrmPlanner {
    bounds: Bounds,
    obstacles: Obstacles,
    config: PlannerConfig,
}

impl PrmPlanner {
    pub fn new(bounds: Bounds, obstacles: Obstacles, config: PlannerConfig) -> PlannerResult<Self> {
        bounds.validate()?;
        config.validate()?;
        Ok(Self {
            bounds,
            obstacles,
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    /// Plan a path and keep the intermediate roadmap and unsmoothed path
    pub fn plan_detailed(&self, start: Point2D, goal: Point2D) -> PlannerResult<PlanOutcome> {
        let mut ctx = PlanningContext::new(self.bounds, self.obstacles.clone(), self.config.seed)?;

        info!("PRM: building roadmap");
        let roadmap = RoadmapBuilder::new(self.config.roadmap.clone()).build(&mut ctx, start, goal)?;

        info!("PRM: searching roadmap");
        let raw_path = AStarSearch::new(self.config.search.clone()).search(&roadmap, start, goal)?;

        let mut path = raw_path.clone();
        PathSmoother::new(&ctx.checker, self.config.smoothing.clone()).smooth(&mut path, &mut ctx.rng);
        info!(
            "PRM: path with {} waypoints ({} before smoothing), length {:.3}",
            path.len(),
            raw_path.len(),
            path.total_length()
        );

        Ok(PlanOutcome {
            roadmap,
            raw_path,
            path,
        })
    }
}

impl PathPlanner for PrmPlanner {
    fn plan(&self, start: Point2D, goal: Point2D) -> Result<Path2D, PlannerError> {
        self.plan_detailed(start, goal).map(|outcome| outcome.path)
    }
}
