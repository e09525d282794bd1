//! A* search over a roadmap graph
//!
//! Priority is `f = g + w * h` with `h` the straight-line distance to the
//! goal. Every roadmap edge is a straight segment weighted by its length, so
//! with `w = 1` the heuristic is admissible and consistent and the returned
//! path is optimal over the graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::{debug, trace};
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::common::{Path2D, PlannerError, PlannerResult, Point2D};
use crate::path_planning::roadmap::RoadmapGraph;

/// Configuration for the A* search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Heuristic weight (1.0 = optimal, >1.0 = faster but suboptimal)
    pub heuristic_weight: f64,
    /// Upper bound on expanded vertices, unbounded when `None`
    pub max_expansions: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: 1.0,
            max_expansions: None,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> PlannerResult<()> {
        if !(self.heuristic_weight.is_finite() && self.heuristic_weight >= 0.0) {
            return Err(PlannerError::InvalidInput(format!(
                "heuristic weight must be finite and non-negative, got {}",
                self.heuristic_weight
            )));
        }
        Ok(())
    }
}

/// Frontier entry. Ordered by priority, then by insertion sequence, so equal
/// priorities pop in the order they were pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    priority: NotNan<f64>,
    sequence: u64,
    vertex: usize,
}

/// Per-query search bookkeeping
struct SearchState {
    cost: Vec<f64>,
    parent: Vec<Option<usize>>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    sequence: u64,
}

impl SearchState {
    fn new(vertex_count: usize) -> Self {
        Self {
            cost: vec![f64::INFINITY; vertex_count],
            parent: vec![None; vertex_count],
            frontier: BinaryHeap::new(),
            sequence: 0,
        }
    }

    fn push(&mut self, vertex: usize, priority: f64) -> PlannerResult<()> {
        let priority = NotNan::new(priority).map_err(|_| {
            PlannerError::InvalidInput("search priority is NaN".to_string())
        })?;
        self.frontier.push(Reverse(FrontierEntry {
            priority,
            sequence: self.sequence,
            vertex,
        }));
        self.sequence += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.frontier.pop().map(|Reverse(entry)| entry)
    }

    /// Follow parent links back from `goal` and return them start-first
    fn reconstruct(&self, graph: &RoadmapGraph, goal: usize) -> Path2D {
        let mut points = Vec::new();
        let mut current = Some(goal);

        while let Some(index) = current {
            points.push(graph.vertex(index));
            current = self.parent[index];
        }

        points.reverse();
        Path2D::from_points(points)
    }
}

/// A* searcher over a [`RoadmapGraph`]
#[derive(Debug, Clone, Default)]
pub struct AStarSearch {
    config: SearchConfig,
}

impl AStarSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn heuristic(&self, from: &Point2D, goal: &Point2D) -> f64 {
        self.config.heuristic_weight * from.distance(goal)
    }

    /// Least-cost path from `start` to `goal`.
    ///
    /// Returns `NoPathFound` when the frontier empties before the goal is
    /// popped, and `InvalidInput` when either endpoint is not a vertex.
    pub fn search(&self, graph: &RoadmapGraph, start: Point2D, goal: Point2D) -> PlannerResult<Path2D> {
        let start_index = graph.index_of(&start).ok_or_else(|| {
            PlannerError::InvalidInput(format!("start ({}, {}) is not a roadmap vertex", start.x, start.y))
        })?;
        let goal_index = graph.index_of(&goal).ok_or_else(|| {
            PlannerError::InvalidInput(format!("goal ({}, {}) is not a roadmap vertex", goal.x, goal.y))
        })?;

        let mut state = SearchState::new(graph.vertex_count());
        state.cost[start_index] = 0.0;
        state.push(start_index, self.heuristic(&start, &goal))?;

        let mut expansions = 0;
        while let Some(current) = state.pop() {
            let index = current.vertex;
            let g = state.cost[index];

            if index == goal_index {
                debug!(
                    "A*: reached goal after {} expansions, cost {:.3}",
                    expansions, g
                );
                return Ok(state.reconstruct(graph, goal_index));
            }

            // stale entry, a cheaper route was pushed later
            let f = g + self.heuristic(&graph.vertex(index), &goal);
            if current.priority.into_inner() > f {
                continue;
            }

            expansions += 1;
            if let Some(limit) = self.config.max_expansions {
                if expansions > limit {
                    debug!("A*: expansion budget of {} exhausted", limit);
                    return Err(PlannerError::SearchBudgetExceeded { expansions: limit });
                }
            }
            trace!("A*: expanding vertex {} (g = {:.3})", index, g);

            for &(neighbor, weight) in graph.neighbor_indices(index) {
                let new_cost = g + weight;
                if new_cost < state.cost[neighbor] {
                    state.cost[neighbor] = new_cost;
                    state.parent[neighbor] = Some(index);
                    let priority = new_cost + self.heuristic(&graph.vertex(neighbor), &goal);
                    state.push(neighbor, priority)?;
                }
            }
        }

        debug!("A*: frontier exhausted after {} expansions", expansions);
        Err(PlannerError::NoPathFound)
    }
}

/// Least-cost path with the default search configuration
pub fn find_path(graph: &RoadmapGraph, start: Point2D, goal: Point2D) -> PlannerResult<Path2D> {
    AStarSearch::default().search(graph, start, goal)
}
