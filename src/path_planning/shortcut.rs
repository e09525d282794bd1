//! Stochastic path shortcutting
//!
//! Each trial picks two distinct waypoints at random and, if the straight
//! connection between them is collision-free, drops every waypoint strictly
//! between them. Best effort: a trial may change nothing.

use log::debug;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::Path2D;
use crate::geometry::CollisionChecker;
use crate::path_planning::prm::PlanningContext;

/// Configuration for shortcut smoothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Number of random shortcut attempts, 0 disables smoothing
    pub trials: usize,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self { trials: 100 }
    }
}

/// Outcome counters of a smoothing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortcutStats {
    pub trials: usize,
    pub accepted: usize,
    pub removed: usize,
}

/// Shortcut smoother bound to an obstacle set
pub struct PathSmoother<'a> {
    checker: &'a CollisionChecker,
    config: ShortcutConfig,
}

impl<'a> PathSmoother<'a> {
    pub fn new(checker: &'a CollisionChecker, config: ShortcutConfig) -> Self {
        Self { checker, config }
    }

    /// Shorten `path` in place. The first and last waypoints are never removed.
    pub fn smooth<R: Rng + ?Sized>(&self, path: &mut Path2D, rng: &mut R) -> ShortcutStats {
        let mut stats = ShortcutStats::default();

        for _ in 0..self.config.trials {
            // nothing left to remove
            if path.len() < 3 {
                break;
            }
            stats.trials += 1;

            let picked = index::sample(rng, path.len(), 2);
            let (lo, hi) = {
                let (a, b) = (picked.index(0), picked.index(1));
                (a.min(b), a.max(b))
            };
            if hi - lo < 2 {
                continue;
            }

            if self.checker.is_connectable(&path.points[lo], &path.points[hi]) {
                path.points.drain(lo + 1..hi);
                stats.accepted += 1;
                stats.removed += hi - lo - 1;
            }
        }

        debug!(
            "shortcut: {} trials, {} accepted, {} waypoints removed",
            stats.trials, stats.accepted, stats.removed
        );
        stats
    }
}

/// Shortcut a copy of `path` with `trials` random attempts
pub fn shortcut<R: Rng + ?Sized>(
    path: &Path2D,
    checker: &CollisionChecker,
    trials: usize,
    rng: &mut R,
) -> Path2D {
    let mut smoothed = path.clone();
    PathSmoother::new(checker, ShortcutConfig { trials }).smooth(&mut smoothed, rng);
    smoothed
}

/// Shortcut `path` against the context's obstacles, drawing from its random source
pub fn smooth_path(ctx: &mut PlanningContext, path: &Path2D, trials: usize) -> Path2D {
    let PlanningContext { checker, rng, .. } = ctx;
    shortcut(path, checker, trials, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Point2D;
    use crate::geometry::{Obstacles, Polygon, Segment};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn zigzag() -> Path2D {
        Path2D::from_points(
            (0..12)
                .map(|i| Point2D::new(i as f64, if i % 2 == 0 { 0.0 } else { 1.0 }))
                .collect(),
        )
    }

    fn block() -> Obstacles {
        // small triangle under the peak at (5, 1), clear of the zigzag itself
        Obstacles::from_polygons(vec![Polygon::triangle(
            Point2D::new(4.8, 0.05),
            Point2D::new(5.2, 0.05),
            Point2D::new(5.0, 0.5),
        )
        .unwrap()])
    }

    #[test]
    fn test_free_space_collapses_to_endpoints() {
        let checker = CollisionChecker::new(&Obstacles::new());
        let mut rng = StdRng::seed_from_u64(1);
        let path = zigzag();
        let smoothed = shortcut(&path, &checker, 500, &mut rng);
        assert_eq!(smoothed.points, vec![path.points[0], path.points[11]]);
    }

    #[test]
    fn test_endpoints_are_preserved() {
        let checker = CollisionChecker::new(&block());
        let path = zigzag();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let smoothed = shortcut(&path, &checker, 50, &mut rng);
            assert_eq!(smoothed.first(), path.first());
            assert_eq!(smoothed.last(), path.last());
            assert!(smoothed.len() >= 2);
            // remaining waypoints keep their original order, no duplicates
            let positions: Vec<usize> = smoothed
                .points
                .iter()
                .map(|p| path.points.iter().position(|q| q == p).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_never_introduces_colliding_segments() {
        let obstacles = block();
        let checker = CollisionChecker::new(&obstacles);
        let path = zigzag();
        // the input itself must be valid
        for w in path.points.windows(2) {
            assert!(checker.is_connectable(&w[0], &w[1]));
        }

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let smoothed = shortcut(&path, &checker, 200, &mut rng);
            for w in smoothed.points.windows(2) {
                let s = Segment::new(w[0], w[1]);
                assert!(checker.segment_is_free(&s));
            }
            assert!(smoothed.total_length() <= path.total_length() + 1e-9);
        }
    }

    #[test]
    fn test_short_paths_are_untouched() {
        let checker = CollisionChecker::new(&Obstacles::new());
        let mut rng = StdRng::seed_from_u64(3);
        let two = Path2D::from_points(vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]);
        assert_eq!(shortcut(&two, &checker, 10, &mut rng), two);

        let mut one = Path2D::from_points(vec![Point2D::new(0.0, 0.0)]);
        let stats = PathSmoother::new(&checker, ShortcutConfig::default()).smooth(&mut one, &mut rng);
        assert_eq!(stats.trials, 0);
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_stats_count_removed_waypoints() {
        let checker = CollisionChecker::new(&Obstacles::new());
        let mut rng = StdRng::seed_from_u64(11);
        let mut path = zigzag();
        let stats = PathSmoother::new(&checker, ShortcutConfig { trials: 1000 }).smooth(&mut path, &mut rng);
        assert_eq!(stats.removed, 10);
        assert_eq!(path.len(), 2);
    }
}
