// PRM path planning demo
//
// Plans across a fixed 10 x 6 field with five triangular obstacles and logs
// the roadmap size and the smoothed waypoints.
//
// usage: prm_demo [config.toml]
// set RUST_LOG=debug for per-phase details

use log::{error, info};

use prm_planner::{Bounds, Obstacles, PlannerConfig, PlannerResult, Point2D, Polygon, PrmPlanner};

fn triangle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> PlannerResult<Polygon> {
    Polygon::triangle(a.into(), b.into(), c.into())
}

fn environment() -> PlannerResult<(Bounds, Obstacles)> {
    let bounds = Bounds::new(10.0, 6.0)?;
    let obstacles = Obstacles::from_polygons(vec![
        triangle((1.5, 0.5), (3.0, 0.8), (2.2, 3.5))?,
        triangle((3.8, 5.5), (5.2, 2.4), (6.0, 5.0))?,
        triangle((4.2, 0.3), (6.5, 0.6), (5.0, 1.9))?,
        triangle((7.0, 1.2), (8.8, 2.0), (7.4, 4.3))?,
        triangle((0.6, 4.2), (2.8, 4.6), (1.2, 5.7))?,
    ]);
    Ok((bounds, obstacles))
}

fn run() -> PlannerResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {}", path);
            PlannerConfig::load(path)?
        }
        None => PlannerConfig {
            seed: Some(4),
            ..Default::default()
        },
    };

    let (bounds, obstacles) = environment()?;
    let start = Point2D::new(0.5, 0.5);
    let goal = Point2D::new(9.5, 5.5);

    info!(
        "PRM path planning start: ({}, {}) -> ({}, {}), {} obstacles",
        start.x,
        start.y,
        goal.x,
        goal.y,
        obstacles.len()
    );

    let planner = PrmPlanner::new(bounds, obstacles, config)?;
    let outcome = planner.plan_detailed(start, goal)?;

    info!(
        "roadmap: {} vertices, {} edges",
        outcome.roadmap.vertex_count(),
        outcome.roadmap.edge_count()
    );
    info!(
        "A* path: {} waypoints, length {:.3}",
        outcome.raw_path.len(),
        outcome.raw_path.total_length()
    );
    info!(
        "smoothed path: {} waypoints, length {:.3}",
        outcome.path.len(),
        outcome.path.total_length()
    );
    for (i, p) in outcome.path.points.iter().enumerate() {
        info!("  {:>2}: ({:.3}, {:.3})", i, p.x, p.y);
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
