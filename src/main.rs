use std::{env, time::Instant};

use log::info;
use rand::Rng;

use tsp_bnb_core::{Error, LogLevel, Result, SolverOptions, TspPoint, TspSolver, logging};

const DEFAULT_POINTS: usize = 10;
const GRID_MAX: i64 = 100;

fn main() -> Result<()> {
    let now = Instant::now();

    let first_found = env::args().any(|arg| arg == "--first-found");
    let n = env::args()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_POINTS);

    let options = SolverOptions::default().with_log_level(LogLevel::Info);
    logging::init_logger(&options)?;

    let mut rng = rand::rng();
    let points: Vec<TspPoint> = (0..n)
        .map(|i| {
            TspPoint::new(
                i.to_string(),
                rng.random_range(0..GRID_MAX),
                rng.random_range(0..GRID_MAX),
            )
        })
        .collect();

    for point in &points {
        info!("point: label={} x={} y={}", point.label, point.x, point.y);
    }

    let solver = TspSolver::with_options(points, options)?;

    if first_found {
        // Take the first complete tour instead of waiting for the optimum.
        let result = std::thread::scope(|scope| {
            let handle = scope.spawn(|| solver.solve());
            let path = solver.request_best_path();
            info!("first-found: path_len={}", path.len());
            handle.join()
        });
        match result {
            Ok(solved) => solved?,
            Err(_) => return Err(Error::other("solver thread panicked")),
        }
    } else {
        solver.solve()?;
    }

    if let Some(tour) = solver.best_tour() {
        println!("{tour}");
        info!(
            "output: length={} tasks={} confirmed={} time_ms={}",
            tour.length(),
            solver.tasks_created(),
            solver.is_optimality_confirmed(),
            now.elapsed().as_millis()
        );
    }

    Ok(())
}
