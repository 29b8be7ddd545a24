use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use std::thread;
use std::time::Instant;

use crate::{
    DistanceMatrix, Error, Improvement, Result, SolverOptions, Tour, TspPoint,
    bound::GlobalBound,
    search::{SearchCtx, SearchTask},
};

const THREAD_FALLBACK_PARALLELISM: usize = 2;
const THREAD_MIN_PARALLELISM: usize = 2;
const THREAD_RESERVED_CORES: usize = 1;

/// Orchestrates one solve: builds the distance matrix, submits the root
/// search task to a work-stealing pool, tracks progress counters and serves
/// cooperative abort plus best-tour retrieval.
///
/// All accessors take `&self`; the bound, counters and abort flag stay
/// readable from other threads while [`solve`](Self::solve) runs.
pub struct TspSolver {
    points: Vec<TspPoint>,
    matrix: DistanceMatrix,
    options: SolverOptions,
    bound: GlobalBound,
    abort: Arc<AtomicBool>,
    created: AtomicU64,
    completed: AtomicU64,
    confirmed: AtomicBool,
}

impl TspSolver {
    pub fn new(points: Vec<TspPoint>) -> Result<Self> {
        Self::with_options(points, SolverOptions::default())
    }

    pub fn with_options(points: Vec<TspPoint>, options: SolverOptions) -> Result<Self> {
        options.validate()?;
        let matrix = DistanceMatrix::build(&points, options.cost_x, options.cost_y);
        Ok(Self {
            points,
            matrix,
            options,
            bound: GlobalBound::new(),
            abort: Arc::new(AtomicBool::new(false)),
            created: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            confirmed: AtomicBool::new(false),
        })
    }

    /// Installs a hook observing every bound improvement (progress
    /// reporting, watchdogs). Must be called before [`solve`](Self::solve).
    pub fn set_improvement_hook(
        &mut self,
        hook: impl Fn(&Improvement) + Send + Sync + 'static,
    ) {
        self.bound.set_hook(Box::new(hook));
    }

    fn threads(requested: usize) -> usize {
        if requested > 0 {
            return requested;
        }
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(THREAD_FALLBACK_PARALLELISM)
            .max(THREAD_MIN_PARALLELISM)
            - THREAD_RESERVED_CORES
    }

    /// Runs the search to completion or until an abort is requested. Blocks
    /// the calling thread for the whole run. On natural completion (no
    /// abort) the recorded tour is the proven optimum.
    pub fn solve(&self) -> Result<()> {
        let now = Instant::now();
        let n = self.points.len();

        if n <= 1 {
            // Degenerate input: a trivial tour of length zero, optimal by definition.
            self.bound.try_improve(0, &(0..n).collect::<Vec<_>>(), 0);
            self.confirmed.store(true, Ordering::Relaxed);
            log::info!("solver: degenerate n={n} length=0");
            return Ok(());
        }

        let parallelism = Self::threads(self.options.threads);
        log::info!("solver: start n={n} threads={parallelism}");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .build()
            .map_err(|e| Error::other(format!("rayon pool: {e}")))?;

        let ctx = SearchCtx {
            matrix: &self.matrix,
            bound: &self.bound,
            abort: self.abort.as_ref(),
            created: &self.created,
            completed: &self.completed,
        };
        pool.install(|| SearchTask::root(n, &ctx).execute(&ctx));

        if !self.abort.load(Ordering::Relaxed) {
            self.confirmed.store(true, Ordering::Relaxed);
        }

        log::info!(
            "solver: complete n={n} best={} tasks={} confirmed={} time_ms={}",
            self.best_length().unwrap_or(0),
            self.tasks_created(),
            self.is_optimality_confirmed(),
            now.elapsed().as_millis()
        );
        Ok(())
    }

    /// First-found mode: blocks until *any* complete tour has been recorded,
    /// requests an abort, then returns that tour's point order.
    ///
    /// Known quirk, preserved deliberately: the abort is requested as soon
    /// as the first complete tour exists, so calling this while the search
    /// is still running usually returns a feasible but suboptimal tour.
    /// Callers wanting the proven optimum must let [`solve`](Self::solve)
    /// return on its own and then read [`best_path`](Self::best_path).
    pub fn request_best_path(&self) -> Vec<usize> {
        self.bound.wait_for_path();
        self.request_abort();
        self.bound.best_path().unwrap_or_default()
    }

    /// Cooperative abort: in-flight tasks observe the flag at their next
    /// check point (task entry and branching loops). Monotonic; never
    /// cleared within one solve.
    pub fn request_abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    /// Shared handle to the abort flag, for external watchdogs.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        self.abort.clone()
    }

    /// True only if the search ran to natural completion without a forced
    /// abort.
    pub fn is_optimality_confirmed(&self) -> bool {
        self.confirmed.load(Ordering::Relaxed)
    }

    pub fn tasks_created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    pub fn tasks_completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn best_length(&self) -> Option<u64> {
        let length = self.bound.current_length();
        (length != u64::MAX).then_some(length)
    }

    pub fn best_path(&self) -> Option<Vec<usize>> {
        self.bound.best_path()
    }

    /// Best tour as owned points in visitation order plus its closed length.
    pub fn best_tour(&self) -> Option<Tour> {
        let length = self.best_length()?;
        let path = self.bound.best_path()?;
        let points = path.iter().map(|&i| self.points[i].clone()).collect();
        Some(Tour::new(points, length))
    }

    pub fn points(&self) -> &[TspPoint] {
        &self.points
    }
}
