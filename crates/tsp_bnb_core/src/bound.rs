use std::sync::{
    Condvar, Mutex,
    atomic::{AtomicU64, Ordering},
};
use std::time::{Duration, Instant};

/// Snapshot handed to improvement hooks when a better complete tour lands.
#[derive(Clone, Debug)]
pub struct Improvement {
    pub length: u64,
    pub elapsed: Duration,
    pub tasks_created: u64,
}

pub type ImprovementHook = Box<dyn Fn(&Improvement) + Send + Sync>;

/// Best complete tour found so far, shared by every search task.
///
/// The length lives in an atomic so the hot pruning path never takes the
/// lock; the atomic is only stored while holding `inner`, so the recorded
/// length is monotonically non-increasing and always matches the recorded
/// path. Readers of `current_length` may see a momentarily stale (larger)
/// value between another task's pre-check and its locked commit, which only
/// costs redundant exploration, never a wrong result.
pub struct GlobalBound {
    length: AtomicU64,
    inner: Mutex<BoundInner>,
    first_solution: Condvar,
    started: Instant,
    hook: Option<ImprovementHook>,
}

#[derive(Default)]
struct BoundInner {
    path: Option<Vec<usize>>,
}

impl GlobalBound {
    pub fn new() -> Self {
        Self {
            length: AtomicU64::new(u64::MAX),
            inner: Mutex::new(BoundInner::default()),
            first_solution: Condvar::new(),
            started: Instant::now(),
            hook: None,
        }
    }

    /// Installs the external delivery collaborator for "solution improved"
    /// events. Hooks run under the bound's lock (delivery is commit-ordered)
    /// and must not call back into the bound.
    pub fn set_hook(&mut self, hook: ImprovementHook) {
        self.hook = Some(hook);
    }

    /// Lock-free read of the best known length, `u64::MAX` until the first
    /// complete tour is recorded. Used for cheap pruning checks.
    pub fn current_length(&self) -> u64 {
        self.length.load(Ordering::Relaxed)
    }

    /// Check-lock-recheck commit of a complete tour. The cheap pre-check
    /// avoids taking the lock for the common failed attempt; the comparison
    /// under the lock is authoritative.
    pub fn try_improve(&self, candidate: u64, path: &[usize], tasks_created: u64) -> bool {
        if candidate >= self.current_length() {
            return false;
        }

        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if candidate >= self.length.load(Ordering::Relaxed) {
            return false;
        }

        self.length.store(candidate, Ordering::Relaxed);
        inner.path = Some(path.to_vec());
        self.first_solution.notify_all();

        let improvement = Improvement {
            length: candidate,
            elapsed: self.started.elapsed(),
            tasks_created,
        };
        log::info!(
            "bound: improved length={candidate} elapsed_ms={} tasks={tasks_created}",
            improvement.elapsed.as_millis()
        );
        if let Some(hook) = &self.hook {
            hook(&improvement);
        }
        true
    }

    /// Blocks until any complete tour has been recorded, then returns it.
    pub fn wait_for_path(&self) -> Vec<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        while inner.path.is_none() {
            inner = self
                .first_solution
                .wait(inner)
                .unwrap_or_else(|e| e.into_inner());
        }
        inner.path.clone().unwrap_or_default()
    }

    pub fn best_path(&self) -> Option<Vec<usize>> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .path
            .clone()
    }
}

impl Default for GlobalBound {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, atomic::Ordering};
    use std::thread;

    use super::{GlobalBound, Improvement};

    #[test]
    fn starts_unbounded_with_no_path() {
        let bound = GlobalBound::new();
        assert_eq!(bound.current_length(), u64::MAX);
        assert!(bound.best_path().is_none());
    }

    #[test]
    fn try_improve_records_length_and_path() {
        let bound = GlobalBound::new();
        assert!(bound.try_improve(40, &[0, 1, 2, 3], 7));
        assert_eq!(bound.current_length(), 40);
        assert_eq!(bound.best_path(), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn try_improve_rejects_equal_or_worse_candidates() {
        let bound = GlobalBound::new();
        assert!(bound.try_improve(40, &[0, 1, 2, 3], 1));
        assert!(!bound.try_improve(40, &[0, 2, 1, 3], 2));
        assert!(!bound.try_improve(50, &[0, 3, 1, 2], 3));
        assert_eq!(bound.current_length(), 40);
        assert_eq!(bound.best_path(), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn recorded_length_never_increases() {
        let bound = GlobalBound::new();
        let mut last = bound.current_length();
        for (candidate, path) in [(90, vec![0, 1]), (120, vec![1, 0]), (30, vec![0, 1])] {
            bound.try_improve(candidate, &path, 0);
            let current = bound.current_length();
            assert!(current <= last);
            last = current;
        }
        assert_eq!(last, 30);
    }

    #[test]
    fn hook_sees_improvements_in_commit_order() {
        let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_hook = seen.clone();

        let mut bound = GlobalBound::new();
        bound.set_hook(Box::new(move |improvement: &Improvement| {
            seen_hook
                .lock()
                .expect("hook mutex")
                .push(improvement.length);
        }));

        bound.try_improve(100, &[0, 1], 1);
        bound.try_improve(150, &[1, 0], 2);
        bound.try_improve(60, &[0, 1], 3);

        assert_eq!(*seen.lock().expect("hook mutex"), vec![100, 60]);
    }

    #[test]
    fn wait_for_path_blocks_until_first_solution() {
        let bound = Arc::new(GlobalBound::new());
        let writer = bound.clone();

        let handle = thread::spawn(move || {
            writer.try_improve(25, &[0, 2, 1], 5);
        });

        let path = bound.wait_for_path();
        assert_eq!(path, vec![0, 2, 1]);
        handle.join().expect("writer thread");

        // Already-solved bounds return immediately.
        assert_eq!(bound.wait_for_path(), vec![0, 2, 1]);
    }

    #[test]
    fn concurrent_improvements_keep_the_smallest() {
        let bound = Arc::new(GlobalBound::new());
        let mut handles = Vec::new();
        for candidate in [80u64, 50, 70, 20, 60] {
            let bound = bound.clone();
            handles.push(thread::spawn(move || {
                bound.try_improve(candidate, &[0, 1, 2], candidate);
            }));
        }
        for handle in handles {
            handle.join().expect("improver thread");
        }
        assert_eq!(bound.current_length(), 20);
    }

    #[test]
    fn hook_is_not_called_for_rejected_candidates() {
        let calls = Arc::new(std::sync::atomic::AtomicU64::new(0));
        let calls_hook = calls.clone();

        let mut bound = GlobalBound::new();
        bound.set_hook(Box::new(move |_: &Improvement| {
            calls_hook.fetch_add(1, Ordering::Relaxed);
        }));

        bound.try_improve(10, &[0, 1], 1);
        bound.try_improve(10, &[1, 0], 2);
        bound.try_improve(99, &[1, 0], 3);

        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }
}
