use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::{DistanceMatrix, GlobalBound};

/// Shared read-only context threaded through every search task.
#[derive(Clone, Copy)]
pub(crate) struct SearchCtx<'a> {
    pub(crate) matrix: &'a DistanceMatrix,
    pub(crate) bound: &'a GlobalBound,
    pub(crate) abort: &'a AtomicBool,
    pub(crate) created: &'a AtomicU64,
    pub(crate) completed: &'a AtomicU64,
}

impl SearchCtx<'_> {
    fn aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Outcome {
    Pruned,
    Solved,
    Branched,
}

/// One node of the branch-and-bound search tree.
///
/// Owns an independent copy of the partial tour: visited order, remaining
/// free points (current position still included), current position and
/// accumulated length. Nothing is shared across tasks except the context.
pub(crate) struct SearchTask {
    visited: Vec<usize>,
    free: Vec<usize>,
    position: usize,
    length: u64,
}

impl SearchTask {
    /// Root of the search tree: empty visited order, full free set,
    /// start fixed at index 0.
    pub(crate) fn root(n: usize, ctx: &SearchCtx<'_>) -> Self {
        ctx.created.fetch_add(1, Ordering::Relaxed);
        Self {
            visited: Vec::with_capacity(n),
            free: (0..n).collect(),
            position: 0,
            length: 0,
        }
    }

    fn child(&self, next: usize, ctx: &SearchCtx<'_>) -> Self {
        ctx.created.fetch_add(1, Ordering::Relaxed);
        Self {
            visited: self.visited.clone(),
            free: self.free.clone(),
            position: next,
            length: self.length + ctx.matrix.distance(self.position, next),
        }
    }

    /// Runs the task to its terminal state. The completed counter only
    /// ticks after all spawned children have joined.
    pub(crate) fn execute(mut self, ctx: &SearchCtx<'_>) {
        if self.step(ctx) == Outcome::Branched {
            self.branch(ctx);
        }
        ctx.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Entry transition: prune against the shared bound and the abort flag,
    /// record a complete tour, or report that branching is needed.
    fn step(&mut self, ctx: &SearchCtx<'_>) -> Outcome {
        if ctx.aborted() || self.length >= ctx.bound.current_length() {
            return Outcome::Pruned;
        }

        self.visited.push(self.position);
        self.free.retain(|&p| p != self.position);

        if self.free.is_empty() {
            // Complete tour: close the cycle back to the start point.
            let start = self.visited[0];
            let total = self.length + ctx.matrix.distance(self.position, start);
            ctx.bound
                .try_improve(total, &self.visited, ctx.created.load(Ordering::Relaxed));
            return Outcome::Solved;
        }

        Outcome::Branched
    }

    /// One child per free point, generated in nearest-neighbor order from a
    /// scratch copy of the free set. The nearest child runs inline in the
    /// current control flow; the rest are spawned onto the pool and joined
    /// at scope exit. The abort flag bounds wasted spawning after a cancel.
    fn branch(&self, ctx: &SearchCtx<'_>) {
        let mut scratch = self.free.clone();
        let Some(first) = ctx.matrix.nearest(self.position, &mut scratch) else {
            unreachable!("nearest-neighbor selection on a non-empty candidate set returned none");
        };

        rayon::scope(|scope| {
            self.child(first, ctx).execute(ctx);

            while !ctx.aborted() {
                let Some(next) = ctx.matrix.nearest(self.position, &mut scratch) else {
                    break;
                };
                let child = self.child(next, ctx);
                scope.spawn(move |_| child.execute(ctx));
            }
        });
    }
}
