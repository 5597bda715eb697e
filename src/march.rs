//! Lazy matrix march: best-path search for fuzzy LCS.
//!
//! The search walks an implicit `width × height` lattice. A candidate at
//! `(i, j)` carrying `score` stands for a partial alignment of the prefixes
//! `[0, i)` and `[0, j)`. Expanding it evaluates the matcher at `(i, j)` (once
//! per cell, memoized) and proposes:
//! - a diagonal successor `(i+1, j+1)` with `score + eval` when `eval > 0`,
//! - skip successors `(i+1, j)` and `(i, j+1)` with `score` when `eval` is
//!   below the branch threshold.
//!
//! A successor that steps off the right or bottom edge is a completed path.
//! Candidates are ordered by an admissible bound (`score` plus the shorter
//! remaining side), so paths that can no longer beat the best completed one
//! are dropped early. For mostly similar sequences this touches ~O(n) cells
//! instead of the full O(n²) table.

use crate::frontier::{Candidate, Frontier, PrunePolicy};
use crate::matrix::{MatchMatrix, UNSET};
use crate::result::{MarchResult, ResultMatch};
use crate::utils::Lattice;
use crate::Matcher;

/// Default for [`LazyMatrixMarch::branch_threshold`].
pub const DEFAULT_BRANCH_THRESHOLD: f32 = 0.95;

/// Slack allowed when re-deriving a diagonal step during reconstruction.
const BACKTRACK_TOLERANCE: f32 = 1e-4;

/// Counters describing how much work a march did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarchStats {
    /// Candidates popped from the frontier.
    pub steps: u32,
    /// Matcher invocations (distinct cells evaluated).
    pub evals: u32,
    /// Popped candidates discarded because their cell was already reached
    /// with an equal or better score.
    pub dominated: u32,
    /// Popped candidates discarded because their bound had already fallen
    /// below the best completed path.
    pub stale: u32,
    /// Candidates recycled by frontier pruning.
    pub pruned: u32,
    /// Candidate nodes allocated over the run.
    pub nodes: u32,
}

/// Online, interruptible FLCS search over a lazily evaluated match matrix.
///
/// ```
/// use lazy_march::LazyMatrixMarch;
///
/// let mut march = LazyMatrixMarch::new(3, 3, |i: u32, j: u32| if i == j { 1.0 } else { 0.0 });
/// let result = march.run();
/// assert_eq!(result.total_match, 3.0);
/// assert_eq!(result.pairs().collect::<Vec<_>>(), vec![(0, 0), (1, 1), (2, 2)]);
/// ```
pub struct LazyMatrixMarch<M: Matcher> {
    lattice: Lattice,
    matcher: M,
    matrix: MatchMatrix,
    frontier: Frontier,
    branch_threshold: f32,
    prune_policy: PrunePolicy,
    /// Best total of any completed path, [`UNSET`] until the first completes.
    best_match: f32,
    /// Last in-bounds cell of the best completed path.
    best_res: (u32, u32),
    stats: MarchStats,
}

impl<M: Matcher> LazyMatrixMarch<M> {
    /// Create a march with the default branch threshold and prune policy.
    ///
    /// `width` and `height` are the lengths of the first and second sequence.
    ///
    /// # Panics
    /// Panics if `width == 0` or `height == 0`.
    pub fn new(width: u32, height: u32, matcher: M) -> Self {
        Self::with_config(
            width,
            height,
            matcher,
            DEFAULT_BRANCH_THRESHOLD,
            PrunePolicy::default(),
        )
    }

    /// # Panics
    /// Panics if `width == 0`, `height == 0`, or `branch_threshold` is not in `(0, 1]`.
    pub fn with_branch_threshold(width: u32, height: u32, matcher: M, branch_threshold: f32) -> Self {
        Self::with_config(width, height, matcher, branch_threshold, PrunePolicy::default())
    }

    /// # Panics
    /// Panics if `width == 0`, `height == 0`, or `branch_threshold` is not in `(0, 1]`.
    pub fn with_config(
        width: u32,
        height: u32,
        matcher: M,
        branch_threshold: f32,
        prune_policy: PrunePolicy,
    ) -> Self {
        assert!(width > 0, "width must be positive");
        assert!(height > 0, "height must be positive");
        assert!(
            branch_threshold > 0.0 && branch_threshold <= 1.0,
            "branch_threshold must lie in (0, 1], got {branch_threshold}"
        );

        let lattice = Lattice::new(width, height);
        let mut frontier = Frontier::new(lattice);
        frontier.insert(0, 0, 0.0);

        Self {
            lattice,
            matcher,
            matrix: MatchMatrix::new(lattice),
            frontier,
            branch_threshold,
            prune_policy,
            best_match: UNSET,
            best_res: (0, 0),
            stats: MarchStats::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.lattice.width
    }

    pub fn height(&self) -> u32 {
        self.lattice.height
    }

    pub fn branch_threshold(&self) -> f32 {
        self.branch_threshold
    }

    pub fn prune_policy(&self) -> PrunePolicy {
        self.prune_policy
    }

    pub fn num_evals(&self) -> u32 {
        self.stats.evals
    }

    pub fn num_steps(&self) -> u32 {
        self.stats.steps
    }

    pub fn stats(&self) -> MarchStats {
        MarchStats {
            nodes: self.frontier.pool_size() as u32,
            ..self.stats
        }
    }

    /// Best score of any completed path so far.
    pub fn best_match(&self) -> Option<f32> {
        (self.best_match >= 0.0).then_some(self.best_match)
    }

    /// Next candidate `step` would expand.
    pub fn peek_candidate(&self) -> Option<Candidate> {
        self.frontier.peek()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// True once the frontier is exhausted and `run` would only reconstruct.
    pub fn is_done(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn matrix(&self) -> &MatchMatrix {
        &self.matrix
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Expand the highest-priority candidate.
    ///
    /// Returns `false` when there is nothing left to do. Stepping can be stopped
    /// at any point and resumed later, or finished with [`run`](Self::run).
    pub fn step(&mut self) -> bool {
        let Some(cand) = self.frontier.pop() else {
            return false;
        };
        self.stats.steps += 1;

        // Pruning removes most of these before they surface, but a completion
        // can raise `best_match` past candidates queued earlier.
        if self.lattice.max_possible_score(cand.score, cand.i, cand.j) < self.best_match {
            self.stats.stale += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(i = cand.i, j = cand.j, score = cand.score, "stale candidate");
            return true;
        }

        let cell = self.matrix.cell_mut(cand.i, cand.j);
        if cell.best >= cand.score {
            self.stats.dominated += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(i = cand.i, j = cand.j, score = cand.score, best = cell.best, "dominated candidate");
            return true;
        }

        cell.best = cand.score;
        if !cell.is_evaluated() {
            let eval = self.matcher.score(cand.i, cand.j);
            debug_assert!(
                (0.0..=1.0).contains(&eval),
                "matcher returned {eval} at ({}, {}), expected [0, 1]",
                cand.i,
                cand.j
            );
            cell.eval = eval;
            self.stats.evals += 1;
        }
        let eval = cell.eval;

        if eval > 0.0 {
            let new_score = cand.score + eval;
            self.add_candidate(new_score, cand.i, cand.j, 1, 1);
            // Nothing that cannot reach `new_score` can be optimal any more.
            let pruned = self.frontier.prune(new_score, self.prune_policy);
            self.stats.pruned += pruned as u32;
        }

        if eval < self.branch_threshold {
            self.add_candidate(cand.score, cand.i, cand.j, 1, 0);
            self.add_candidate(cand.score, cand.i, cand.j, 0, 1);
        }

        true
    }

    /// Propose the successor `(i + add_i, j + add_j)` carrying `score`.
    ///
    /// Off-lattice successors are completed paths; in-lattice ones are queued only
    /// when their bound can still beat the best completed path.
    fn add_candidate(&mut self, score: f32, i: u32, j: u32, add_i: u32, add_j: u32) {
        let (ni, nj) = (i + add_i, j + add_j);
        if !self.lattice.contains(ni, nj) {
            if score > self.best_match {
                self.best_match = score;
                self.best_res = (i, j);
            }
            return;
        }

        if self.lattice.max_possible_score(score, ni, nj) > self.best_match {
            self.frontier.insert(ni, nj, score);
        }
    }

    /// Step until the frontier is exhausted, then reconstruct the best path.
    ///
    /// Safe to call after any number of [`step`](Self::step) calls, and again
    /// after it returns; a finished march yields the same result every time.
    pub fn run(&mut self) -> MarchResult {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("march_run", width = self.lattice.width, height = self.lattice.height);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        while self.step() {}

        let result = {
            #[cfg(feature = "tracing")]
            let span = tracing::info_span!("reconstruct");
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            self.reconstruct()
        };

        #[cfg(feature = "tracing")]
        {
            let stats = self.stats();
            tracing::debug!(
                total_match = result.total_match,
                matches = result.matches.len(),
                steps = stats.steps,
                evals = stats.evals,
                dominated = stats.dominated,
                stale = stats.stale,
                pruned = stats.pruned,
                nodes = stats.nodes,
                "march finished"
            );
        }

        result
    }

    /// Walk back from the end of the best completed path through `best`
    /// values, emitting every diagonal step as a match.
    fn reconstruct(&self) -> MarchResult {
        debug_assert!(self.best_match >= 0.0, "no completed path recorded");

        let max_matches = self.lattice.max_matches();
        let mut matches = vec![ResultMatch::default(); max_matches];
        let mut out = max_matches;

        let (mut i, mut j) = self.best_res;

        // The best path left the lattice from `best_res`; a positive value there
        // means it left diagonally, matching that cell.
        let last = self.matrix.cell(i, j);
        if last.eval > 0.0 {
            out -= 1;
            matches[out] = ResultMatch::new(i, j, last.eval);
        }

        while i > 0 && j > 0 {
            let best = self.matrix.cell(i, j).best;
            if self.matrix.cell(i - 1, j).best == best {
                i -= 1;
                continue;
            }
            if self.matrix.cell(i, j - 1).best == best {
                j -= 1;
                continue;
            }

            let diag = self.matrix.cell(i - 1, j - 1);
            debug_assert!(diag.eval > 0.0 && diag.eval <= 1.0);
            debug_assert!(
                (diag.best + diag.eval - best).abs() <= BACKTRACK_TOLERANCE,
                "inconsistent diagonal step into ({i}, {j})"
            );

            i -= 1;
            j -= 1;
            debug_assert!(out > 0, "more matches than min(width, height)");
            out -= 1;
            matches[out] = ResultMatch::new(i, j, diag.eval);
        }

        matches.drain(..out);
        MarchResult {
            total_match: self.best_match.max(0.0),
            matches,
        }
    }
}
