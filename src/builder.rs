use crate::frontier::PrunePolicy;
use crate::march::DEFAULT_BRANCH_THRESHOLD;
use crate::{LazyMatrixMarch, Matcher};

/// Configures a [`LazyMatrixMarch`] before construction.
///
/// ```
/// use lazy_march::{LazyMatrixMarchBuilder, PrunePolicy};
///
/// let a = b"kitten";
/// let b = b"sitting";
/// let result = LazyMatrixMarchBuilder::new(6, 7, |i: u32, j: u32| {
///     if a[i as usize] == b[j as usize] { 1.0 } else { 0.0 }
/// })
/// .with_branch_threshold(1.0)
/// .with_prune_policy(PrunePolicy::BoundOrdered)
/// .build()
/// .run();
/// assert_eq!(result.total_match, 4.0);
/// ```
pub struct LazyMatrixMarchBuilder<M: Matcher> {
    width: u32,
    height: u32,
    matcher: M,
    branch_threshold: Option<f32>,
    prune_policy: Option<PrunePolicy>,
}

impl<M: Matcher> LazyMatrixMarchBuilder<M> {
    pub fn new(width: u32, height: u32, matcher: M) -> Self {
        Self {
            width,
            height,
            matcher,
            branch_threshold: None,
            prune_policy: None,
        }
    }

    /// Cells scoring below this also spawn the two skip successors.
    /// Must lie in `(0, 1]`; `1.0` keeps the search exact.
    pub fn with_branch_threshold(mut self, threshold: f32) -> Self {
        self.branch_threshold = Some(threshold);
        self
    }

    pub fn with_prune_policy(mut self, policy: PrunePolicy) -> Self {
        self.prune_policy = Some(policy);
        self
    }

    /// # Panics
    /// Panics if `width` or `height` is zero or the branch threshold lies
    /// outside `(0, 1]`.
    pub fn build(self) -> LazyMatrixMarch<M> {
        LazyMatrixMarch::with_config(
            self.width,
            self.height,
            self.matcher,
            self.branch_threshold.unwrap_or(DEFAULT_BRANCH_THRESHOLD),
            self.prune_policy.unwrap_or_default(),
        )
    }
}
