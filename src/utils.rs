//! Lattice geometry and the bound/metric used to order candidates.

/// Largest bound gap the tie-breaker in [`Lattice::metric`] may bridge.
///
/// The per-lattice weight is this divided by `max_matches + 1`, so the score
/// term stays below it for every score the lattice can produce.
pub const TIE_BREAKER: f32 = 0.01;

/// Upper bound on the total score reachable from `(i, j)` while carrying `score`.
///
/// Assumes every remaining diagonal step matches perfectly (value 1), so it
/// never underestimates the true optimum.
#[inline]
pub fn max_possible_score(score: f32, width: u32, height: u32, i: u32, j: u32) -> f32 {
    debug_assert!(i <= width && j <= height);
    score + (width - i).min(height - j) as f32
}

/// Dimensions of the implicit `width × height` lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    pub width: u32,
    pub height: u32,
}

impl Lattice {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of cells, `width * height`.
    #[inline]
    pub fn cells(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Longest possible alignment, `min(width, height)`.
    #[inline]
    pub fn max_matches(&self) -> usize {
        self.width.min(self.height) as usize
    }

    #[inline]
    pub fn contains(&self, i: u32, j: u32) -> bool {
        i < self.width && j < self.height
    }

    #[inline]
    pub fn max_possible_score(&self, score: f32, i: u32, j: u32) -> f32 {
        max_possible_score(score, self.width, self.height, i, j)
    }

    /// Weight of the realized score in [`metric`](Self::metric).
    #[inline]
    pub fn tie_breaker(&self) -> f32 {
        TIE_BREAKER / (self.max_matches() as f32 + 1.0)
    }

    /// Frontier priority: the admissible bound, with the realized score as a
    /// small tie-breaker. Higher is expanded first.
    ///
    /// Ordering by the bound keeps the search breadth-first-like, which is what
    /// lets `prune` cut from the low end of the frontier. Two candidates swap
    /// relative to their bounds only when the bounds are less than
    /// [`TIE_BREAKER`] apart.
    #[inline]
    pub fn metric(&self, score: f32, i: u32, j: u32) -> f32 {
        self.max_possible_score(score, i, j) + self.tie_breaker() * score
    }
}
