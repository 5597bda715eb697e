//! Output of a completed march.

/// One matched pair on the best path: element `i` of the first sequence
/// aligned with element `j` of the second, with matcher value `match_val`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResultMatch {
    pub i: u32,
    pub j: u32,
    pub match_val: f32,
}

impl ResultMatch {
    #[inline]
    pub fn new(i: u32, j: u32, match_val: f32) -> Self {
        Self { i, j, match_val }
    }
}

/// Best alignment score and the matches that make it up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarchResult {
    /// Accumulated matcher value of the best path.
    pub total_match: f32,
    /// Matches on the best path, strictly increasing in both `i` and `j`.
    pub matches: Vec<ResultMatch>,
}

impl MarchResult {
    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// `(i, j)` pairs of the matches, in order.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.matches.iter().map(|m| (m.i, m.j))
    }

    /// Sum of the match values; equals `total_match` up to float rounding.
    pub fn match_sum(&self) -> f32 {
        self.matches.iter().map(|m| m.match_val).sum()
    }

    /// True when matches are strictly increasing in both coordinates and every
    /// value is positive.
    pub fn is_monotone(&self) -> bool {
        self.matches.iter().all(|m| m.match_val > 0.0)
            && self
                .matches
                .windows(2)
                .all(|w| w[1].i > w[0].i && w[1].j > w[0].j)
    }
}
