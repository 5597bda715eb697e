//! Full-table dynamic program for the same alignment problem.
//!
//! Evaluates the matcher on every cell and fills the classic LCS-style table,
//! so it costs O(width · height) time and memory regardless of input. Used as a
//! baseline for the lazy march in tests, benches and the scaling probe.

use crate::result::{MarchResult, ResultMatch};
use crate::Matcher;

/// Optimal total match and one optimal match list.
///
/// `dp[i][j]` holds the best score aligning prefixes `[0, i)` and `[0, j)`:
/// `dp[i+1][j+1] = max(dp[i][j+1], dp[i+1][j], dp[i][j] + m(i, j))`.
pub fn full_flcs<M: Matcher>(width: u32, height: u32, mut matcher: M) -> MarchResult {
    let w = width as usize;
    let h = height as usize;
    let mut values = vec![0f32; w * h];
    for i in 0..width {
        for j in 0..height {
            values[i as usize * h + j as usize] = matcher.score(i, j);
        }
    }

    let stride = h + 1;
    let mut dp = vec![0f32; (w + 1) * stride];
    for i in 0..w {
        for j in 0..h {
            let up = dp[i * stride + j + 1];
            let left = dp[(i + 1) * stride + j];
            let diag = dp[i * stride + j] + values[i * h + j];
            dp[(i + 1) * stride + j + 1] = up.max(left).max(diag);
        }
    }

    let mut rev = Vec::new();
    let (mut i, mut j) = (w, h);
    while i > 0 && j > 0 {
        let here = dp[i * stride + j];
        let m = values[(i - 1) * h + j - 1];
        if m > 0.0 && dp[(i - 1) * stride + j - 1] + m == here {
            rev.push(ResultMatch::new((i - 1) as u32, (j - 1) as u32, m));
            i -= 1;
            j -= 1;
        } else if dp[(i - 1) * stride + j] == here {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    rev.reverse();

    MarchResult {
        total_match: dp[w * stride + h],
        matches: rev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact<'a>(a: &'a [u8], b: &'a [u8]) -> impl FnMut(u32, u32) -> f32 + 'a {
        move |i, j| if a[i as usize] == b[j as usize] { 1.0 } else { 0.0 }
    }

    #[test]
    fn classic_lcs_length() {
        let s = b"ACCGGTCGAGTGCGCGGAAGCCGGCCGAA";
        let t = b"GTCGTTCGGAATGCCGTTGCTCTGTAAA";
        let r = full_flcs(s.len() as u32, t.len() as u32, exact(s, t));
        assert_eq!(r.total_match, 20.0);
        assert_eq!(r.len(), 20);
        assert!(r.is_monotone());
    }

    #[test]
    fn fuzzy_prefers_heavier_pair() {
        // (0,0) + (1,1) = 0.6 loses to (0,1) = 0.9 on its own.
        let r = full_flcs(2, 2, |i: u32, j: u32| match (i, j) {
            (0, 0) | (1, 1) => 0.3,
            (0, 1) => 0.9,
            _ => 0.0,
        });
        assert_eq!(r.total_match, 0.9);
        assert_eq!(r.pairs().collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn no_matches() {
        let r = full_flcs(3, 4, |_: u32, _: u32| 0.0);
        assert_eq!(r.total_match, 0.0);
        assert!(r.is_empty());
    }
}
