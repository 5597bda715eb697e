//! Ready-made [`Matcher`]s over a pair of slices.
//!
//! The march itself only ever sees `(i, j)` indices; these adapters close over
//! two sequences and turn element comparisons into match values.

use crate::Matcher;

/// `1.0` where the elements are equal, `0.0` elsewhere.
///
/// With a branch threshold of `1.0` this turns the march into classic LCS.
#[derive(Debug)]
pub struct ExactMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
}

impl<T> Clone for ExactMatcher<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ExactMatcher<'_, T> {}

impl<'a, T: PartialEq> ExactMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self { a, b }
    }

    /// `(width, height)` for a march over these sequences.
    pub fn dims(&self) -> (u32, u32) {
        (self.a.len() as u32, self.b.len() as u32)
    }
}

impl<T: PartialEq> Matcher for ExactMatcher<'_, T> {
    #[inline]
    fn score(&mut self, i: u32, j: u32) -> f32 {
        if self.a[i as usize] == self.b[j as usize] {
            1.0
        } else {
            0.0
        }
    }
}

/// Caller-scored element similarity, clamped into `[0, 1]`.
///
/// NaN scores count as no match.
pub struct ScoredMatcher<'a, T, F> {
    a: &'a [T],
    b: &'a [T],
    similarity: F,
}

impl<'a, T, F> ScoredMatcher<'a, T, F>
where
    F: FnMut(&T, &T) -> f32,
{
    pub fn new(a: &'a [T], b: &'a [T], similarity: F) -> Self {
        Self { a, b, similarity }
    }

    pub fn dims(&self) -> (u32, u32) {
        (self.a.len() as u32, self.b.len() as u32)
    }
}

impl<T, F> Matcher for ScoredMatcher<'_, T, F>
where
    F: FnMut(&T, &T) -> f32,
{
    #[inline]
    fn score(&mut self, i: u32, j: u32) -> f32 {
        let v = (self.similarity)(&self.a[i as usize], &self.b[j as usize]);
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    }
}
