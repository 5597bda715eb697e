//! The match-function seam.
//!
//! [`LazyMatrixMarch`](crate::LazyMatrixMarch) never sees the sequences it
//! aligns. Everything it knows about them comes through a [`Matcher`], which
//! scores how well element `i` of the first sequence corresponds to element `j`
//! of the second.

/// Scores a single lattice cell.
///
/// Contract:
/// - Returns a value in `[0, 1]`: `0` means "no match", anything `> 0` is a
///   match of that quality.
/// - Must be total over `[0, width) × [0, height)`.
/// - Is called at most once per `(i, j)`; the march memoizes the result, so an
///   implementation may be expensive or keep idempotent side effects (counters,
///   caches).
///
/// A panic inside `score` unwinds through `step`/`run` unchanged.
///
/// Any `FnMut(u32, u32) -> f32` closure is a `Matcher`.
pub trait Matcher {
    fn score(&mut self, i: u32, j: u32) -> f32;
}

impl<F> Matcher for F
where
    F: FnMut(u32, u32) -> f32,
{
    #[inline]
    fn score(&mut self, i: u32, j: u32) -> f32 {
        self(i, j)
    }
}
