//! Lazy Matrix March
//!
//! This crate solves the *fuzzy longest common subsequence* (FLCS) problem:
//! given two sequences of lengths `width` and `height` and a match function
//! scoring element pairs in `[0, 1]`, find the monotone alignment maximizing
//! the sum of match values.
//!
//! ## Core idea
//! Most fast LCS algorithms depend on binary equality (and often a finite
//! alphabet). Here the problem is instead treated as a best-path search through
//! a lazily evaluated `width × height` match matrix:
//! 1. Partial paths wait in a frontier ordered by an admissible upper bound on
//!    the score they can still reach.
//! 2. Each step expands the most promising one, calling the matcher at most once
//!    per cell.
//! 3. Paths that can no longer beat the best completed one are pruned.
//! 4. Once the frontier is empty, the best path is read back from the matrix.
//!
//! Worst case is O(n²) matcher calls; for mostly similar sequences it is ~O(n).
//! Memory is always O(width · height).
//!
//! ## Quick start
//! ```
//! use lazy_march::{matchers::ExactMatcher, LazyMatrixMarch};
//!
//! let a = b"ACCGGTCGAG";
//! let b = b"ACCGTTCGAG";
//! let matcher = ExactMatcher::new(a.as_slice(), b.as_slice());
//! let (w, h) = matcher.dims();
//! let result = LazyMatrixMarch::with_branch_threshold(w, h, matcher, 1.0).run();
//! assert_eq!(result.total_match, 9.0);
//! assert!(result.is_monotone());
//! ```
//!
//! ## Exactness
//! With a branch threshold of `1.0` the result is always optimal. Lower
//! thresholds (the default is `0.95`) skip branching on near-perfect matches,
//! which is a heuristic: cheaper on fuzzy inputs, but not guaranteed optimal.

pub mod builder;
pub mod frontier;
pub mod march;
pub mod matcher;
pub mod matchers;
pub mod matrix;
pub mod reference;
pub mod result;
pub mod utils;

pub use crate::builder::LazyMatrixMarchBuilder;
pub use crate::frontier::{Candidate, PrunePolicy};
pub use crate::march::{LazyMatrixMarch, MarchStats, DEFAULT_BRANCH_THRESHOLD};
pub use crate::matcher::Matcher;
pub use crate::result::{MarchResult, ResultMatch};
