//! Dense, lazily populated per-cell state for the march.
//!
//! Every cell of the `width × height` lattice has one [`EvalMatch`]. The table
//! is allocated once and mutated in place; nothing is freed until the owning
//! march is dropped.

use crate::utils::Lattice;

/// Sentinel for "matcher not called yet" and "no path reached this cell".
pub const UNSET: f32 = -1.0;

/// State of one lattice cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalMatch {
    /// Matcher result for this cell, [`UNSET`] until evaluated. Evaluated at most once.
    pub eval: f32,
    /// Highest score of any expanded path arriving at this cell, not counting
    /// this cell's own `eval`. [`UNSET`] until first reached; never decreases.
    pub best: f32,
}

impl Default for EvalMatch {
    fn default() -> Self {
        Self {
            eval: UNSET,
            best: UNSET,
        }
    }
}

impl EvalMatch {
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.eval >= 0.0
    }

    #[inline]
    pub fn is_reached(&self) -> bool {
        self.best >= 0.0
    }
}

/// Flat `width * height` table of [`EvalMatch`], row-major in `i`.
#[derive(Debug, Clone)]
pub struct MatchMatrix {
    lattice: Lattice,
    cells: Vec<EvalMatch>,
}

impl MatchMatrix {
    pub fn new(lattice: Lattice) -> Self {
        Self {
            lattice,
            cells: vec![EvalMatch::default(); lattice.cells()],
        }
    }

    #[inline]
    fn index(&self, i: u32, j: u32) -> usize {
        debug_assert!(
            self.lattice.contains(i, j),
            "cell ({i}, {j}) outside {}x{} lattice",
            self.lattice.width,
            self.lattice.height
        );
        i as usize * self.lattice.height as usize + j as usize
    }

    /// Cell state at `(i, j)`. Indices are caller-checked.
    #[inline]
    pub fn cell(&self, i: u32, j: u32) -> &EvalMatch {
        &self.cells[self.index(i, j)]
    }

    #[inline]
    pub fn cell_mut(&mut self, i: u32, j: u32) -> &mut EvalMatch {
        let idx = self.index(i, j);
        &mut self.cells[idx]
    }

    /// Number of cells whose matcher value has been computed.
    pub fn evaluated(&self) -> usize {
        self.cells.iter().filter(|c| c.is_evaluated()).count()
    }
}
