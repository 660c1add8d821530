//! Row profile for a lane.
//!
//! Pre-hoists the row dimension of the substitution matrix out of the hot
//! loop: for each of the `W` row symbols cached by a lane, the profile
//! holds the full column-rank-indexed score vector, so the per-cell lookup
//! is a single-index gather by the column symbol's rank.

use crate::score::lanes::LaneScore;
use crate::score::matrix::SubstitutionMatrix;

/// `W` column-rank-indexed score vectors, one per row symbol of the lane.
#[derive(Clone, Copy, Debug)]
pub struct LaneProfile<S, const W: usize, const DIM: usize> {
    rows: [[S; DIM]; W],
}

impl<S: LaneScore, const W: usize, const DIM: usize> LaneProfile<S, W, DIM> {
    /// Build the profile from the lane's row symbols. A short slice (the
    /// final partial lane) leaves the tail rows at zero; they are never
    /// read.
    pub(crate) fn build(matrix: &SubstitutionMatrix<DIM>, row_syms: &[S::Sym]) -> Self {
        debug_assert!(row_syms.len() <= W);
        let mut rows = [[S::splat(0); DIM]; W];
        for (w, sym) in row_syms.iter().enumerate() {
            for (c, slot) in rows[w].iter_mut().enumerate() {
                *slot = S::from_fn(|k| matrix.score_by_rank(c as u8, S::sym_lane(*sym, k)));
            }
        }
        Self { rows }
    }

    /// Substitution score vector for row position `w` of the lane against
    /// the given column symbol ranks. Pad ranks score zero.
    #[inline(always)]
    pub(crate) fn score(&self, w: usize, col_sym: S::Sym) -> S {
        let row = &self.rows[w];
        S::from_fn(|k| {
            let c = S::sym_lane(col_sym, k) as usize;
            if c < DIM {
                row[c].lane(k)
            } else {
                0
            }
        })
    }
}
