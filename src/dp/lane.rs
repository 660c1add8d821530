//! Row lanes: scoped caches over `W` consecutive row cells.
//!
//! A lane copies its row cells into a stack array on entry and builds the
//! row profile for its symbols; the kernel then reads and writes the stack
//! copy only. Write-back to the row vector happens in `Drop`, so it runs
//! on every exit path, and exactly once, after all cells of the lane have
//! been committed.

use crate::dp::cell::AffineCell;
use crate::dp::vector::DpVector;
use crate::score::{LaneProfile, LaneScore, SubstitutionMatrix};

/// Stack-cached window over row cells `[row_offset + 1, row_offset + 1 + W)`,
/// with the row profile for the same window.
pub struct RowLane<'r, S: LaneScore, const W: usize, const DIM: usize> {
    row: &'r mut DpVector<S>,
    cached: [AffineCell<S>; W],
    profile: LaneProfile<S, W, DIM>,
    start: usize,
    live: usize,
}

impl<'r, S: LaneScore, const W: usize, const DIM: usize> RowLane<'r, S, W, DIM> {
    /// Acquire the lane at `row_offset`, copying at most `max_cols` cells
    /// (the final lane of a block is shorter than `W`).
    pub fn enter(
        row: &'r mut DpVector<S>,
        row_offset: usize,
        max_cols: usize,
        matrix: &SubstitutionMatrix<DIM>,
        row_syms: &[S::Sym],
    ) -> Self {
        let start = row_offset + 1;
        let live = W.min(max_cols).min(row.len() - start);
        let mut cached = [AffineCell {
            best: S::splat(0),
            gap: S::splat(0),
        }; W];
        for (w, slot) in cached.iter_mut().enumerate().take(live) {
            *slot = *row.cell(start + w);
        }
        let profile = matrix.make_profile::<S, W>(&row_syms[start - 1..start - 1 + live]);
        Self {
            row,
            cached,
            profile,
            start,
            live,
        }
    }

    /// Number of live columns in this lane.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline(always)]
    pub fn cell_mut(&mut self, w: usize) -> &mut AffineCell<S> {
        &mut self.cached[w]
    }

    /// Profile score for lane column `w` against the column symbol ranks.
    #[inline(always)]
    pub fn score(&self, w: usize, col_sym: S::Sym) -> S {
        self.profile.score(w, col_sym)
    }
}

impl<S: LaneScore, const W: usize, const DIM: usize> Drop for RowLane<'_, S, W, DIM> {
    fn drop(&mut self) {
        for w in 0..self.live {
            *self.row.cell_mut(self.start + w) = self.cached[w];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeadingGaps;
    use crate::score::GapModel;

    #[test]
    fn lane_writes_back_on_drop() {
        let matrix = SubstitutionMatrix::<4>::uniform(*b"ACGT", 4, -2).unwrap();
        let gaps = GapModel::new(-10, -1);
        let mut row: DpVector<i32> = DpVector::new();
        row.initialise(6, LeadingGaps::Penalize, &gaps).unwrap();
        let syms: Vec<u8> = matrix.encode(b"ACGTAC", 1).unwrap();

        {
            let mut lane: RowLane<'_, i32, 4, 4> =
                RowLane::enter(&mut row, 0, usize::MAX, &matrix, &syms);
            assert_eq!(lane.len(), 4);
            lane.cell_mut(2).best = 99;
        }
        assert_eq!(row.cell(3).best, 99);
        // Cells outside the lane are untouched.
        assert_eq!(row.cell(5).best, -15);
    }

    #[test]
    fn final_lane_is_partial() {
        let matrix = SubstitutionMatrix::<4>::uniform(*b"ACGT", 4, -2).unwrap();
        let gaps = GapModel::new(-10, -1);
        let mut row: DpVector<i32> = DpVector::new();
        row.initialise(5, LeadingGaps::Penalize, &gaps).unwrap();
        let syms: Vec<u8> = matrix.encode(b"ACGTA", 1).unwrap();

        let lane: RowLane<'_, i32, 4, 4> =
            RowLane::enter(&mut row, 4, usize::MAX, &matrix, &syms);
        assert_eq!(lane.len(), 1);
    }
}
