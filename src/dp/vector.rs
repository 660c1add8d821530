//! DP vectors: the per-axis cell stores.
//!
//! A vector owns `|sequence| + 1` cells plus one cumulative offset per
//! lane. The invariant for every stored component `v` of cell `i` is
//! `v = true_score - offset + zero_offset`; plain (non-rebased) score
//! types keep the offset at zero for the whole run.

use crate::config::LeadingGaps;
use crate::dp::cell::AffineCell;
use crate::error::{AlignError, AlignResult};
use crate::score::{GapModel, LaneScore};

/// Cell store for one matrix axis.
#[derive(Clone, Debug)]
pub struct DpVector<S: LaneScore> {
    cells: Vec<AffineCell<S>>,
    offsets: Vec<i32>,
}

impl<S: LaneScore> DpVector<S> {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            offsets: vec![0; S::LANES],
        }
    }

    /// Resize to `seq_len + 1` cells and apply the leading-gap rule; cell
    /// index is axis distance. The stored `gap` component is the boundary
    /// chain already extended into the first column.
    ///
    /// Narrow lanes reject boundary values outside the lane range up
    /// front; the run would otherwise start from silently clamped cells.
    pub fn initialise(
        &mut self,
        seq_len: usize,
        leading: LeadingGaps,
        gaps: &GapModel,
    ) -> AlignResult<()> {
        self.cells.clear();
        self.cells.reserve(seq_len + 1);
        self.offsets.iter_mut().for_each(|o| *o = 0);

        let first_gap = gaps.first_gap();
        for d in 0..=seq_len {
            let base = match leading {
                LeadingGaps::Penalize => gaps.leading(d),
                LeadingGaps::Free => 0,
            };
            if S::NEEDS_REBASE {
                for value in [base, base + first_gap] {
                    let stored = value + S::ZERO_OFFSET;
                    if stored < S::MIN_SCORE || stored > S::MAX_SCORE {
                        return Err(AlignError::SaturationOverflow {
                            cell: d,
                            lane: 0,
                            narrow: stored.clamp(S::MIN_SCORE, S::MAX_SCORE),
                            wide: stored,
                        });
                    }
                }
            }
            self.cells.push(AffineCell {
                best: S::splat(base + S::ZERO_OFFSET),
                gap: S::splat(base + first_gap + S::ZERO_OFFSET),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    pub fn cell(&self, i: usize) -> &AffineCell<S> {
        &self.cells[i]
    }

    #[inline(always)]
    pub fn cell_mut(&mut self, i: usize) -> &mut AffineCell<S> {
        &mut self.cells[i]
    }

    #[inline]
    pub fn last(&self) -> &AffineCell<S> {
        self.cells.last().expect("DP vector is never empty")
    }

    /// Cumulative per-lane offsets.
    #[inline]
    pub fn offsets(&self) -> &[i32] {
        &self.offsets
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [AffineCell<S>] {
        &mut self.cells
    }

    /// Fold a rebase delta into the cumulative offsets. Only the saturated
    /// wrapper calls this.
    pub(crate) fn update_offset(&mut self, delta: &[i32]) {
        for (o, d) in self.offsets.iter_mut().zip(delta) {
            *o += d;
        }
    }

    /// True score of cell `i`'s best component in lane `k`.
    #[inline]
    pub fn absolute(&self, i: usize, k: usize) -> i32 {
        self.cells[i].best.lane(k) - S::ZERO_OFFSET + self.offsets[k]
    }
}

impl<S: LaneScore> Default for DpVector<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affine_initialisation() {
        let gaps = GapModel::new(-10, -1);
        let mut v: DpVector<i32> = DpVector::new();
        v.initialise(3, LeadingGaps::Penalize, &gaps).unwrap();
        assert_eq!(v.len(), 4);
        assert_eq!(v.cell(0).best, 0);
        assert_eq!(v.cell(0).gap, -11);
        assert_eq!(v.cell(2).best, -12);
        assert_eq!(v.cell(2).gap, -23);
    }

    #[test]
    fn free_shift_initialisation_zeroes_leading_cells() {
        let gaps = GapModel::new(-10, -1);
        let mut v: DpVector<i32> = DpVector::new();
        v.initialise(5, LeadingGaps::Free, &gaps).unwrap();
        for d in 0..=5 {
            assert_eq!(v.cell(d).best, 0);
            assert_eq!(v.cell(d).gap, -11);
        }
    }

    #[test]
    fn narrow_initialisation_rejects_unrepresentable_boundary() {
        let gaps = GapModel::new(-10, -1);
        let mut v: DpVector<wide::i8x16> = DpVector::new();
        // d = 200 gives -210, far past i8::MIN.
        let err = v.initialise(200, LeadingGaps::Penalize, &gaps).unwrap_err();
        assert!(matches!(err, AlignError::SaturationOverflow { .. }));
        // Free-shift boundaries always fit.
        v.initialise(200, LeadingGaps::Free, &gaps).unwrap();
    }
}
