//! Affine DP kernel.
//!
//! One `(diag, gap)` cache pair carries the diagonal and the in-sweep gap
//! chain down a column; stored cells carry the best score and the
//! cross-column gap chain, the latter already extended into the next
//! column. The commit order is load-bearing: the cell's best is committed
//! before either gap carry is refreshed, because both refreshed carries
//! open from the just-committed value.

use std::marker::PhantomData;

use crate::dp::AffineCell;
use crate::score::{GapModel, LaneScore};
use crate::tracker::Method;

/// Per-column carry: `diag` is the diagonal input for the next cell,
/// `gap` the open-extend chain running with the sweep.
#[derive(Clone, Copy, Debug)]
pub struct ColumnCache<S> {
    pub diag: S,
    pub gap: S,
}

/// The per-cell recurrence with its gap constants pre-broadcast.
#[derive(Clone, Debug)]
pub struct AffineKernel<S, M> {
    open: S,
    extend: S,
    first_gap: S,
    floor: S,
    _method: PhantomData<M>,
}

impl<S: LaneScore, M: Method> AffineKernel<S, M> {
    pub fn new(gaps: &GapModel) -> Self {
        Self {
            open: S::splat(gaps.open),
            extend: S::splat(gaps.extend),
            first_gap: S::splat(gaps.first_gap()),
            floor: S::splat(S::ZERO_OFFSET),
            _method: PhantomData,
        }
    }

    /// Refresh the local clamp floor (absolute zero in stored space) after
    /// an offset change. A no-op for global alignment.
    pub fn set_offsets(&mut self, offsets: &[i32]) {
        if M::LOCAL {
            self.floor = S::from_fn(|k| S::ZERO_OFFSET - offsets[k]);
        }
    }

    /// Start a column: capture the carry pair and roll the top boundary
    /// cell forward from the row vector.
    #[inline(always)]
    pub fn begin_column(
        &self,
        row_cell: &mut AffineCell<S>,
        col0: &mut AffineCell<S>,
    ) -> ColumnCache<S> {
        let cache = ColumnCache {
            diag: col0.best,
            gap: row_cell.gap,
        };
        col0.best = row_cell.best;
        col0.gap = cache.diag.add(self.open).max(col0.gap.add(self.extend));
        cache
    }

    /// The hot per-cell recurrence. Returns the committed best so local
    /// tracking can fold it into the running block maximum.
    #[inline(always)]
    pub fn compute_cell(
        &self,
        cache: &mut ColumnCache<S>,
        cell: &mut AffineCell<S>,
        sub: S,
    ) -> S {
        let next_diag = cell.best;
        let crossing = cell.gap;
        let mut best = cache.diag.add(sub);
        best = best.max(cache.gap).max(crossing);
        let best = M::clamp(best, self.floor);
        cell.best = best;
        let opened = best.add(self.first_gap);
        cache.gap = cache.gap.add(self.extend).max(opened);
        cell.gap = crossing.add(self.extend).max(opened);
        cache.diag = next_diag;
        best
    }

    /// Publish the bottom of the column back into the row vector.
    #[inline(always)]
    pub fn end_column(
        &self,
        row_cell: &mut AffineCell<S>,
        col_last: &AffineCell<S>,
        cache: ColumnCache<S>,
    ) {
        row_cell.best = col_last.best;
        row_cell.gap = cache.gap;
    }
}
