//! Saturated wrapper: offset rebasing with an arithmetic audit.
//!
//! Narrow lanes saturate quickly; at every block entry the engine
//! re-centres the stored cells on the current anchor (the cell-0 best,
//! which must remain representable) and folds the anchor into the
//! cumulative offset. The audit recomputes the rebase per lane in i32 and
//! reports the first mismatch; it runs under `debug_assertions` or the
//! `audit` feature, while the recentred commit happens unconditionally.

use crate::dp::vector::DpVector;
use crate::error::{AlignError, AlignResult};
use crate::score::LaneScore;

/// Wraps a DP vector whose cells use narrow saturating lanes.
pub struct Saturated<'v, S: LaneScore> {
    vector: &'v mut DpVector<S>,
}

impl<'v, S: LaneScore> Saturated<'v, S> {
    pub fn new(vector: &'v mut DpVector<S>) -> Self {
        Self { vector }
    }

    /// Re-centre on this vector's own cell-0 anchor and return the stored
    /// anchor so a paired vector can be rebased by the same amount.
    pub fn update_offset(&mut self) -> AlignResult<S> {
        let anchor = self.vector.cell(0).best;
        self.rebase(anchor)?;
        Ok(anchor)
    }

    /// Subtract `anchor` and add the zero offset to every stored
    /// component, then advance the cumulative offsets.
    pub fn rebase(&mut self, anchor: S) -> AlignResult<()> {
        let zero = S::splat(S::ZERO_OFFSET);
        let audit = cfg!(any(debug_assertions, feature = "audit"));

        for (i, cell) in self.vector.cells_mut().iter_mut().enumerate() {
            let best = cell.best.sub(anchor).add(zero);
            let gap = cell.gap.sub(anchor).add(zero);
            if audit {
                audit_component(cell.best, anchor, best, i)?;
                // Cell 0's gap carries a write-only top-boundary chain and
                // may drift; skip it, as every read path does.
                if i > 0 {
                    audit_component(cell.gap, anchor, gap, i)?;
                }
            }
            cell.best = best;
            cell.gap = gap;
        }

        let delta: Vec<i32> = (0..S::LANES)
            .map(|k| anchor.lane(k) - S::ZERO_OFFSET)
            .collect();
        self.vector.update_offset(&delta);
        Ok(())
    }
}

/// Compare the saturated rebase of one component against an i32 recompute,
/// lane by lane.
fn audit_component<S: LaneScore>(old: S, anchor: S, narrow: S, cell: usize) -> AlignResult<()> {
    for k in 0..S::LANES {
        let wide = old.lane(k) - anchor.lane(k) + S::ZERO_OFFSET;
        let got = narrow.lane(k);
        if got != wide {
            return Err(AlignError::SaturationOverflow {
                cell,
                lane: k,
                narrow: got,
                wide,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeadingGaps;
    use crate::score::GapModel;
    use wide::i8x16;

    #[test]
    fn rebase_recentres_and_tracks_offsets() {
        let gaps = GapModel::new(-4, -1);
        let mut v: DpVector<i8x16> = DpVector::new();
        v.initialise(4, LeadingGaps::Penalize, &gaps).unwrap();

        // Anchor is cell 0's best (0 after init): a no-op rebase.
        Saturated::new(&mut v).update_offset().unwrap();
        assert_eq!(v.offsets()[0], 0);
        assert_eq!(v.absolute(3, 0), -7);

        // Shift the anchor and rebase again; true scores are unchanged.
        v.cell_mut(0).best = <i8x16 as LaneScore>::splat(-5);
        Saturated::new(&mut v).update_offset().unwrap();
        assert_eq!(v.offsets()[0], -5);
        assert_eq!(v.cell(0).best.lane(0), 0);
        assert_eq!(v.absolute(3, 0), -7);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn audit_reports_saturated_lane() {
        let gaps = GapModel::new(-4, -1);
        let mut v: DpVector<i8x16> = DpVector::new();
        v.initialise(4, LeadingGaps::Penalize, &gaps).unwrap();

        // An anchor of +125 pushes cell 1 (stored -5) past i8::MIN.
        v.cell_mut(0).best = <i8x16 as LaneScore>::splat(125);
        let err = Saturated::new(&mut v).update_offset().unwrap_err();
        match err {
            AlignError::SaturationOverflow { lane, narrow, wide, .. } => {
                assert_eq!(lane, 0);
                assert_eq!(narrow, i8::MIN as i32);
                assert!(wide < i8::MIN as i32);
            }
            other => panic!("expected saturation overflow, got {other:?}"),
        }
    }
}
