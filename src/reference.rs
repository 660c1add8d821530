//! Scalar reference scorers.
//!
//! A plain two-column Needleman–Wunsch / Smith–Waterman over the same
//! score and gap models as the vectorized engine. This is the agreement
//! oracle for the engine's tests and the recommended wide fallback when a
//! narrow-lane run reports `SaturationOverflow`.

use crate::config::{LeadingGaps, TrailingGaps};
use crate::error::AlignResult;
use crate::score::{GapModel, SubstitutionMatrix};

// Low enough to never win a max, high enough that adding gap scores
// cannot wrap.
const NEG: i32 = i32::MIN / 4;

/// Global alignment score of `seq1` against `seq2`.
pub fn global_score<const DIM: usize>(
    matrix: &SubstitutionMatrix<DIM>,
    gaps: &GapModel,
    leading: LeadingGaps,
    trailing: TrailingGaps,
    seq1: &[u8],
    seq2: &[u8],
) -> AlignResult<i32> {
    let ranks1 = matrix.encode(seq1, 0)?;
    let ranks2 = matrix.encode(seq2, 1)?;
    let n1 = ranks1.len();
    let n2 = ranks2.len();

    let boundary = |d: usize| match leading {
        LeadingGaps::Penalize => gaps.leading(d),
        LeadingGaps::Free => 0,
    };
    let first_gap = gaps.first_gap();

    // Column j = 0.
    let mut best: Vec<i32> = (0..=n1).map(boundary).collect();
    let mut hgap: Vec<i32> = vec![NEG; n1 + 1];

    let mut free_end = match trailing {
        TrailingGaps::Penalize => NEG,
        TrailingGaps::Free => best[n1],
    };

    for (j, &r2) in ranks2.iter().enumerate() {
        let mut prev_best = best[0];
        best[0] = boundary(j + 1);
        hgap[0] = (prev_best + first_gap).max(hgap[0] + gaps.extend);
        let mut vgap = NEG;
        for i in 1..=n1 {
            let diag = prev_best + matrix.score_by_rank(ranks1[i - 1], r2);
            prev_best = best[i];
            vgap = (best[i - 1] + first_gap).max(vgap + gaps.extend);
            hgap[i] = (prev_best + first_gap).max(hgap[i] + gaps.extend);
            best[i] = diag.max(vgap).max(hgap[i]);
        }
        if matches!(trailing, TrailingGaps::Free) && free_end < best[n1] {
            free_end = best[n1];
        }
    }

    match trailing {
        TrailingGaps::Penalize => Ok(best[n1]),
        TrailingGaps::Free => Ok(free_end.max(*best.iter().max().expect("non-empty column"))),
    }
}

/// Local (Smith–Waterman) alignment score of `seq1` against `seq2`.
pub fn local_score<const DIM: usize>(
    matrix: &SubstitutionMatrix<DIM>,
    gaps: &GapModel,
    seq1: &[u8],
    seq2: &[u8],
) -> AlignResult<i32> {
    let ranks1 = matrix.encode(seq1, 0)?;
    let ranks2 = matrix.encode(seq2, 1)?;
    let n1 = ranks1.len();

    let first_gap = gaps.first_gap();
    let mut best: Vec<i32> = vec![0; n1 + 1];
    let mut hgap: Vec<i32> = vec![NEG; n1 + 1];
    let mut max_score = 0;

    for &r2 in &ranks2 {
        let mut prev_best = best[0];
        let mut vgap = NEG;
        hgap[0] = (prev_best + first_gap).max(hgap[0] + gaps.extend);
        for i in 1..=n1 {
            let diag = prev_best + matrix.score_by_rank(ranks1[i - 1], r2);
            prev_best = best[i];
            vgap = (best[i - 1] + first_gap).max(vgap + gaps.extend);
            hgap[i] = (prev_best + first_gap).max(hgap[i] + gaps.extend);
            best[i] = diag.max(vgap).max(hgap[i]).max(0);
            if best[i] > max_score {
                max_score = best[i];
            }
        }
    }
    Ok(max_score)
}
