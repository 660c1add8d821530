//! End-to-end golden scenarios: ACGT alphabet, match +4 / mismatch -2,
//! gap open -10 / extend -1, global with penalised trailing gaps unless
//! stated otherwise. Goldens were frozen from the scalar reference
//! scorer.

use simd_pairwise::tracker::{Global, Local};
use simd_pairwise::{
    AlignError, AlignerBuilder, GapModel, LeadingGaps, SubstitutionMatrix, TrailingGaps,
};

fn dna() -> SubstitutionMatrix<4> {
    SubstitutionMatrix::uniform(*b"ACGT", 4, -2).unwrap()
}

fn gaps() -> GapModel {
    GapModel::new(-10, -1)
}

#[test]
fn perfect_match_scores_all_matches() {
    let aligner = AlignerBuilder::new(dna(), gaps())
        .build::<i32, Global, 8>()
        .unwrap();
    assert_eq!(aligner.compute(b"GATTACA", b"GATTACA").unwrap(), 28);
}

#[test]
fn single_deletion_pays_one_gap() {
    let aligner = AlignerBuilder::new(dna(), gaps())
        .build::<i32, Global, 8>()
        .unwrap();
    // Six matches minus one gap of length one: 24 - 11.
    assert_eq!(aligner.compute(b"GATTACA", b"GATACA").unwrap(), 13);
}

#[test]
fn all_mismatches() {
    let aligner = AlignerBuilder::new(dna(), gaps())
        .build::<i32, Global, 8>()
        .unwrap();
    assert_eq!(aligner.compute(b"AAAA", b"TTTT").unwrap(), -8);
}

#[test]
fn empty_row_sequence_is_one_long_gap() {
    let aligner = AlignerBuilder::new(dna(), gaps())
        .build::<i32, Global, 8>()
        .unwrap();
    assert_eq!(aligner.compute(b"ACGT", b"").unwrap(), -14);
    assert_eq!(aligner.compute(b"", b"ACGT").unwrap(), -14);
    assert_eq!(aligner.compute(b"", b"").unwrap(), 0);
}

#[test]
fn free_trailing_gaps_zero_the_empty_case() {
    let aligner = AlignerBuilder::new(dna(), gaps())
        .trailing(TrailingGaps::Free)
        .build::<i32, Global, 8>()
        .unwrap();
    assert_eq!(aligner.compute(b"", b"ACGT").unwrap(), 0);
}

#[test]
fn local_recovers_embedded_match() {
    let matrix = SubstitutionMatrix::<5>::uniform(*b"ACGTX", 4, -2).unwrap();
    let aligner = AlignerBuilder::new(matrix, gaps())
        .build::<i32, Local, 8>()
        .unwrap();
    assert_eq!(aligner.compute(b"XXGATTACAXX", b"GATTACA").unwrap(), 28);
}

#[test]
fn simd_batch_of_identical_pairs() {
    let aligner = AlignerBuilder::new(dna(), gaps())
        .build::<wide::i16x8, Global, 8>()
        .unwrap();
    let seq: &[u8] = b"GATTACA";
    let pairs = vec![(seq, seq); 4];
    let lanes = aligner.compute_lanes(&pairs).unwrap();
    assert_eq!(&lanes[..4], &[28, 28, 28, 28]);
    // Unused lanes report the sentinel.
    for &score in &lanes[4..] {
        assert_eq!(score, i16::MIN as i32);
    }
}

#[test]
fn invalid_symbol_is_rejected_with_position() {
    let aligner = AlignerBuilder::new(dna(), gaps())
        .build::<i32, Global, 8>()
        .unwrap();
    let err = aligner.compute(b"ACGT", b"ACNT").unwrap_err();
    assert_eq!(
        err,
        AlignError::InvalidSymbol {
            byte: b'N',
            pos: 2,
            seq: 1
        }
    );
}

#[test]
fn free_leading_gaps_allow_unpenalized_prefix() {
    // Overlap-style: the reference prefix is skipped for free.
    let aligner = AlignerBuilder::new(dna(), gaps())
        .leading(LeadingGaps::Free)
        .trailing(TrailingGaps::Free)
        .build::<i32, Global, 8>()
        .unwrap();
    assert_eq!(aligner.compute(b"TTTTACGT", b"ACGT").unwrap(), 16);
}
