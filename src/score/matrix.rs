//! Substitution matrix with rank transformation.
//!
//! Symbols are translated once at sequence-load time through a 256-entry
//! rank table (sentinel 255 marks unmapped bytes), so every score lookup
//! in the hot loop is a dense `matrix[col_rank * DIM + row_rank]` access.
//! Rank `DIM` is reserved as the batch padding rank and scores zero
//! against everything.

use crate::error::{AlignError, AlignResult};
use crate::score::lanes::LaneScore;
use crate::score::profile::LaneProfile;

/// Rank-map sentinel for bytes outside the alphabet.
pub const RANK_SENTINEL: u8 = 255;

/// Dense `DIM x DIM` substitution matrix plus the byte-to-rank table.
///
/// Read-only after construction; safe to share across concurrent
/// `compute` calls without synchronisation.
#[derive(Clone, Debug)]
pub struct SubstitutionMatrix<const DIM: usize> {
    scores: [[i32; DIM]; DIM],
    rank_map: [u8; 256],
}

impl<const DIM: usize> SubstitutionMatrix<DIM> {
    /// Rank used for batch padding positions; its substitution row and
    /// column are implicitly zero.
    pub(crate) const PAD_RANK: u8 = DIM as u8;

    /// Build the matrix from one `(symbol, score row)` entry per rank.
    ///
    /// Rows are row-major in the column symbol: entry `i` supplies the
    /// scores of column rank `i` against every row rank.
    pub fn new(rows: [(u8, [i32; DIM]); DIM]) -> AlignResult<Self> {
        if DIM == 0 || DIM >= RANK_SENTINEL as usize {
            return Err(AlignError::InvalidConfiguration(format!(
                "alphabet dimension {DIM} out of range"
            )));
        }
        let mut rank_map = [RANK_SENTINEL; 256];
        let mut scores = [[0i32; DIM]; DIM];
        for (rank, (symbol, row)) in rows.iter().enumerate() {
            if rank_map[*symbol as usize] != RANK_SENTINEL {
                return Err(AlignError::InvalidConfiguration(format!(
                    "duplicate symbol 0x{symbol:02x} in substitution matrix"
                )));
            }
            rank_map[*symbol as usize] = rank as u8;
            scores[rank] = *row;
        }
        Ok(Self { scores, rank_map })
    }

    /// Identity-style matrix over `symbols`: `matched` on the diagonal,
    /// `mismatched` elsewhere.
    pub fn uniform(symbols: [u8; DIM], matched: i32, mismatched: i32) -> AlignResult<Self> {
        let mut rows = [(0u8, [0i32; DIM]); DIM];
        for (i, row) in rows.iter_mut().enumerate() {
            row.0 = symbols[i];
            for (j, slot) in row.1.iter_mut().enumerate() {
                *slot = if i == j { matched } else { mismatched };
            }
        }
        Self::new(rows)
    }

    /// Alphabet dimension.
    pub const fn dimension(&self) -> usize {
        DIM
    }

    /// Rank of `symbol`, or `None` for bytes outside the alphabet.
    #[inline]
    pub fn rank(&self, symbol: u8) -> Option<u8> {
        let r = self.rank_map[symbol as usize];
        (r != RANK_SENTINEL).then_some(r)
    }

    /// Score of a (column symbol, row symbol) pair.
    ///
    /// Both symbols must be in the alphabet; reject unmapped bytes with
    /// [`Self::encode`] before scoring.
    #[inline]
    pub fn score(&self, col_symbol: u8, row_symbol: u8) -> i32 {
        let c = self.rank_map[col_symbol as usize];
        let r = self.rank_map[row_symbol as usize];
        debug_assert!(c != RANK_SENTINEL && r != RANK_SENTINEL);
        self.scores[c as usize][r as usize]
    }

    /// Score lookup by rank; the pad rank scores zero against everything.
    #[inline(always)]
    pub(crate) fn score_by_rank(&self, col_rank: u8, row_rank: u8) -> i32 {
        if col_rank as usize >= DIM || row_rank as usize >= DIM {
            return 0;
        }
        self.scores[col_rank as usize][row_rank as usize]
    }

    /// Translate a raw byte sequence into ranks.
    ///
    /// `seq_index` identifies the failing sequence in the error (0 for the
    /// column sequence of a pair, 1 for the row sequence).
    pub fn encode(&self, seq: &[u8], seq_index: usize) -> AlignResult<Vec<u8>> {
        let mut ranks = Vec::with_capacity(seq.len());
        for (pos, &byte) in seq.iter().enumerate() {
            let r = self.rank_map[byte as usize];
            if r == RANK_SENTINEL {
                return Err(AlignError::InvalidSymbol {
                    byte,
                    pos,
                    seq: seq_index,
                });
            }
            ranks.push(r);
        }
        Ok(ranks)
    }

    /// Materialise the row dimension of the matrix for one lane of row
    /// symbols; at DP time the profile is indexed by the column symbol's
    /// rank alone.
    pub fn make_profile<S: LaneScore, const W: usize>(
        &self,
        row_syms: &[S::Sym],
    ) -> LaneProfile<S, W, DIM> {
        LaneProfile::build(self, row_syms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dna() -> SubstitutionMatrix<4> {
        SubstitutionMatrix::uniform(*b"ACGT", 4, -2).unwrap()
    }

    #[test]
    fn rank_map_round_trip() {
        let m = dna();
        assert_eq!(m.rank(b'A'), Some(0));
        assert_eq!(m.rank(b'T'), Some(3));
        assert_eq!(m.rank(b'X'), None);
    }

    #[test]
    fn score_lookup() {
        let m = dna();
        assert_eq!(m.score(b'A', b'A'), 4);
        assert_eq!(m.score(b'A', b'G'), -2);
        assert_eq!(m.score_by_rank(SubstitutionMatrix::<4>::PAD_RANK, 2), 0);
        assert_eq!(m.score_by_rank(1, SubstitutionMatrix::<4>::PAD_RANK), 0);
    }

    #[test]
    fn encode_rejects_unmapped_bytes() {
        let m = dna();
        assert_eq!(m.encode(b"ACGT", 0).unwrap(), vec![0, 1, 2, 3]);
        let err = m.encode(b"ACNT", 1).unwrap_err();
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
    fn duplicate_symbol_is_a_construction_failure() {
        let err = SubstitutionMatrix::<2>::new([(b'A', [1, -1]), (b'A', [-1, 1])]).unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfiguration(_)));
    }
}
