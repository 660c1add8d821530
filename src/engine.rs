//! Engine construction and the interface driver.
//!
//! The driver owns the orchestration: encode and bundle the sequences,
//! initialise both DP vectors, walk the matrix in column blocks (rebasing
//! narrow lanes on every block entry), tile each block into row lanes, and
//! sweep every column of a lane through the kernel. Results come from the
//! tracker; per-lane scores are read at each lane's own matrix corner so a
//! batch of unequal-length pairs reports the same scores as one-at-a-time
//! scalar runs.

use std::marker::PhantomData;

use crate::config::{LeadingGaps, TrailingGaps, DEFAULT_BLOCK_WIDTH};
use crate::dp::{DpVector, RowLane, Saturated};
use crate::error::{AlignError, AlignResult};
use crate::kernel::AffineKernel;
use crate::score::{GapModel, LaneScore, SubstitutionMatrix};
use crate::tracker::{Method, ScoreTracker};

/// Rank-transformed sequences for one DP run, one rank per lane per
/// position. Shorter lane sequences and unused lanes are padded with the
/// pad rank, which scores zero against everything.
#[derive(Clone, Debug)]
struct SeqBundle<S: LaneScore> {
    syms: Vec<S::Sym>,
    lens: Vec<usize>,
    max_len: usize,
}

impl<S: LaneScore> SeqBundle<S> {
    fn encode<const DIM: usize>(
        matrix: &SubstitutionMatrix<DIM>,
        seqs: &[&[u8]],
        seq_index: usize,
    ) -> AlignResult<Self> {
        debug_assert!(!seqs.is_empty() && seqs.len() <= S::LANES);
        let pad = SubstitutionMatrix::<DIM>::PAD_RANK;

        let mut ranks: Vec<Vec<u8>> = Vec::with_capacity(seqs.len());
        for seq in seqs {
            ranks.push(matrix.encode(seq, seq_index)?);
        }
        let max_len = ranks.iter().map(Vec::len).max().unwrap_or(0);
        let mut lens = vec![0usize; S::LANES];
        for (k, r) in ranks.iter().enumerate() {
            lens[k] = r.len();
        }
        let mut syms = Vec::with_capacity(max_len);
        for pos in 0..max_len {
            syms.push(S::sym_from_fn(|k| {
                ranks
                    .get(k)
                    .and_then(|r| r.get(pos))
                    .copied()
                    .unwrap_or(pad)
            }));
        }
        Ok(Self {
            syms,
            lens,
            max_len,
        })
    }

    #[inline(always)]
    fn sym(&self, pos: usize) -> S::Sym {
        self.syms[pos]
    }

    #[inline]
    fn len_of(&self, k: usize) -> usize {
        self.lens[k]
    }
}

/// Builder over the runtime configuration; `build` validates and returns
/// the concrete engine. Score type, lane width and method are chosen at
/// the `build` call and become part of the engine's type.
#[derive(Clone, Debug)]
pub struct AlignerBuilder<const DIM: usize> {
    matrix: SubstitutionMatrix<DIM>,
    gaps: GapModel,
    leading: LeadingGaps,
    trailing: TrailingGaps,
    block_width: usize,
}

impl<const DIM: usize> AlignerBuilder<DIM> {
    pub fn new(matrix: SubstitutionMatrix<DIM>, gaps: GapModel) -> Self {
        Self {
            matrix,
            gaps,
            leading: LeadingGaps::default(),
            trailing: TrailingGaps::default(),
            block_width: DEFAULT_BLOCK_WIDTH,
        }
    }

    pub fn leading(mut self, leading: LeadingGaps) -> Self {
        self.leading = leading;
        self
    }

    pub fn trailing(mut self, trailing: TrailingGaps) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn block_width(mut self, block_width: usize) -> Self {
        self.block_width = block_width;
        self
    }

    pub fn build<S: LaneScore, M: Method, const W: usize>(
        self,
    ) -> AlignResult<Aligner<S, M, DIM, W>> {
        if self.block_width == 0 {
            return Err(AlignError::InvalidConfiguration(
                "block width must be at least one column".into(),
            ));
        }
        if W == 0 {
            return Err(AlignError::InvalidConfiguration(
                "lane width must be at least one column".into(),
            ));
        }
        Ok(Aligner {
            matrix: self.matrix,
            gaps: self.gaps,
            leading: self.leading,
            trailing: self.trailing,
            block_width: self.block_width,
            _score: PhantomData,
            _method: PhantomData,
        })
    }
}

/// The alignment engine. `S` is the score element (scalar or SIMD lanes),
/// `M` the method marker ([`crate::tracker::Global`] or
/// [`crate::tracker::Local`]), `DIM` the alphabet dimension and `W` the
/// lane width.
///
/// An engine holds no mutable state: every `compute` call owns its
/// vectors exclusively, so independent calls may run on independent
/// threads over one shared engine.
#[derive(Clone, Debug)]
pub struct Aligner<S: LaneScore, M: Method, const DIM: usize, const W: usize = 8> {
    matrix: SubstitutionMatrix<DIM>,
    gaps: GapModel,
    leading: LeadingGaps,
    trailing: TrailingGaps,
    block_width: usize,
    _score: PhantomData<S>,
    _method: PhantomData<M>,
}

impl<S: LaneScore, M: Method, const DIM: usize, const W: usize> Aligner<S, M, DIM, W> {
    /// Align one pair. With a SIMD score type this occupies a single lane;
    /// use [`Self::align_all`] to fill the lanes.
    pub fn compute(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<i32> {
        Ok(self.compute_lanes(&[(seq1, seq2)])?[0])
    }

    /// Align up to `S::LANES` pairs in one DP run. Returns one score per
    /// lane; lanes past the batch report the sentinel
    /// (`S::MIN_SCORE`).
    pub fn compute_lanes(&self, pairs: &[(&[u8], &[u8])]) -> AlignResult<Vec<i32>> {
        if pairs.is_empty() {
            return Err(AlignError::EmptySequence);
        }
        if pairs.len() > S::LANES {
            return Err(AlignError::InvalidConfiguration(format!(
                "batch of {} pairs exceeds {} lanes",
                pairs.len(),
                S::LANES
            )));
        }
        let seq1s: Vec<&[u8]> = pairs.iter().map(|p| p.0).collect();
        let seq2s: Vec<&[u8]> = pairs.iter().map(|p| p.1).collect();
        let b1 = SeqBundle::<S>::encode(&self.matrix, &seq1s, 0)?;
        let b2 = SeqBundle::<S>::encode(&self.matrix, &seq2s, 1)?;

        let leading = self.effective_leading();
        let mut column = DpVector::new();
        column.initialise(b1.max_len, leading, &self.gaps)?;
        let mut row = DpVector::new();
        row.initialise(b2.max_len, leading, &self.gaps)?;

        self.run(&b1, &b2, &mut column, &mut row, pairs.len())
    }

    /// Align an arbitrary list of pairs, chunking them into lane-sized
    /// bundles. Scores come back in input order.
    pub fn align_all(&self, pairs: &[(&[u8], &[u8])]) -> AlignResult<Vec<i32>> {
        if pairs.is_empty() {
            return Err(AlignError::EmptySequence);
        }
        let mut out = Vec::with_capacity(pairs.len());
        for chunk in pairs.chunks(S::LANES) {
            let lanes = self.compute_lanes(chunk)?;
            out.extend_from_slice(&lanes[..chunk.len()]);
        }
        Ok(out)
    }

    /// Parallel [`Self::align_all`]: one rayon task per lane bundle.
    #[cfg(feature = "parallel")]
    pub fn align_all_parallel(&self, pairs: &[(&[u8], &[u8])]) -> AlignResult<Vec<i32>> {
        use rayon::prelude::*;

        if pairs.is_empty() {
            return Err(AlignError::EmptySequence);
        }
        let chunks: Vec<AlignResult<Vec<i32>>> = pairs
            .par_chunks(S::LANES)
            .map(|chunk| Ok(self.compute_lanes(chunk)?[..chunk.len()].to_vec()))
            .collect();
        let mut out = Vec::with_capacity(pairs.len());
        for chunk in chunks {
            out.extend(chunk?);
        }
        Ok(out)
    }

    /// Align one pair continuing from caller-supplied vectors (chaining).
    /// The vectors must match the sequence lengths; initialisation is
    /// skipped and the supplied boundary state is used as-is.
    pub fn compute_with_vectors(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        column: &mut DpVector<S>,
        row: &mut DpVector<S>,
    ) -> AlignResult<i32> {
        let b1 = SeqBundle::<S>::encode(&self.matrix, &[seq1], 0)?;
        let b2 = SeqBundle::<S>::encode(&self.matrix, &[seq2], 1)?;
        if column.len() != b1.max_len + 1 || row.len() != b2.max_len + 1 {
            return Err(AlignError::InvalidConfiguration(
                "supplied vectors do not match the sequence lengths".into(),
            ));
        }
        Ok(self.run(&b1, &b2, column, row, 1)?[0])
    }

    fn effective_leading(&self) -> LeadingGaps {
        if M::LOCAL {
            LeadingGaps::Free
        } else {
            self.leading
        }
    }

    /// Record the global-result candidates that become visible once
    /// column `col_j` has been fully swept (the column vector then holds
    /// that matrix column for every row).
    fn capture_column(
        &self,
        col_j: usize,
        column: &DpVector<S>,
        corners: &[(usize, usize)],
        tracker: &mut ScoreTracker<S>,
    ) {
        for (k, &(corner_row, corner_col)) in corners.iter().enumerate() {
            if col_j > corner_col {
                continue;
            }
            match self.trailing {
                TrailingGaps::Penalize => {
                    if col_j == corner_col {
                        tracker.record(k, column.absolute(corner_row, k));
                    }
                }
                TrailingGaps::Free => {
                    tracker.record(k, column.absolute(corner_row, k));
                    if col_j == corner_col {
                        for i in 0..=corner_row {
                            tracker.record(k, column.absolute(i, k));
                        }
                    }
                }
            }
        }
    }

    fn run(
        &self,
        b1: &SeqBundle<S>,
        b2: &SeqBundle<S>,
        column: &mut DpVector<S>,
        row: &mut DpVector<S>,
        active: usize,
    ) -> AlignResult<Vec<i32>> {
        let n_cols = row.len() - 1;
        let mut kernel = AffineKernel::<S, M>::new(&self.gaps);
        let mut tracker = if M::LOCAL {
            ScoreTracker::<S>::local()
        } else {
            ScoreTracker::<S>::global()
        };

        let corners: Vec<(usize, usize)> = (0..active)
            .map(|k| (b1.len_of(k), b2.len_of(k)))
            .collect();

        // Column 0 is the initialised boundary; it is the only column a
        // lane with an empty row sequence ever sees.
        if !M::LOCAL {
            self.capture_column(0, column, &corners, &mut tracker);
        }

        let mut j = 1usize;
        while j <= n_cols {
            let block_end = (j + self.block_width - 1).min(n_cols);
            if S::NEEDS_REBASE {
                let anchor = Saturated::new(column).update_offset()?;
                Saturated::new(row).rebase(anchor)?;
            }
            let offsets = row.offsets().to_vec();
            kernel.set_offsets(&offsets);
            let mut block_best = S::splat(S::MIN_SCORE);

            let mut r = j - 1;
            while r < block_end {
                let mut lane =
                    RowLane::<S, W, DIM>::enter(row, r, block_end - r, &self.matrix, &b2.syms);
                let lane_len = lane.len();
                for w in 0..lane_len {
                    let mut cache = kernel.begin_column(lane.cell_mut(w), column.cell_mut(0));
                    for i in 1..column.len() {
                        let sub = lane.score(w, b1.sym(i - 1));
                        let committed = kernel.compute_cell(&mut cache, column.cell_mut(i), sub);
                        if M::LOCAL {
                            block_best = block_best.max(committed);
                        }
                    }
                    kernel.end_column(lane.cell_mut(w), column.last(), cache);
                    if !M::LOCAL {
                        self.capture_column(r + 1 + w, column, &corners, &mut tracker);
                    }
                }
                drop(lane);
                r += lane_len;
            }

            if M::LOCAL {
                tracker.record_block(block_best, &offsets);
            }
            j = block_end + 1;
        }

        tracker.mark_unused(active);
        Ok(tracker.scores().to_vec())
    }
}
