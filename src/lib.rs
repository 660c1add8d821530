//! SIMD lane-parallel pairwise sequence alignment.
//!
//! A vectorized affine-gap dynamic-programming engine that scores global
//! or local alignments under a user-supplied substitution matrix. The
//! score element type is generic: plain `i32` for scalar runs, or narrow
//! saturating SIMD lanes (`wide::i8x16`, `wide::i16x8`, `wide::i16x16`)
//! that align one independent sequence pair per lane, re-centred block by
//! block with an audited offset rebase.
//!
//! ```
//! use simd_pairwise::{AlignerBuilder, GapModel, SubstitutionMatrix};
//! use simd_pairwise::tracker::Global;
//!
//! let matrix = SubstitutionMatrix::<4>::uniform(*b"ACGT", 4, -2)?;
//! let aligner = AlignerBuilder::new(matrix, GapModel::new(-10, -1))
//!     .build::<i32, Global, 8>()?;
//! assert_eq!(aligner.compute(b"GATTACA", b"GATTACA")?, 28);
//! # Ok::<(), simd_pairwise::AlignError>(())
//! ```

pub mod config;
pub mod dp;
pub mod engine;
pub mod error;
pub mod kernel;
pub mod reference; // scalar oracle; also the wide fallback on saturation overflow
pub mod score;
pub mod tracker;

pub use config::{LeadingGaps, TrailingGaps};
pub use engine::{Aligner, AlignerBuilder};
pub use error::{AlignError, AlignResult};
pub use score::{GapModel, LaneScore, SubstitutionMatrix};
pub use tracker::{Global, Local};
