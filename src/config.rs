//! Runtime configuration for the engine.
//!
//! Compile-time choices (score type, lane width, method) live in the type
//! parameters of [`crate::engine::Aligner`]; everything here is a plain
//! value passed by value.

/// Policy for gaps at the start of the alignment.
///
/// `Penalize` applies the affine boundary (`gap_open + d * gap_extend` at
/// axis distance `d`); `Free` zeroes the leading cells on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LeadingGaps {
    #[default]
    Penalize,
    Free,
}

/// Policy for gaps at the end of the alignment.
///
/// `Penalize` reads the bottom-right cell; `Free` takes the best score on
/// the final row or final column, so a trailing gap in either sequence
/// costs nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrailingGaps {
    #[default]
    Penalize,
    Free,
}

/// Number of matrix columns grouped into one block. Saturated (narrow
/// lane) engines re-centre their stored cells at every block entry, so
/// smaller blocks trade rebase overhead for headroom.
pub const DEFAULT_BLOCK_WIDTH: usize = 32;
