//! Error channel for the alignment engine.
//!
//! All failures propagate out of `compute` as [`AlignError`]; the engine
//! never retries and never panics on user input. Arithmetic findings from
//! the saturation audit carry enough context (cell, lane, both scores) to
//! diagnose an unsound narrow-lane configuration.

use std::fmt;

/// Errors surfaced by engine construction and by `compute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A sequence byte has no rank in the substitution matrix.
    /// `seq` is 0 for the first (column) sequence of the failing pair,
    /// 1 for the second (row) sequence.
    InvalidSymbol { byte: u8, pos: usize, seq: usize },

    /// A batch call received zero sequence pairs.
    EmptySequence,

    /// Narrow-lane arithmetic lost information: either the offset rebase
    /// audit found a lane whose saturated result differs from the i32
    /// recompute, or a boundary value could not be represented at
    /// initialisation. `narrow` is the saturated result, `wide` the i32
    /// reference. Recovery: rerun with a wider score type.
    SaturationOverflow {
        cell: usize,
        lane: usize,
        narrow: i32,
        wide: i32,
    },

    /// Construction-time failure (duplicate matrix symbol, zero block
    /// width, oversized batch).
    InvalidConfiguration(String),
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignError::InvalidSymbol { byte, pos, seq } => {
                write!(
                    f,
                    "invalid symbol 0x{byte:02x} at position {pos} of sequence {seq}"
                )
            }
            AlignError::EmptySequence => write!(f, "empty sequence batch"),
            AlignError::SaturationOverflow {
                cell,
                lane,
                narrow,
                wide,
            } => {
                write!(
                    f,
                    "saturated arithmetic overflow at cell {cell}, lane {lane}: \
                     narrow score {narrow}, expected {wide}"
                )
            }
            AlignError::InvalidConfiguration(reason) => {
                write!(f, "invalid configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for AlignError {}

/// Result alias used throughout the crate.
pub type AlignResult<T> = Result<T, AlignError>;
