//! DP state: cells, per-axis vectors, the saturated offset wrapper, and
//! the lane-local row caches.
//!
//! Axis convention: the column vector spans the first sequence (one cell
//! per symbol plus the origin), the row vector spans the second. The
//! matrix is walked column-major in blocks of matrix columns; within a
//! block, lanes of compile-time width `W` tile the row vector.

pub mod cell;
pub mod lane;
pub mod saturated;
pub mod vector;

pub use cell::AffineCell;
pub use lane::RowLane;
pub use saturated::Saturated;
pub use vector::DpVector;
