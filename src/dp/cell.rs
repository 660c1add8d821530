//! Affine DP cell.

/// One DP cell: `best` is the optimum over the three recurrence cases,
/// `gap` is the open-extend carry crossing this cell perpendicular to the
/// sweep, stored already extended into the next column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineCell<S> {
    pub best: S,
    pub gap: S,
}
