//! Score model: lane abstraction, substitution matrix with rank
//! transformation, row profiles, and the affine gap model.

pub mod gaps;
pub mod lanes;
pub mod matrix;
pub mod profile;

pub use gaps::GapModel;
pub use lanes::LaneScore;
pub use matrix::{SubstitutionMatrix, RANK_SENTINEL};
pub use profile::LaneProfile;
