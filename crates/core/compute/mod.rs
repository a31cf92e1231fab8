//! Distance metric, radius query and coordinate validation.

pub mod neighbors;
pub mod planar;
pub mod validation;

pub use neighbors::{MatchSet, is_neighbor_distance, within_radius};
pub use planar::{PlanarDelta, distance_feet, offset_by_feet, project};
