pub mod stats;
pub mod vector;

pub use stats::StatsHelper;
pub use vector::{Axis, Vector2D};
