pub mod ghk;
pub mod noise;
pub mod session;
pub mod trail;

pub use ghk::{estimator_for, GhkFilter, Gains};
pub use noise::NoiseSynthesizer;
pub use session::{CycleReport, SessionController};
pub use trail::{opacity, Trail, TrailKind, TrailSnapshot, Trails, PATH_LENGTH};
