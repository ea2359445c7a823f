//! g-h-k state estimation core for real-time pointer tracking.
//!
//! Raw pointer samples are perturbed by a noise synthesizer, filtered by a
//! fixed-gain g-h-k estimator and recorded in bounded trails that an external
//! renderer can read.

pub mod clock;
pub mod config;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod sample;
pub mod telemetry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FilterConfig, Method};
pub use prelude::{EstimatorError, EstimatorResult, StateEstimator};
pub use processing::{SessionController, TrailSnapshot, PATH_LENGTH};
pub use sample::{CursorData, KalmanCursor, RawSample};
