use crate::config::FilterConfig;
use crate::sample::KalmanCursor;

/// Common error type for the estimation core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("non-positive elapsed time: {0}s")]
    NonPositiveElapsed(f64),
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type EstimatorResult<T> = Result<T, EstimatorError>;

/// Predict/correct estimator driven once per measurement.
///
/// Both steps are pure: they read the given states and return a new one
/// stamped with `now`.
pub trait StateEstimator {
    /// Applies gains from `config`. Implementations reject configs selecting
    /// a method they do not implement.
    fn configure(&mut self, config: &FilterConfig) -> EstimatorResult<()>;

    /// Projects `state` forward by its own `delta`.
    fn extrapolate(&self, state: &KalmanCursor, now: f64) -> EstimatorResult<KalmanCursor>;

    /// Blends `next` into `prev`.
    fn update(
        &self,
        prev: &KalmanCursor,
        next: &KalmanCursor,
        now: f64,
    ) -> EstimatorResult<KalmanCursor>;

    /// One full cycle: `update(prev, extrapolate(measurement))`.
    fn estimate(
        &self,
        prev: &KalmanCursor,
        measurement: &KalmanCursor,
        now: f64,
    ) -> EstimatorResult<KalmanCursor> {
        let predicted = self.extrapolate(measurement, now)?;
        self.update(prev, &predicted, now)
    }
}
