use crate::config::{FilterConfig, Method};
use crate::prelude::{EstimatorError, EstimatorResult, StateEstimator};
use crate::sample::{CursorData, KalmanCursor};

/// Fixed g-h-k gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    pub g: f64,
    pub h: f64,
    pub k: f64,
}

impl Gains {
    pub fn new(g: f64, h: f64, k: f64) -> Self {
        Self { g, h, k }
    }
}

impl From<&FilterConfig> for Gains {
    fn from(config: &FilterConfig) -> Self {
        Self::new(config.gain_g, config.gain_h, config.gain_k)
    }
}

/// State extrapolation: projects `state` forward by its own delta.
pub fn extrapolate(state: &KalmanCursor, now: f64) -> EstimatorResult<KalmanCursor> {
    let d = state
        .delta
        .ok_or_else(|| EstimatorError::InvalidState("time delta is not specified".into()))?;

    let data = CursorData {
        acc: state.data.acc,
        vel: state.data.vel.add(state.data.acc.scale(d)),
        pos: state.data.pos.add(state.data.vel.scale(d)),
    };

    Ok(KalmanCursor::new(now, Some(d), data))
}

/// State update: corrects `prev` towards the measurement `next`.
///
/// All three terms are driven by the residual `next.pos - prev.pos`. The
/// elapsed time between the two states must be strictly positive.
pub fn update(
    prev: &KalmanCursor,
    next: &KalmanCursor,
    gains: Gains,
    now: f64,
) -> EstimatorResult<KalmanCursor> {
    let d = next.time - prev.time;
    if !d.is_finite() || d <= 0.0 {
        return Err(EstimatorError::NonPositiveElapsed(d));
    }

    let residual = next.data.pos.sub(prev.data.pos);
    let data = CursorData {
        acc: prev.data.acc.add(residual.scale(2.0 * gains.k / (d * d))),
        vel: prev.data.vel.add(residual.scale(gains.h / d)),
        pos: prev.data.pos.add(residual.scale(gains.g)),
    };

    Ok(KalmanCursor::new(now, Some(d), data))
}

/// g-h-k estimator with runtime-replaceable gains.
#[derive(Debug, Clone)]
pub struct GhkFilter {
    gains: Gains,
}

impl GhkFilter {
    pub fn new(gains: Gains) -> Self {
        Self { gains }
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }
}

impl Default for GhkFilter {
    fn default() -> Self {
        Self::from(&FilterConfig::default())
    }
}

impl From<&FilterConfig> for GhkFilter {
    fn from(config: &FilterConfig) -> Self {
        Self::new(Gains::from(config))
    }
}

impl StateEstimator for GhkFilter {
    fn configure(&mut self, config: &FilterConfig) -> EstimatorResult<()> {
        if config.method != Method::Ghk {
            return Err(EstimatorError::UnsupportedMethod(
                config.method.as_str().to_string(),
            ));
        }
        self.gains = Gains::from(config);
        Ok(())
    }

    fn extrapolate(&self, state: &KalmanCursor, now: f64) -> EstimatorResult<KalmanCursor> {
        extrapolate(state, now)
    }

    fn update(
        &self,
        prev: &KalmanCursor,
        next: &KalmanCursor,
        now: f64,
    ) -> EstimatorResult<KalmanCursor> {
        update(prev, next, self.gains, now)
    }
}

/// Builds the estimator for `config.method`.
pub fn estimator_for(config: &FilterConfig) -> EstimatorResult<Box<dyn StateEstimator + Send>> {
    match config.method {
        Method::Ghk => Ok(Box::new(GhkFilter::from(config))),
        Method::Kalman => Err(EstimatorError::UnsupportedMethod(
            config.method.as_str().to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2D;

    const EPS: f64 = 1e-9;

    fn measurement(x: f64, y: f64, time: f64) -> KalmanCursor {
        KalmanCursor::new(time, Some(0.0), CursorData::at(Vector2D::new(x, y)))
    }

    fn assert_close(actual: Vector2D, expected: Vector2D) {
        assert!(
            (actual.i - expected.i).abs() < EPS && (actual.j - expected.j).abs() < EPS,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn extrapolation_requires_delta() {
        let mut state = KalmanCursor::origin(0.0);
        state.delta = None;
        assert!(matches!(
            extrapolate(&state, 1.0),
            Err(EstimatorError::InvalidState(_))
        ));
    }

    #[test]
    fn extrapolation_projects_with_current_rates() {
        let state = KalmanCursor::new(
            0.0,
            Some(0.5),
            CursorData {
                acc: Vector2D::new(2.0, 0.0),
                vel: Vector2D::new(4.0, -2.0),
                pos: Vector2D::new(1.0, 1.0),
            },
        );
        let next = extrapolate(&state, 3.0).unwrap();
        assert_eq!(next.time, 3.0);
        assert_eq!(next.delta, Some(0.5));
        assert_close(next.data.acc, Vector2D::new(2.0, 0.0));
        assert_close(next.data.vel, Vector2D::new(5.0, -2.0));
        assert_close(next.data.pos, Vector2D::new(3.0, 0.0));
    }

    #[test]
    fn update_matches_reference_scenario() {
        let prev = KalmanCursor::origin(0.0);
        let next = measurement(10.0, 0.0, 1.0);
        let state = update(&prev, &next, Gains::new(0.5, 0.1, 0.1), 1.0).unwrap();
        // r = (10, 0): acc = r * 2k / d² = (2, 0)
        assert_close(state.data.acc, Vector2D::new(2.0, 0.0));
        assert_close(state.data.vel, Vector2D::new(1.0, 0.0));
        assert_close(state.data.pos, Vector2D::new(5.0, 0.0));
        assert_eq!(state.delta, Some(1.0));
    }

    #[test]
    fn update_rejects_non_positive_elapsed_time() {
        let prev = KalmanCursor::origin(2.0);
        let same = measurement(1.0, 1.0, 2.0);
        let earlier = measurement(1.0, 1.0, 1.0);
        let gains = Gains::new(0.5, 0.5, 0.5);
        assert_eq!(
            update(&prev, &same, gains, 2.0),
            Err(EstimatorError::NonPositiveElapsed(0.0))
        );
        assert!(update(&prev, &earlier, gains, 2.0).is_err());
    }

    #[test]
    fn zero_gains_never_move_the_estimate() {
        let filter = GhkFilter::new(Gains::new(0.0, 0.0, 0.0));
        let mut state = KalmanCursor::origin(0.0);
        for step in 1..=20 {
            let t = step as f64 * 0.016;
            let m = measurement(step as f64 * 13.0, -(step as f64), t).with_delta(0.004);
            state = filter.estimate(&state, &m, t).unwrap();
            assert_eq!(state.data.pos, Vector2D::ZERO);
        }
    }

    #[test]
    fn unit_g_tracks_measurement_exactly() {
        let filter = GhkFilter::new(Gains::new(1.0, 0.0, 0.0));
        let mut state = KalmanCursor::origin(0.0);
        for step in 1..=20 {
            let t = step as f64 * 0.02;
            let m = measurement(step as f64 * 3.5, (step as f64).sqrt(), t).with_delta(0.001);
            state = filter.estimate(&state, &m, t).unwrap();
            assert_close(state.data.pos, m.data.pos);
        }
    }

    #[test]
    fn configure_rejects_kalman_and_keeps_gains() {
        let mut filter = GhkFilter::new(Gains::new(0.3, 0.2, 0.1));
        let config = FilterConfig {
            method: Method::Kalman,
            ..FilterConfig::with_gains(0.9, 0.9, 0.9)
        };
        assert!(filter.configure(&config).is_err());
        assert_eq!(filter.gains(), Gains::new(0.3, 0.2, 0.1));

        filter
            .configure(&FilterConfig::with_gains(0.9, 0.8, 0.7))
            .unwrap();
        assert_eq!(filter.gains(), Gains::new(0.9, 0.8, 0.7));
    }

    #[test]
    fn estimator_for_kalman_is_unsupported() {
        let config = FilterConfig {
            method: Method::Kalman,
            ..Default::default()
        };
        assert!(matches!(
            estimator_for(&config),
            Err(EstimatorError::UnsupportedMethod(_))
        ));
        assert!(estimator_for(&FilterConfig::default()).is_ok());
    }
}
