use crate::clock::Clock;
use crate::config::FilterConfig;
use crate::prelude::{EstimatorError, EstimatorResult, StateEstimator};
use crate::processing::ghk::estimator_for;
use crate::processing::noise::NoiseSynthesizer;
use crate::processing::trail::{TrailSnapshot, Trails};
use crate::sample::{KalmanCursor, RawSample};
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

/// States produced by one ingest cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub raw: KalmanCursor,
    pub measurement: KalmanCursor,
    pub estimate: KalmanCursor,
}

/// Owns the configuration and the authoritative filtered state, and runs the
/// raw -> measured -> filtered cycle for every incoming sample.
///
/// Trails are written here and only read elsewhere; the estimator never sees
/// them.
pub struct SessionController<C: Clock> {
    config: FilterConfig,
    clock: C,
    noise: NoiseSynthesizer,
    estimator: Box<dyn StateEstimator + Send>,
    estimation: KalmanCursor,
    trails: Trails,
    logger: LogManager,
    metrics: MetricsRecorder,
}

impl<C: Clock> SessionController<C> {
    pub fn new(config: FilterConfig, clock: C) -> EstimatorResult<Self> {
        config.validate()?;
        let estimator = estimator_for(&config)?;
        let noise = NoiseSynthesizer::new(config.seed);
        let estimation = KalmanCursor::origin(clock.now());
        let logger = LogManager::new();
        logger.record_config(&config);

        Ok(Self {
            config,
            clock,
            noise,
            estimator,
            estimation,
            trails: Trails::default(),
            logger,
            metrics: MetricsRecorder::new(),
        })
    }

    /// Stamps `(x, y)` with the current clock time and ingests it.
    pub fn capture(&mut self, x: f64, y: f64) -> EstimatorResult<CycleReport> {
        let time = self.clock.now();
        self.ingest(RawSample::new(x, y, time))
    }

    /// Runs one full cycle. A rejected sample leaves trails and estimation
    /// untouched.
    pub fn ingest(&mut self, sample: RawSample) -> EstimatorResult<CycleReport> {
        match self.run_cycle(sample) {
            Ok(report) => {
                self.metrics.record_processed();
                Ok(report)
            }
            Err(err) => {
                self.logger.record_rejection(&err);
                self.metrics.record_rejected();
                Err(err)
            }
        }
    }

    fn run_cycle(&mut self, sample: RawSample) -> EstimatorResult<CycleReport> {
        if !sample.is_finite() {
            return Err(EstimatorError::InvalidInput(format!(
                "non-finite sample {:?}",
                sample
            )));
        }

        let now = self.clock.now();
        let capture_delta = now - sample.time;
        if !capture_delta.is_finite() {
            return Err(EstimatorError::InvalidInput(format!(
                "non-finite capture delay {} at clock time {}",
                capture_delta, now
            )));
        }
        if capture_delta < 0.0 {
            return Err(EstimatorError::InvalidInput(format!(
                "sample captured {:.6}s in the future",
                -capture_delta
            )));
        }
        let update_delta = now - self.estimation.time;
        if !update_delta.is_finite() || update_delta <= 0.0 {
            return Err(EstimatorError::NonPositiveElapsed(update_delta));
        }

        let raw = KalmanCursor::from_raw(&sample);
        self.trails.raw.push_front(raw);

        let measurement = self.noise.measure(&raw, self.config.noise_amplitude);
        self.trails.measured.push_front(measurement);

        let timed = measurement.with_delta(capture_delta);
        let estimate = self.estimator.estimate(&self.estimation, &timed, now)?;
        self.estimation = estimate;
        self.trails.filtered.push_front(estimate);
        self.logger.record_cycle(&measurement, &estimate);

        Ok(CycleReport {
            raw,
            measurement,
            estimate,
        })
    }

    /// Replaces gains and noise for subsequent cycles. History is kept.
    pub fn apply_config(&mut self, config: FilterConfig) -> EstimatorResult<()> {
        config.validate()?;
        self.estimator.configure(&config)?;
        if config.seed != self.noise.seed() {
            self.noise = NoiseSynthesizer::new(config.seed);
        }
        self.logger.record_config(&config);
        self.metrics.record_config_change();
        self.config = config;
        Ok(())
    }

    /// Clears all trails and reseeds the estimation at the origin.
    pub fn reset(&mut self) {
        self.trails.clear();
        self.estimation = KalmanCursor::origin(self.clock.now());
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn estimation(&self) -> &KalmanCursor {
        &self.estimation
    }

    pub fn trails(&self) -> &Trails {
        &self.trails
    }

    pub fn snapshot(&self) -> TrailSnapshot {
        self.trails.snapshot()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

}
