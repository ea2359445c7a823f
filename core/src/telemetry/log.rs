use crate::config::FilterConfig;
use crate::prelude::EstimatorError;
use crate::sample::KalmanCursor;
use log::{debug, info, warn};

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record_cycle(&self, measurement: &KalmanCursor, estimate: &KalmanCursor) {
        debug!(
            "cycle t={:.4} measured=({:.2}, {:.2}) estimate=({:.2}, {:.2}) d={:.4}",
            estimate.time,
            measurement.data.pos.i,
            measurement.data.pos.j,
            estimate.data.pos.i,
            estimate.data.pos.j,
            estimate.delta.unwrap_or_default()
        );
    }

    pub fn record_config(&self, config: &FilterConfig) {
        info!(
            "config {} g={} h={} k={} noise={}",
            config.method.as_str(),
            config.gain_g,
            config.gain_h,
            config.gain_k,
            config.noise_amplitude
        );
    }

    pub fn record_rejection(&self, error: &EstimatorError) {
        warn!("cycle rejected: {}", error);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
