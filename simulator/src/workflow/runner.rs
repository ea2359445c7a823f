use crate::generator::profile::build_pointer_path;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use ghkcore::math::{StatsHelper, Vector2D};
use ghkcore::{KalmanCursor, ManualClock, SessionController, TrailSnapshot};
use log::debug;

pub struct WorkflowResult {
    pub snapshot: TrailSnapshot,
    pub processed: usize,
    pub rejected: usize,
    /// RMS distance between raw and measured trail positions.
    pub measured_rms: f64,
    /// RMS distance between raw and filtered trail positions.
    pub filtered_rms: f64,
}

impl WorkflowResult {
    /// One-line summary used by the offline report.
    pub fn summary(&self) -> String {
        let estimate = self
            .snapshot
            .filtered
            .first()
            .map(|cursor| format!("({:.2}, {:.2})", cursor.data.pos.i, cursor.data.pos.j))
            .unwrap_or_else(|| "none".to_string());
        format!(
            "processed={} rejected={} measured_rms={:.4} filtered_rms={:.4} trails={}/{}/{} estimate={}",
            self.processed,
            self.rejected,
            self.measured_rms,
            self.filtered_rms,
            self.snapshot.raw.len(),
            self.snapshot.measured.len(),
            self.snapshot.filtered.len(),
            estimate
        )
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Replays a synthetic pointer path through a fresh session on a manual
    /// clock.
    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let interval = self.config.interval_secs();
        let latency = self.config.latency_secs();
        anyhow::ensure!(
            latency >= 0.0 && latency.is_finite(),
            "latency must be non-negative, got {}ms",
            self.config.latency_ms
        );

        let path = build_pointer_path(
            &self.config.generator,
            self.config.samples,
            interval,
            interval,
        )
        .context("generating pointer path")?;

        let clock = ManualClock::starting_at(0.0);
        let mut session = SessionController::new(self.config.filter.clone(), clock.clone())
            .context("creating tracking session")?;

        for sample in &path {
            clock.set(sample.time + latency);
            if let Err(err) = session.ingest(*sample) {
                debug!("sample at {:.4}s skipped: {}", sample.time, err);
            }
        }

        let snapshot = session.snapshot();
        let raw = positions(&snapshot.raw);
        let measured_rms = StatsHelper::rms_distance(&raw, &positions(&snapshot.measured));
        let filtered_rms = StatsHelper::rms_distance(&raw, &positions(&snapshot.filtered));
        let metrics = session.metrics();

        Ok(WorkflowResult {
            snapshot,
            processed: metrics.processed,
            rejected: metrics.rejected,
            measured_rms,
            filtered_rms,
        })
    }
}

fn positions(trail: &[KalmanCursor]) -> Vec<Vector2D> {
    trail.iter().map(|cursor| cursor.pos()).collect()
}
