use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use ghkcore::FilterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub filter: FilterConfig,
    pub generator: GeneratorConfig,
    pub samples: usize,
    /// Spacing between pointer samples.
    pub interval_ms: f64,
    /// Delay between capturing a sample and filtering it.
    pub latency_ms: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            generator: GeneratorConfig::default(),
            samples: 256,
            interval_ms: 16.0,
            latency_ms: 0.0,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(filter: FilterConfig, samples: usize, interval_ms: f64) -> Self {
        Self {
            filter,
            samples,
            interval_ms,
            ..Default::default()
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_ms / 1000.0
    }

    pub fn latency_secs(&self) -> f64 {
        self.latency_ms / 1000.0
    }
}
