use crate::generator::template;
use anyhow::ensure;
use ghkcore::math::Vector2D;
use ghkcore::RawSample;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathShape {
    Circle,
    Lissajous,
    Line,
}

/// Configuration for generating a synthetic pointer path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub shape: PathShape,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Radians per second.
    pub angular_speed: f64,
    /// Uniform hand tremor added to the true path, in pixels.
    pub jitter: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shape: PathShape::Circle,
            center_x: 256.0,
            center_y: 256.0,
            radius: 160.0,
            angular_speed: 1.0,
            jitter: 0.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    fn center(&self) -> Vector2D {
        Vector2D::new(self.center_x, self.center_y)
    }

    fn point_at(&self, t: f64) -> Vector2D {
        let shape: fn(Vector2D, f64, f64, f64) -> Vector2D = match self.shape {
            PathShape::Circle => template::circle,
            PathShape::Lissajous => template::lissajous,
            PathShape::Line => template::line,
        };
        shape(self.center(), self.radius, self.angular_speed, t)
    }
}

/// Builds `count` pointer samples spaced `interval` seconds apart, the first
/// one captured at `start`.
pub fn build_pointer_path(
    config: &GeneratorConfig,
    count: usize,
    start: f64,
    interval: f64,
) -> anyhow::Result<Vec<RawSample>> {
    ensure!(
        interval > 0.0 && interval.is_finite(),
        "sample interval must be positive, got {}",
        interval
    );
    ensure!(
        config.jitter >= 0.0 && config.jitter.is_finite(),
        "jitter must be non-negative, got {}",
        config.jitter
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut samples = Vec::with_capacity(count);

    for index in 0..count {
        let t = start + index as f64 * interval;
        let mut p = config.point_at(t - start);
        if config.jitter > 0.0 {
            p = p.add(Vector2D::new(
                rng.gen_range(-config.jitter..config.jitter),
                rng.gen_range(-config.jitter..config.jitter),
            ));
        }
        samples.push(RawSample::new(p.i, p.j, t));
    }

    Ok(samples)
}
