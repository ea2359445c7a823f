use crate::math::Vector2D;
use crate::sample::{CursorData, KalmanCursor};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Derives simulated noisy measurements from true pointer positions.
///
/// Each axis is offset by `U² · n − n/2` with `U` uniform in `[0, 1)`, which
/// keeps most offsets small with occasional larger excursions.
pub struct NoiseSynthesizer {
    rng: StdRng,
    seed: Option<u64>,
}

impl NoiseSynthesizer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn perturb(&mut self, pos: Vector2D, amplitude: f64) -> Vector2D {
        let dx = self.offset(amplitude);
        let dy = self.offset(amplitude);
        pos.add(Vector2D::new(dx, dy))
    }

    /// Measurement sharing the sample's timestamp and delta, with zero
    /// velocity and acceleration.
    pub fn measure(&mut self, sample: &KalmanCursor, amplitude: f64) -> KalmanCursor {
        let pos = self.perturb(sample.data.pos, amplitude);
        KalmanCursor::new(sample.time, sample.delta, CursorData::at(pos))
    }

    fn offset(&mut self, amplitude: f64) -> f64 {
        if amplitude == 0.0 {
            return 0.0;
        }
        let u: f64 = self.rng.gen();
        u * u * amplitude - amplitude / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::RawSample;

    #[test]
    fn zero_amplitude_returns_input_position() {
        let mut noise = NoiseSynthesizer::new(Some(7));
        let sample = KalmanCursor::from_raw(&RawSample::new(120.5, -33.0, 4.0));
        let measurement = noise.measure(&sample, 0.0);
        assert_eq!(measurement.pos(), sample.pos());
        assert_eq!(measurement.time, sample.time);
    }

    #[test]
    fn offsets_stay_within_amplitude_band() {
        let mut noise = NoiseSynthesizer::new(Some(42));
        let amplitude = 32.0;
        for _ in 0..1000 {
            let p = noise.perturb(Vector2D::ZERO, amplitude);
            assert!(p.i >= -amplitude / 2.0 && p.i < amplitude / 2.0);
            assert!(p.j >= -amplitude / 2.0 && p.j < amplitude / 2.0);
        }
    }

    #[test]
    fn offsets_are_biased_towards_the_lower_band() {
        // E[U²·n − n/2] = n/3 − n/2 = −n/6
        let mut noise = NoiseSynthesizer::new(Some(3));
        let amplitude = 60.0;
        let count = 20_000;
        let mean = (0..count)
            .map(|_| noise.perturb(Vector2D::ZERO, amplitude).i)
            .sum::<f64>()
            / count as f64;
        assert!((mean + amplitude / 6.0).abs() < 1.0, "mean {}", mean);
    }

    #[test]
    fn measurement_has_zero_kinematics() {
        let mut noise = NoiseSynthesizer::new(Some(1));
        let mut sample = KalmanCursor::from_raw(&RawSample::new(1.0, 1.0, 0.5));
        sample.data.vel = Vector2D::new(9.0, 9.0);
        let measurement = noise.measure(&sample, 8.0);
        assert_eq!(measurement.data.vel, Vector2D::ZERO);
        assert_eq!(measurement.data.acc, Vector2D::ZERO);
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let mut a = NoiseSynthesizer::new(Some(99));
        let mut b = NoiseSynthesizer::new(Some(99));
        for _ in 0..16 {
            assert_eq!(
                a.perturb(Vector2D::ZERO, 10.0),
                b.perturb(Vector2D::ZERO, 10.0)
            );
        }
    }
}
