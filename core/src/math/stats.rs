use crate::math::Vector2D;

pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// RMS of the pairwise distances between two position series.
    /// Only the overlapping prefix is considered.
    pub fn rms_distance(lhs: &[Vector2D], rhs: &[Vector2D]) -> f64 {
        let distances: Vec<f64> = lhs
            .iter()
            .zip(rhs.iter())
            .map(|(a, b)| a.distance(*b))
            .collect();
        Self::rms(&distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_zero_sequence_yields_zero() {
        assert_eq!(StatsHelper::rms(&[]), 0.0);
        assert_eq!(StatsHelper::rms(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn rms_handles_single_value() {
        assert_eq!(StatsHelper::rms(&[4.0]), 4.0);
    }

    #[test]
    fn rms_distance_uses_overlapping_prefix() {
        let a = [Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 1.0)];
        let b = [Vector2D::new(3.0, 4.0)];
        assert_eq!(StatsHelper::rms_distance(&a, &b), 5.0);
        assert_eq!(StatsHelper::rms_distance(&a, &[]), 0.0);
    }
}
