use crate::prelude::{EstimatorError, EstimatorResult};
use log::warn;
use serde::{Deserialize, Serialize};

/// Estimator variant selectable at the configuration boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    #[default]
    #[serde(rename = "g-h-k")]
    Ghk,
    /// Adaptive-gain Kalman filter. Reserved, not implemented.
    #[serde(rename = "kalman")]
    Kalman,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Ghk => "g-h-k",
            Method::Kalman => "kalman",
        }
    }
}

/// Gain and noise settings for a tracking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub method: Method,
    pub gain_g: f64,
    pub gain_h: f64,
    pub gain_k: f64,
    pub noise_amplitude: f64,
    /// Seed for the noise synthesizer. `None` draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            method: Method::Ghk,
            gain_g: 0.1,
            gain_h: 0.1,
            gain_k: 0.1,
            noise_amplitude: 32.0,
            seed: None,
        }
    }
}

impl FilterConfig {
    pub fn with_gains(gain_g: f64, gain_h: f64, gain_k: f64) -> Self {
        Self {
            gain_g,
            gain_h,
            gain_k,
            ..Default::default()
        }
    }

    /// Noise amplitude for a log2 slider position.
    pub fn noise_from_exponent(exponent: u32) -> f64 {
        2f64.powi(exponent as i32)
    }

    pub fn validate(&self) -> EstimatorResult<()> {
        if self.method == Method::Kalman {
            return Err(EstimatorError::UnsupportedMethod(
                self.method.as_str().to_string(),
            ));
        }

        for (name, gain) in [("g", self.gain_g), ("h", self.gain_h), ("k", self.gain_k)] {
            if !gain.is_finite() {
                return Err(EstimatorError::InvalidConfig(format!(
                    "gain {} must be finite",
                    name
                )));
            }
            if !(0.0..=1.0).contains(&gain) {
                warn!("gain {} = {} is outside the conventional [0, 1] range", name, gain);
            }
        }

        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(EstimatorError::InvalidConfig(format!(
                "noise amplitude must be a non-negative number, got {}",
                self.noise_amplitude
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FilterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.noise_amplitude, 32.0);
    }

    #[test]
    fn kalman_method_is_rejected() {
        let config = FilterConfig {
            method: Method::Kalman,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(EstimatorError::UnsupportedMethod("kalman".into()))
        );
    }

    #[test]
    fn method_uses_form_names_on_the_wire() {
        let config: FilterConfig =
            serde_json::from_str(r#"{"method":"kalman","gain_g":0.5}"#).unwrap();
        assert_eq!(config.method, Method::Kalman);
        assert_eq!(config.gain_g, 0.5);
        assert_eq!(config.gain_h, 0.1);

        let json = serde_json::to_string(&FilterConfig::default()).unwrap();
        assert!(json.contains(r#""method":"g-h-k""#));
    }

    #[test]
    fn negative_or_nan_values_are_rejected() {
        let negative_noise = FilterConfig {
            noise_amplitude: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            negative_noise.validate(),
            Err(EstimatorError::InvalidConfig(_))
        ));

        let nan_gain = FilterConfig::with_gains(f64::NAN, 0.1, 0.1);
        assert!(matches!(
            nan_gain.validate(),
            Err(EstimatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn gains_outside_unit_range_are_accepted() {
        assert!(FilterConfig::with_gains(1.5, -0.2, 0.0).validate().is_ok());
    }

    #[test]
    fn noise_exponent_maps_to_powers_of_two() {
        assert_eq!(FilterConfig::noise_from_exponent(0), 1.0);
        assert_eq!(FilterConfig::noise_from_exponent(5), 32.0);
        assert_eq!(FilterConfig::noise_from_exponent(10), 1024.0);
    }
}
