//! Common modulation traits and utilities

use crate::{ModemError, Result};
use bersim_core::waveform::Waveform;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Default FM frequency deviation in Hz
pub const DEFAULT_FREQ_DEVIATION: f64 = 50.0;

/// Upper bound (exclusive) on `sample_rate * duration`
pub const MAX_SAMPLES: f64 = u32::MAX as f64;

/// Generic modulator trait
pub trait Modulator {
    /// Modulation scheme implemented by this modulator
    fn scheme(&self) -> Scheme;

    /// Modulate bits to a real passband waveform
    fn modulate(&self, bits: &[u8]) -> Result<Waveform>;

    /// Number of samples `modulate` produces for `bit_count` bits
    fn output_len(&self, bit_count: usize) -> Result<usize>;
}

/// Supported modulation schemes, ordered as they are simulated.
///
/// Deserialization accepts the same spellings as `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "AM", alias = "am", alias = "Am")]
    Am,
    #[serde(rename = "FM", alias = "fm", alias = "Fm")]
    Fm,
    #[serde(rename = "QAM", alias = "qam", alias = "Qam")]
    Qam,
}

impl Scheme {
    /// Every scheme in simulation order
    pub const ALL: [Scheme; 3] = [Scheme::Am, Scheme::Fm, Scheme::Qam];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Am => "AM",
            Scheme::Fm => "FM",
            Scheme::Qam => "QAM",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ModemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "am" => Ok(Scheme::Am),
            "fm" => Ok(Scheme::Fm),
            "qam" => Ok(Scheme::Qam),
            _ => Err(ModemError::UnsupportedModulation { name: s.to_string() }),
        }
    }
}

/// Common modulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulationConfig {
    pub sample_rate: f64,
    pub carrier_frequency: f64,
    pub duration: f64,
    pub freq_deviation: f64,
}

impl ModulationConfig {
    /// Create a new modulation configuration
    pub fn new(sample_rate: f64, carrier_frequency: f64, duration: f64) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ModemError::InvalidParameters {
                msg: format!("Invalid sample rate: {}", sample_rate),
            });
        }

        if !(duration.is_finite() && duration > 0.0) {
            return Err(ModemError::InvalidParameters {
                msg: format!("Invalid duration: {}", duration),
            });
        }

        if !(carrier_frequency.is_finite() && carrier_frequency >= 0.0) {
            return Err(ModemError::InvalidParameters {
                msg: format!("Invalid carrier frequency: {}", carrier_frequency),
            });
        }

        let product = sample_rate * duration;
        if !product.is_finite() || product >= MAX_SAMPLES {
            return Err(ModemError::InvalidParameters {
                msg: format!(
                    "Sample rate {} and duration {} give {} samples, limit is {}",
                    sample_rate, duration, product, MAX_SAMPLES
                ),
            });
        }

        let config = Self {
            sample_rate,
            carrier_frequency,
            duration,
            freq_deviation: DEFAULT_FREQ_DEVIATION,
        };

        if config.num_samples() == 0 {
            return Err(ModemError::InvalidParameters {
                msg: format!(
                    "Sample rate {} and duration {} produce no samples",
                    sample_rate, duration
                ),
            });
        }

        Ok(config)
    }

    /// Set the FM frequency deviation
    pub fn with_freq_deviation(mut self, freq_deviation: f64) -> Result<Self> {
        if !freq_deviation.is_finite() {
            return Err(ModemError::InvalidParameters {
                msg: format!("Invalid frequency deviation: {}", freq_deviation),
            });
        }
        self.freq_deviation = freq_deviation;
        Ok(self)
    }

    /// Number of samples on the time grid, `floor(sample_rate * duration)`.
    ///
    /// Products within 1e-9 of an integer snap to it so that e.g. 0.3 s at
    /// 10 Hz yields 3 samples rather than 2.
    pub fn num_samples(&self) -> usize {
        let product = self.sample_rate * self.duration;
        let nearest = product.round();
        if (product - nearest).abs() < 1e-9 {
            nearest as usize
        } else {
            product.floor() as usize
        }
    }

    /// Samples per bit for `bit_count` bits; the grid must divide evenly
    pub fn oversampling_factor(&self, bit_count: usize) -> Result<usize> {
        if bit_count == 0 {
            return Err(ModemError::InvalidParameters {
                msg: "Bit count must be greater than 0".to_string(),
            });
        }

        let num_samples = self.num_samples();
        if num_samples < bit_count || num_samples % bit_count != 0 {
            return Err(ModemError::InvalidParameters {
                msg: format!(
                    "Sample count {} is not a positive multiple of bit count {}",
                    num_samples, bit_count
                ),
            });
        }

        Ok(num_samples / bit_count)
    }

    /// Time of sample `index` on the uniform grid over `[0, duration)`
    pub fn sample_time(&self, index: usize) -> f64 {
        index as f64 * self.duration / self.num_samples() as f64
    }

    /// Carrier angle `2π f_c t` at sample `index`
    pub fn carrier_phase(&self, index: usize) -> f64 {
        2.0 * PI * self.carrier_frequency * self.sample_time(index)
    }
}

impl Default for ModulationConfig {
    fn default() -> Self {
        Self {
            sample_rate: 10_000.0,
            carrier_frequency: 1_000.0,
            duration: 1.0,
            freq_deviation: DEFAULT_FREQ_DEVIATION,
        }
    }
}

/// Repeat every bit `oversampling_factor(bits.len())` times
pub fn expand_bits(bits: &[u8], config: &ModulationConfig) -> Result<Vec<u8>> {
    let factor = config.oversampling_factor(bits.len())?;
    tracing::trace!("Expanding {} bits by {} samples per bit", bits.len(), factor);

    let mut expanded = Vec::with_capacity(bits.len() * factor);
    for &bit in bits {
        expanded.extend(std::iter::repeat(bit).take(factor));
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulation_config() {
        let config = ModulationConfig::new(10_000.0, 1_000.0, 1.0).unwrap();
        assert_eq!(config.num_samples(), 10_000);
        assert_eq!(config.freq_deviation, DEFAULT_FREQ_DEVIATION);
        assert_eq!(config.oversampling_factor(1000).unwrap(), 10);
        assert_eq!(config, ModulationConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(ModulationConfig::new(-1.0, 1000.0, 1.0).is_err());
        assert!(ModulationConfig::new(1000.0, 1000.0, 0.0).is_err());
        assert!(ModulationConfig::new(1000.0, -5.0, 1.0).is_err());
        assert!(ModulationConfig::new(1000.0, 100.0, 1e-6).is_err());
        assert!(ModulationConfig::default().with_freq_deviation(f64::NAN).is_err());
    }

    #[test]
    fn test_oversized_sample_grid_rejected() {
        assert!(ModulationConfig::new(1e30, 1.0, 1.0).is_err());
        assert!(ModulationConfig::new(1e200, 1.0, 1e200).is_err());
        assert!(ModulationConfig::new(MAX_SAMPLES, 1.0, 1.0).is_err());
        assert!(ModulationConfig::new(1e6, 1.0, 60.0).is_ok());
    }

    #[test]
    fn test_num_samples_snaps_to_integer() {
        let config = ModulationConfig::new(10.0, 1.0, 0.3).unwrap();
        assert_eq!(config.num_samples(), 3);

        let config = ModulationConfig::new(10.0, 1.0, 0.35).unwrap();
        assert_eq!(config.num_samples(), 3);
    }

    #[test]
    fn test_oversampling_factor_must_divide() {
        let config = ModulationConfig::new(100.0, 10.0, 1.0).unwrap();
        assert_eq!(config.oversampling_factor(25).unwrap(), 4);
        assert!(config.oversampling_factor(30).is_err());
        assert!(config.oversampling_factor(200).is_err());
        assert!(config.oversampling_factor(0).is_err());
    }

    #[test]
    fn test_expand_bits() {
        let config = ModulationConfig::new(12.0, 1.0, 1.0).unwrap();
        let expanded = expand_bits(&[1, 0, 1], &config).unwrap();
        assert_eq!(expanded, vec![1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_sample_time_grid() {
        let config = ModulationConfig::new(4.0, 1.0, 2.0).unwrap();
        let times: Vec<f64> = (0..config.num_samples()).map(|i| config.sample_time(i)).collect();
        assert_eq!(times, vec![0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75]);
    }

    #[test]
    fn test_scheme_parsing() {
        assert_eq!("am".parse::<Scheme>().unwrap(), Scheme::Am);
        assert_eq!("FM".parse::<Scheme>().unwrap(), Scheme::Fm);
        assert_eq!("Qam".parse::<Scheme>().unwrap(), Scheme::Qam);
        assert!("psk".parse::<Scheme>().is_err());
        assert_eq!(Scheme::Qam.to_string(), "QAM");
    }
}
