//! Real-valued sampled waveform

use crate::{CoreError, Result};
use std::ops::Index;

/// Samples on a uniform time grid at `sample_rate` Hz
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl Waveform {
    /// Wrap `samples` taken at `sample_rate` Hz
    pub fn from_data(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(CoreError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self { samples, sample_rate })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn data(&self) -> &[f64] {
        &self.samples
    }

    /// Mean squared sample value, 0.0 when there are no samples
    pub fn power(&self) -> f64 {
        match self.samples.len() {
            0 => 0.0,
            n => self.samples.iter().map(|s| s * s).sum::<f64>() / n as f64,
        }
    }

    /// Largest absolute sample value
    pub fn peak_amplitude(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| s.abs().max(peak))
    }
}

impl Index<usize> for Waveform {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}
