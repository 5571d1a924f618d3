//! Phase-continuous frequency modulation

use crate::common::{expand_bits, ModulationConfig, Modulator, Scheme};
use crate::Result;
use bersim_core::waveform::Waveform;
use std::f64::consts::PI;

/// FM modulator: `cos(2π f_c t + 2π Δf ∫b)`.
///
/// The instantaneous frequency sits at the carrier for 0 bits and at
/// carrier + `freq_deviation` for 1 bits. The phase integral is a running
/// sum of expanded bits scaled by the sample period, so no phase jumps
/// occur at bit boundaries.
#[derive(Debug, Clone)]
pub struct FmModulator {
    config: ModulationConfig,
}

impl FmModulator {
    /// Create a new FM modulator
    pub fn new(config: ModulationConfig) -> Self {
        Self { config }
    }

    /// Frequency deviation in Hz
    pub fn freq_deviation(&self) -> f64 {
        self.config.freq_deviation
    }
}

impl Modulator for FmModulator {
    fn scheme(&self) -> Scheme {
        Scheme::Fm
    }

    fn modulate(&self, bits: &[u8]) -> Result<Waveform> {
        let expanded = expand_bits(bits, &self.config)?;
        let deviation = 2.0 * PI * self.config.freq_deviation;

        let mut running_sum = 0u64;
        let samples = expanded
            .iter()
            .enumerate()
            .map(|(i, &b)| {
                running_sum += u64::from(b);
                let integral = running_sum as f64 / self.config.sample_rate;
                (self.config.carrier_phase(i) + deviation * integral).cos()
            })
            .collect();

        Ok(Waveform::from_data(samples, self.config.sample_rate)?)
    }

    fn output_len(&self, bit_count: usize) -> Result<usize> {
        Ok(bit_count * self.config.oversampling_factor(bit_count)?)
    }
}
