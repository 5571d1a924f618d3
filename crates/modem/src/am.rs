//! Amplitude modulation (on-off keyed carrier amplitude)

use crate::common::{expand_bits, ModulationConfig, Modulator, Scheme};
use crate::Result;
use bersim_core::waveform::Waveform;

/// AM modulator: `(1 + b) cos(2π f_c t)`
#[derive(Debug, Clone)]
pub struct AmModulator {
    config: ModulationConfig,
}

impl AmModulator {
    /// Create a new AM modulator
    pub fn new(config: ModulationConfig) -> Self {
        Self { config }
    }
}

impl Modulator for AmModulator {
    fn scheme(&self) -> Scheme {
        Scheme::Am
    }

    fn modulate(&self, bits: &[u8]) -> Result<Waveform> {
        let expanded = expand_bits(bits, &self.config)?;

        let samples = expanded
            .iter()
            .enumerate()
            .map(|(i, &b)| (1.0 + f64::from(b)) * self.config.carrier_phase(i).cos())
            .collect();

        Ok(Waveform::from_data(samples, self.config.sample_rate)?)
    }

    fn output_len(&self, bit_count: usize) -> Result<usize> {
        Ok(bit_count * self.config.oversampling_factor(bit_count)?)
    }
}
