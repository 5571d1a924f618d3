//! Quadrature amplitude modulation over the expanded bit stream

use crate::common::{expand_bits, ModulationConfig, Modulator, Scheme};
use crate::Result;
use bersim_core::waveform::Waveform;

/// QAM modulator: `I cos(2π f_c t) - Q sin(2π f_c t)`.
///
/// Even-indexed expanded samples drive I and odd-indexed ones drive Q, so the
/// output holds one sample per I/Q pair: half the AM/FM length. The carriers
/// use the first `pairs` points of the time grid.
#[derive(Debug, Clone)]
pub struct QamModulator {
    config: ModulationConfig,
}

impl QamModulator {
    /// Create a new QAM modulator
    pub fn new(config: ModulationConfig) -> Self {
        Self { config }
    }
}

impl Modulator for QamModulator {
    fn scheme(&self) -> Scheme {
        Scheme::Qam
    }

    fn modulate(&self, bits: &[u8]) -> Result<Waveform> {
        let expanded = expand_bits(bits, &self.config)?;

        let samples = expanded
            .chunks_exact(2)
            .enumerate()
            .map(|(i, pair)| {
                let phase = self.config.carrier_phase(i);
                f64::from(pair[0]) * phase.cos() - f64::from(pair[1]) * phase.sin()
            })
            .collect();

        Ok(Waveform::from_data(samples, self.config.sample_rate)?)
    }

    fn output_len(&self, bit_count: usize) -> Result<usize> {
        Ok(bit_count * self.config.oversampling_factor(bit_count)? / 2)
    }
}
