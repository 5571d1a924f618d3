//! SNR sweep driver

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

use bersim_core::bits::{self, BitSequence};
use bersim_core::channel::AwgnChannel;
use bersim_modem::demod::{self, NaiveDemodulator};
use bersim_modem::prelude::*;

use crate::common::ProgressReporter;
use crate::config::ExperimentConfig;

/// BER curves of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    /// SNR sweep in dB
    pub snr_values: Vec<f64>,
    /// BER per scheme, one value per SNR in sweep order
    pub ber: BTreeMap<Scheme, Vec<f64>>,
}

impl ExperimentResult {
    /// BER curve for `scheme`
    pub fn curve(&self, scheme: Scheme) -> Option<&[f64]> {
        self.ber.get(&scheme).map(Vec::as_slice)
    }

    /// Simulated schemes in order
    pub fn schemes(&self) -> impl Iterator<Item = Scheme> + '_ {
        self.ber.keys().copied()
    }

    /// Rows of `(snr, ber per scheme)` in sweep order
    pub fn rows(&self) -> impl Iterator<Item = (f64, Vec<f64>)> + '_ {
        self.snr_values.iter().enumerate().map(move |(i, &snr)| {
            let bers = self
                .ber
                .values()
                .map(|curve| curve.get(i).copied().unwrap_or(f64::NAN))
                .collect();
            (snr, bers)
        })
    }
}

/// Runs modulate, noise, demodulate and score for every (SNR, scheme) pair
pub struct Experiment {
    config: ExperimentConfig,
    modulators: Vec<Box<dyn Modulator>>,
    demodulator: NaiveDemodulator,
}

impl Experiment {
    /// Create an experiment, failing fast on invalid configuration
    pub fn new(config: ExperimentConfig) -> Result<Self> {
        config.validate()?;

        let mod_config = config.modulation_config()?;
        let modulators = config
            .scheme_order()
            .into_iter()
            .map(|scheme| modulator_for(scheme, mod_config.clone()))
            .collect();

        Ok(Self {
            config,
            modulators,
            demodulator: NaiveDemodulator,
        })
    }

    /// Experiment configuration
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Build the shared generator from the configured seed
    pub fn rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Run the sweep with a generator built from the configuration
    pub fn run(&self) -> Result<ExperimentResult> {
        let mut rng = self.rng();
        self.run_with_rng(&mut rng)
    }

    /// Draw the bit sequence from `rng`, then sweep with the same generator
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ExperimentResult> {
        let bits = bits::generate(self.config.bit_count, rng)
            .context("Failed to generate bit sequence")?;
        self.run_with_bits(&bits, rng)
    }

    /// Sweep every configured SNR over a fixed bit sequence
    pub fn run_with_bits<R: Rng + ?Sized>(
        &self,
        bits: &BitSequence,
        rng: &mut R,
    ) -> Result<ExperimentResult> {
        let start_time = Instant::now();
        info!(
            "Simulating {} bits over {} SNR values for {} schemes",
            bits.len(),
            self.config.snr_values.len(),
            self.modulators.len()
        );

        let mut ber: BTreeMap<Scheme, Vec<f64>> = self
            .modulators
            .iter()
            .map(|m| (m.scheme(), Vec::with_capacity(self.config.snr_values.len())))
            .collect();

        let mut progress =
            ProgressReporter::new(self.config.snr_values.len() * self.modulators.len());

        for &snr_db in &self.config.snr_values {
            let channel = AwgnChannel::new(snr_db)?;

            for modulator in &self.modulators {
                let scheme = modulator.scheme();
                let value = self
                    .simulate(&**modulator, &channel, bits, rng)
                    .with_context(|| format!("{} simulation failed at {} dB", scheme, snr_db))?;

                debug!("{} at {} dB: BER = {:.4}", scheme, snr_db, value);
                ber.entry(scheme).or_default().push(value);
                progress.advance();
            }
        }

        progress.complete();
        info!("Sweep finished in {:?}", start_time.elapsed());

        Ok(ExperimentResult {
            snr_values: self.config.snr_values.clone(),
            ber,
        })
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        modulator: &dyn Modulator,
        channel: &AwgnChannel,
        bits: &BitSequence,
        rng: &mut R,
    ) -> Result<f64> {
        let clean = modulator.modulate(bits)?;
        let noisy = channel.apply(&clean, rng)?;
        Ok(demod::score(&self.demodulator, bits, &noisy))
    }
}
