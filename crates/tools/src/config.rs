//! Configuration management for BER experiments

use anyhow::{Context, Result};
use bersim_modem::common::{ModulationConfig, Scheme, DEFAULT_FREQ_DEVIATION};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Experiment configuration.
///
/// Every field has a default, so configuration files only need the values
/// they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of random bits transmitted per run
    pub bit_count: usize,
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Carrier frequency in Hz
    pub carrier_frequency: f64,
    /// Signal duration in seconds
    pub duration: f64,
    /// FM frequency deviation in Hz
    pub freq_deviation: f64,
    /// SNR sweep in dB, in reporting order
    pub snr_values: Vec<f64>,
    /// Schemes to simulate
    pub schemes: Vec<Scheme>,
    /// Seed for the shared random generator; OS entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            bit_count: 1000,
            sample_rate: 10_000.0,
            carrier_frequency: 1_000.0,
            duration: 1.0,
            freq_deviation: DEFAULT_FREQ_DEVIATION,
            snr_values: vec![0.0, 5.0, 10.0, 15.0, 20.0],
            schemes: Scheme::ALL.to_vec(),
            seed: None,
        }
    }
}

impl ExperimentConfig {
    /// Check everything that can be checked before any bits are drawn
    pub fn validate(&self) -> Result<()> {
        if self.bit_count == 0 {
            anyhow::bail!("Bit count must be greater than 0");
        }

        if self.snr_values.is_empty() {
            anyhow::bail!("SNR sweep must contain at least one value");
        }

        if let Some(snr) = self.snr_values.iter().find(|snr| !snr.is_finite()) {
            anyhow::bail!("SNR values must be finite, got {}", snr);
        }

        if self.schemes.is_empty() {
            anyhow::bail!("At least one modulation scheme must be selected");
        }

        self.modulation_config()?
            .oversampling_factor(self.bit_count)
            .context("Sampling grid does not fit the bit count")?;

        Ok(())
    }

    /// Modulation parameters shared by every scheme
    pub fn modulation_config(&self) -> Result<ModulationConfig> {
        let config = ModulationConfig::new(self.sample_rate, self.carrier_frequency, self.duration)
            .context("Invalid modulation parameters")?
            .with_freq_deviation(self.freq_deviation)
            .context("Invalid frequency deviation")?;
        Ok(config)
    }

    /// Selected schemes in simulation order, without duplicates
    pub fn scheme_order(&self) -> Vec<Scheme> {
        let mut schemes = self.schemes.clone();
        schemes.sort();
        schemes.dedup();
        schemes
    }

    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        load_config(path)
    }

    /// Save configuration to a TOML or JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        save_config(self, path)
    }
}

/// Load configuration from file, JSON for `.json` paths and TOML otherwise
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    if is_json(path) {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config file: {:?}", path))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {:?}", path))
    }
}

/// Save configuration to file
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(config).context("Failed to serialize config")?
    } else {
        toml::to_string_pretty(config).context("Failed to serialize config")?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}
