//! Additive White Gaussian Noise channel
//!
//! Noise power is calibrated against the measured power of the waveform
//! being corrupted, so the requested SNR holds for any signal amplitude.

use crate::waveform::Waveform;
use crate::{CoreError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// AWGN channel at a fixed SNR
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AwgnChannel {
    snr_db: f64,
}

impl AwgnChannel {
    /// Create a channel for the given SNR in decibels
    pub fn new(snr_db: f64) -> Result<Self> {
        if !snr_db.is_finite() {
            return Err(CoreError::InvalidSnr { snr_db });
        }
        Ok(Self { snr_db })
    }

    /// Configured SNR in decibels
    pub fn snr_db(&self) -> f64 {
        self.snr_db
    }

    /// Noise power that yields this channel's SNR for `signal_power`
    pub fn noise_power(&self, signal_power: f64) -> f64 {
        signal_power / 10f64.powf(self.snr_db / 10.0)
    }

    /// Return a noisy copy of `waveform`.
    ///
    /// Empty, zero-power and non-finite waveforms are rejected with
    /// [`CoreError::DegenerateSignal`] instead of producing NaN noise.
    pub fn apply<R: Rng + ?Sized>(&self, waveform: &Waveform, rng: &mut R) -> Result<Waveform> {
        if waveform.is_empty() {
            return Err(CoreError::DegenerateSignal {
                msg: "waveform has no samples".to_string(),
            });
        }

        let signal_power = waveform.power();
        if !signal_power.is_finite() || signal_power <= 0.0 {
            return Err(CoreError::DegenerateSignal {
                msg: format!("signal power is {}", signal_power),
            });
        }

        let noise_power = self.noise_power(signal_power);
        let normal = Normal::new(0.0, noise_power.sqrt()).map_err(|e| CoreError::DegenerateSignal {
            msg: format!("cannot build noise distribution: {}", e),
        })?;

        tracing::trace!(
            snr_db = self.snr_db,
            signal_power,
            noise_power,
            samples = waveform.len(),
            "Injecting AWGN"
        );

        let noisy = waveform
            .data()
            .iter()
            .map(|&s| s + normal.sample(rng))
            .collect();

        Waveform::from_data(noisy, waveform.sample_rate())
    }
}

/// Add AWGN to `waveform` at `snr_db`
pub fn add_awgn<R: Rng + ?Sized>(waveform: &Waveform, snr_db: f64, rng: &mut R) -> Result<Waveform> {
    AwgnChannel::new(snr_db)?.apply(waveform, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tone(len: usize, amplitude: f64) -> Waveform {
        let data = (0..len)
            .map(|i| amplitude * (2.0 * std::f64::consts::PI * i as f64 / 16.0).cos())
            .collect();
        Waveform::from_data(data, 1000.0).unwrap()
    }

    #[test]
    fn test_noise_power_conversion() {
        let channel = AwgnChannel::new(10.0).unwrap();
        assert!((channel.noise_power(2.0) - 0.2).abs() < 1e-12);

        let channel = AwgnChannel::new(0.0).unwrap();
        assert!((channel.noise_power(3.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_preserves_length_and_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let clean = tone(500, 1.0);
        let noisy = add_awgn(&clean, 10.0, &mut rng).unwrap();

        assert_eq!(noisy.len(), clean.len());
        assert_eq!(noisy.sample_rate(), clean.sample_rate());
    }

    #[test]
    fn test_zero_db_doubles_power() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let clean = tone(100_000, 1.0);
        let noisy = add_awgn(&clean, 0.0, &mut rng).unwrap();

        let ratio = noisy.power() / clean.power();
        assert!((ratio - 2.0).abs() < 0.05, "power ratio {} should be near 2", ratio);
    }

    #[test]
    fn test_noise_matches_requested_snr() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let clean = tone(100_000, 3.0);
        let noisy = add_awgn(&clean, 20.0, &mut rng).unwrap();

        let noise_power: f64 = noisy
            .data()
            .iter()
            .zip(clean.data())
            .map(|(n, c)| (n - c).powi(2))
            .sum::<f64>()
            / clean.len() as f64;
        let snr = 10.0 * (clean.power() / noise_power).log10();
        assert!((snr - 20.0).abs() < 0.2, "measured SNR {} should be near 20 dB", snr);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let clean = tone(64, 1.0);
        let mut rng1 = ChaCha8Rng::seed_from_u64(5);
        let mut rng2 = ChaCha8Rng::seed_from_u64(5);

        assert_eq!(
            add_awgn(&clean, 5.0, &mut rng1).unwrap(),
            add_awgn(&clean, 5.0, &mut rng2).unwrap()
        );
    }

    #[test]
    fn test_degenerate_signals_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let silent = Waveform::from_data(vec![0.0; 32], 1000.0).unwrap();
        assert!(matches!(
            add_awgn(&silent, 10.0, &mut rng),
            Err(CoreError::DegenerateSignal { .. })
        ));

        let empty = Waveform::from_data(Vec::new(), 1000.0).unwrap();
        assert!(matches!(
            add_awgn(&empty, 10.0, &mut rng),
            Err(CoreError::DegenerateSignal { .. })
        ));
    }

    #[test]
    fn test_invalid_snr_rejected() {
        assert!(AwgnChannel::new(f64::NAN).is_err());
        assert!(AwgnChannel::new(f64::INFINITY).is_err());
    }
}
