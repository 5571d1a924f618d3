//! Naive demodulation and bit error rate scoring

use bersim_core::waveform::Waveform;

/// Generic demodulator trait
pub trait Demodulator {
    /// Recover up to `bit_count` symbol decisions from `samples`
    fn demodulate(&self, samples: &Waveform, bit_count: usize) -> Vec<i64>;
}

/// Rounds every sample to the nearest integer (ties to even) and keeps the
/// first `bit_count` results.
///
/// There is no carrier removal or symbol integration, so FM and QAM decisions
/// are wrong even without noise. BER curves produced with this decision rule
/// compare waveforms, not receivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveDemodulator;

impl Demodulator for NaiveDemodulator {
    fn demodulate(&self, samples: &Waveform, bit_count: usize) -> Vec<i64> {
        samples
            .data()
            .iter()
            .take(bit_count)
            .map(|s| s.round_ties_even() as i64)
            .collect()
    }
}

/// Fraction of positions where `received` differs from `original`.
///
/// Only the first `min(original.len(), received.len())` positions are
/// compared; an empty overlap scores 0.0.
pub fn calculate_ber<A, B>(original: &[A], received: &[B]) -> f64
where
    A: Copy + Into<i64>,
    B: Copy + Into<i64>,
{
    let compared = original.len().min(received.len());
    if compared == 0 {
        return 0.0;
    }

    let errors = original
        .iter()
        .zip(received)
        .filter(|&(&a, &b)| Into::<i64>::into(a) != Into::<i64>::into(b))
        .count();

    errors as f64 / compared as f64
}

/// Demodulate `noisy` and score it against `bits`
pub fn score<D: Demodulator + ?Sized>(demodulator: &D, bits: &[u8], noisy: &Waveform) -> f64 {
    let decisions = demodulator.demodulate(noisy, bits.len());
    calculate_ber(bits, decisions.as_slice())
}
