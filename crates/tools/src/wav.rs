//! WAV export of simulated waveforms

use anyhow::{Context, Result};
use bersim_core::waveform::Waveform;
use std::path::Path;
use tracing::info;

/// Write `waveform` as mono 16-bit PCM, scaled so the peak maps to full scale
pub fn write_wav_file(waveform: &Waveform, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate().round() as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    if spec.sample_rate == 0 {
        anyhow::bail!("Sample rate {} is too low for WAV output", waveform.sample_rate());
    }

    let peak = waveform.peak_amplitude();
    let scale = if peak > 0.0 { 32767.0 / peak } else { 0.0 };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

    for &sample in waveform.data() {
        let amplitude = (sample * scale).round().clamp(-32767.0, 32767.0) as i16;
        writer.write_sample(amplitude)?;
    }

    writer.finalize()?;
    info!("Wrote {} samples to {:?}", waveform.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    #[test]
    fn test_write_wav_normalises_peak() {
        let waveform = Waveform::from_data(vec![0.0, 2.0, -1.0, -2.0], 8000.0).unwrap();
        let temp_file = Builder::new().suffix(".wav").tempfile().unwrap();

        write_wav_file(&waveform, temp_file.path()).unwrap();

        let mut reader = hound::WavReader::open(temp_file.path()).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 32767, -16384, -32767]);
    }

    #[test]
    fn test_write_wav_silent() {
        let waveform = Waveform::from_data(vec![0.0; 16], 100.0).unwrap();
        let temp_file = Builder::new().suffix(".wav").tempfile().unwrap();

        write_wav_file(&waveform, temp_file.path()).unwrap();

        let mut reader = hound::WavReader::open(temp_file.path()).unwrap();
        assert!(reader.samples::<i16>().all(|s| s.unwrap() == 0));
    }
}
