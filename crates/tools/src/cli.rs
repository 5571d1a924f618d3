//! Command-line interface for the `bersim` binary

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use bersim_core::bits;
use bersim_core::channel::add_awgn;
use bersim_modem::prelude::*;

use crate::config::ExperimentConfig;
use crate::experiment::Experiment;
use crate::report::{reporter_for, ReportFormat};
use crate::wav::write_wav_file;

/// BER simulation of AM, FM and QAM over an AWGN channel
#[derive(Parser, Debug)]
#[command(name = "bersim")]
#[command(about = "BER vs SNR simulation for AM, FM and QAM")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep SNR and report BER per scheme
    Run(RunArgs),
    /// Export one scheme's waveform as WAV
    Waveform(WaveformArgs),
    /// Write the default configuration to a file
    InitConfig {
        /// Destination (TOML, or JSON with a .json extension)
        path: PathBuf,
    },
    /// Show schemes and defaults
    Info,
}

/// Experiment parameters shared by subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct ExperimentArgs {
    /// Configuration file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of random bits
    #[arg(long)]
    pub bits: Option<usize>,

    /// Sampling rate in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Carrier frequency in Hz
    #[arg(long)]
    pub carrier: Option<f64>,

    /// Signal duration in seconds
    #[arg(long)]
    pub duration: Option<f64>,

    /// FM frequency deviation in Hz
    #[arg(long)]
    pub freq_dev: Option<f64>,

    /// Comma-separated SNR sweep in dB
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub snr: Option<Vec<f64>>,

    /// Scheme to simulate (am, fm, qam); repeat for several
    #[arg(long = "scheme")]
    pub schemes: Vec<Scheme>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ExperimentArgs {
    /// Merge the configuration file (or defaults) with command-line overrides
    pub fn resolve(&self) -> Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_file(path)?,
            None => ExperimentConfig::default(),
        };
        let from_file = self.config.is_some();

        fn set<T>(target: &mut T, value: Option<T>, name: &str, from_file: bool) {
            if let Some(value) = value {
                if from_file {
                    warn!("Command-line {} overrides configuration file", name);
                }
                *target = value;
            }
        }

        set(&mut config.bit_count, self.bits, "bits", from_file);
        set(&mut config.sample_rate, self.sample_rate, "sample rate", from_file);
        set(&mut config.carrier_frequency, self.carrier, "carrier", from_file);
        set(&mut config.duration, self.duration, "duration", from_file);
        set(&mut config.freq_deviation, self.freq_dev, "frequency deviation", from_file);
        set(&mut config.snr_values, self.snr.clone(), "SNR sweep", from_file);
        if !self.schemes.is_empty() {
            set(&mut config.schemes, Some(self.schemes.clone()), "schemes", from_file);
        }
        if self.seed.is_some() {
            set(&mut config.seed, Some(self.seed), "seed", from_file);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `bersim run`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,

    /// Report format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments of `bersim waveform`
#[derive(Args, Debug, Clone)]
pub struct WaveformArgs {
    /// Scheme whose waveform is exported (am, fm, qam)
    pub modulation: Scheme,

    /// Output WAV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Add AWGN at this SNR in dB before export
    #[arg(long, allow_hyphen_values = true)]
    pub noise_snr: Option<f64>,

    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

/// Dispatch a parsed command line
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run(&args),
        Commands::Waveform(args) => export_waveform(&args),
        Commands::InitConfig { path } => init_config(&path),
        Commands::Info => {
            show_info(&mut io::stdout().lock())?;
            Ok(())
        }
    }
}

/// Run a sweep and hand the result to the selected reporter
pub fn run(args: &RunArgs) -> Result<()> {
    let config = args.experiment.resolve()?;
    info!("Starting sweep over {:?} dB", config.snr_values);

    let experiment = Experiment::new(config)?;
    let result = experiment.run()?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create report: {:?}", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    reporter_for(args.format, writer).report(&result)?;

    if let Some(path) = &args.output {
        info!("Report written to {:?}", path);
    }
    Ok(())
}

/// Modulate one random bit sequence and write it as WAV
pub fn export_waveform(args: &WaveformArgs) -> Result<()> {
    let config = args.experiment.resolve()?;
    let experiment = Experiment::new(config)?;
    let mut rng = experiment.rng();

    let bits = bits::generate(experiment.config().bit_count, &mut rng)?;
    let modulator = modulator_for(args.modulation, experiment.config().modulation_config()?);
    let mut waveform = modulator.modulate(&bits)?;

    if let Some(snr_db) = args.noise_snr {
        waveform = add_awgn(&waveform, snr_db, &mut rng)
            .with_context(|| format!("Failed to add noise at {} dB", snr_db))?;
    }

    write_wav_file(&waveform, &args.output)?;
    println!(
        "{} waveform: {} samples written to {:?}",
        args.modulation,
        waveform.len(),
        args.output
    );
    Ok(())
}

/// Write the default configuration
pub fn init_config(path: &Path) -> Result<()> {
    ExperimentConfig::default().save_to_file(path)?;
    println!("Default configuration written to {:?}", path);
    Ok(())
}

/// Print schemes and default parameters
pub fn show_info<W: Write>(out: &mut W) -> Result<()> {
    let defaults = ExperimentConfig::default();

    writeln!(out, "Modulation schemes:")?;
    writeln!(out, "  AM   (1 + b) cos(2π fc t)")?;
    writeln!(out, "  FM   cos(2π fc t + 2π Δf ∫b)")?;
    writeln!(out, "  QAM  I cos(2π fc t) - Q sin(2π fc t), half-length output")?;
    writeln!(out)?;
    writeln!(out, "Defaults:")?;
    writeln!(out, "  bits               {}", defaults.bit_count)?;
    writeln!(out, "  sample rate        {} Hz", defaults.sample_rate)?;
    writeln!(out, "  carrier            {} Hz", defaults.carrier_frequency)?;
    writeln!(out, "  duration           {} s", defaults.duration)?;
    writeln!(out, "  FM deviation       {} Hz", defaults.freq_deviation)?;
    writeln!(out, "  SNR sweep          {:?} dB", defaults.snr_values)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::Builder;

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "bersim", "run", "--bits", "100", "--sample-rate", "1000", "--snr", "-5,0,5",
            "--scheme", "qam", "--scheme", "am", "--seed", "3", "--format", "csv",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.format, ReportFormat::Csv);

        let config = args.experiment.resolve().unwrap();
        assert_eq!(config.bit_count, 100);
        assert_eq!(config.sample_rate, 1000.0);
        assert_eq!(config.snr_values, vec![-5.0, 0.0, 5.0]);
        assert_eq!(config.scheme_order(), vec![Scheme::Am, Scheme::Qam]);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_resolve_defaults() {
        let config = ExperimentArgs::default().resolve().unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_resolve_rejects_bad_grid() {
        let args = ExperimentArgs {
            bits: Some(300),
            ..ExperimentArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_config_file_with_override() {
        let temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
        std::fs::write(temp_file.path(), "bit_count = 500\nseed = 8\n").unwrap();

        let args = ExperimentArgs {
            config: Some(temp_file.path().to_path_buf()),
            seed: Some(9),
            ..ExperimentArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.bit_count, 500);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_run_writes_report_file() {
        let report = Builder::new().suffix(".csv").tempfile().unwrap();
        let cli = Cli::try_parse_from([
            "bersim",
            "run",
            "--bits",
            "50",
            "--sample-rate",
            "500",
            "--carrier",
            "50",
            "--seed",
            "1",
            "--format",
            "csv",
            "--output",
            report.path().to_str().unwrap(),
        ])
        .unwrap();

        execute(cli).unwrap();

        let content = std::fs::read_to_string(report.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "snr_db,AM,FM,QAM");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_waveform_export() {
        let wav = Builder::new().suffix(".wav").tempfile().unwrap();
        let cli = Cli::try_parse_from([
            "bersim",
            "waveform",
            "fm",
            "--output",
            wav.path().to_str().unwrap(),
            "--noise-snr",
            "10",
            "--bits",
            "100",
            "--seed",
            "4",
        ])
        .unwrap();

        execute(cli).unwrap();

        let reader = hound::WavReader::open(wav.path()).unwrap();
        assert_eq!(reader.len(), 10_000);
        assert_eq!(reader.spec().sample_rate, 10_000);
    }

    #[test]
    fn test_init_config_round_trip() {
        let path = Builder::new().suffix(".json").tempfile().unwrap();
        init_config(path.path()).unwrap();

        let loaded = ExperimentConfig::from_file(path.path()).unwrap();
        assert_eq!(loaded, ExperimentConfig::default());
    }

    #[test]
    fn test_show_info_lists_schemes() {
        let mut out = Vec::new();
        show_info(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("QAM"));
        assert!(text.contains("10000 Hz"));
    }
}
