//! BERSIM Tools library

pub mod cli;
pub mod common;
pub mod config;
pub mod experiment;
pub mod report;
pub mod wav;

pub use common::{init_logging, ProgressReporter};
pub use config::ExperimentConfig;
pub use experiment::{Experiment, ExperimentResult};
pub use report::{ReportFormat, Reporter};
