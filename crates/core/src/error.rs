//! Error types for BERSIM Core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate { rate: f64 },

    #[error("Invalid bit count: {count} (must be greater than 0)")]
    InvalidBitCount { count: usize },

    #[error("Invalid bit value {value} at index {index}")]
    InvalidBit { index: usize, value: u8 },

    #[error("Invalid SNR: {snr_db} dB")]
    InvalidSnr { snr_db: f64 },

    #[error("Degenerate signal: {msg}")]
    DegenerateSignal { msg: String },
}

/// Result type for BERSIM Core operations
pub type Result<T> = std::result::Result<T, CoreError>;
