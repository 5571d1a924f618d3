//! Error types for BERSIM Modem

use thiserror::Error;

/// Modem error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModemError {
    #[error("Unsupported modulation: {name}")]
    UnsupportedModulation { name: String },

    #[error("Invalid modulation parameters: {msg}")]
    InvalidParameters { msg: String },

    #[error("Core error: {0}")]
    Core(#[from] bersim_core::CoreError),
}

/// Result type for BERSIM Modem operations
pub type Result<T> = std::result::Result<T, ModemError>;
