//! BERSIM Core - bit sources, waveforms and channel models
//!
//! This crate provides the random bit source, the real-valued waveform
//! type shared by every modulator, and the AWGN channel used to corrupt
//! waveforms at a requested SNR.

pub mod bits;
pub mod channel;
pub mod error;
pub mod waveform;

pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        bits::{generate, BitSequence},
        channel::{add_awgn, AwgnChannel},
        error::{CoreError, Result},
        waveform::Waveform,
    };
}
