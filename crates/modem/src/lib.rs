//! BERSIM Modem - Modulation and naive demodulation
//!
//! This crate maps bit sequences onto sampled AM, FM and QAM waveforms and
//! scores noisy waveforms against the transmitted bits.

pub mod am;
pub mod common;
pub mod demod;
pub mod error;
pub mod fm;
pub mod qam;

pub use error::{ModemError, Result};

use common::{ModulationConfig, Modulator, Scheme};

/// Build the modulator for `scheme`
pub fn modulator_for(scheme: Scheme, config: ModulationConfig) -> Box<dyn Modulator> {
    match scheme {
        Scheme::Am => Box::new(am::AmModulator::new(config)),
        Scheme::Fm => Box::new(fm::FmModulator::new(config)),
        Scheme::Qam => Box::new(qam::QamModulator::new(config)),
    }
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        am::AmModulator,
        common::{expand_bits, ModulationConfig, Modulator, Scheme},
        demod::{calculate_ber, Demodulator, NaiveDemodulator},
        error::{ModemError, Result},
        fm::FmModulator,
        modulator_for,
        qam::QamModulator,
    };
}
