//! Random binary symbol source

use crate::{CoreError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Immutable sequence of binary symbols, each 0 or 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Build a sequence from explicit bits
    pub fn from_bits(bits: Vec<u8>) -> Result<Self> {
        if bits.is_empty() {
            return Err(CoreError::InvalidBitCount { count: 0 });
        }

        if let Some((index, &value)) = bits.iter().enumerate().find(|&(_, &b)| b > 1) {
            return Err(CoreError::InvalidBit { index, value });
        }

        Ok(Self { bits })
    }

    /// Number of 1 bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

impl Deref for BitSequence {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bits
    }
}

impl AsRef<[u8]> for BitSequence {
    fn as_ref(&self) -> &[u8] {
        &self.bits
    }
}

/// Draw `count` independent, equiprobable bits from `rng`
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<BitSequence> {
    if count == 0 {
        return Err(CoreError::InvalidBitCount { count });
    }

    let bits = (0..count).map(|_| u8::from(rng.gen::<bool>())).collect();
    tracing::debug!("Generated {} random bits", count);

    Ok(BitSequence { bits })
}
