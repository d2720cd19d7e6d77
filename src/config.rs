//! Codec configuration shared by the command-line front end

use crate::reed_solomon::{ConfigError, GaloisField, ReedSolomonCoder, GF256_PRIMITIVE, GF256_SIZE};
use std::sync::Arc;

/// Data bytes per block by default, as in RS(255, 223)
pub const DEFAULT_BLOCK_LENGTH: usize = 223;

/// Parity bytes per block by default
pub const DEFAULT_PARITY_SYMBOLS: usize = 32;

/// Field and block parameters of a coder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoderConfig {
    pub primitive: u32,
    pub field_size: usize,
    pub generator_base: usize,
    /// Data bytes per block (`k`)
    pub block_length: usize,
    /// Parity bytes per block (`e`)
    pub parity_symbols: usize,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            primitive: GF256_PRIMITIVE,
            field_size: GF256_SIZE,
            generator_base: 0,
            block_length: DEFAULT_BLOCK_LENGTH,
            parity_symbols: DEFAULT_PARITY_SYMBOLS,
        }
    }
}

impl CoderConfig {
    pub fn new(block_length: usize, parity_symbols: usize) -> Self {
        Self {
            block_length,
            parity_symbols,
            ..Self::default()
        }
    }

    pub fn from_args(matches: &clap::ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            primitive: matches
                .get_one::<u32>("primitive")
                .copied()
                .unwrap_or(defaults.primitive),
            field_size: matches
                .get_one::<usize>("field_size")
                .copied()
                .unwrap_or(defaults.field_size),
            generator_base: matches
                .get_one::<usize>("generator_base")
                .copied()
                .unwrap_or(defaults.generator_base),
            block_length: matches
                .get_one::<usize>("block_length")
                .copied()
                .unwrap_or(defaults.block_length),
            parity_symbols: matches
                .get_one::<usize>("parity")
                .copied()
                .unwrap_or(defaults.parity_symbols),
        }
    }

    /// Build the field and a coder over it
    pub fn build_coder(&self) -> Result<ReedSolomonCoder, ConfigError> {
        let field = GaloisField::new(self.primitive, self.field_size, self.generator_base)?;
        ReedSolomonCoder::new(Arc::new(field), self.block_length, self.parity_symbols)
    }
}
