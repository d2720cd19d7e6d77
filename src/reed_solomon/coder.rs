//! Block Reed-Solomon coder over GF(256)
//!
//! Messages are cut into `k`-byte data blocks. Each block becomes a
//! `(k + e)`-byte codeword: the data followed by `e` parity bytes, the
//! remainder of `data(x) * x^e` divided by the generator polynomial.
//! A codeword with at most `e / 2` corrupted bytes decodes back to its data.
//!
//! Blocks that cannot be corrected are replaced by [`FAILURE_MARKER`] padded
//! with [`MARKER_FILLER`] in the output of [`ReedSolomonCoder::decode`].
//! [`ReedSolomonCoder::decode_report`] exposes the per-block outcome instead.

use super::decoder;
use super::error::{ConfigError, DecodeFailure, RsResult};
use super::galois::{GaloisField, GF256_SIZE};
use super::poly::Polynomial;
use log::{debug, warn};
use std::sync::{Arc, PoisonError, RwLock};

/// Published marker that stands in for an irrecoverable data block
pub const FAILURE_MARKER: &[u8; 11] = b"***ERROR***";

/// Pads the marker up to the data block length
pub const MARKER_FILLER: u8 = b' ';

/// Append-only generator polynomials indexed by degree
#[derive(Debug)]
struct GeneratorCache {
    generators: RwLock<Vec<Polynomial>>,
}

impl GeneratorCache {
    fn new(field: &Arc<GaloisField>) -> Self {
        Self {
            generators: RwLock::new(vec![Polynomial::one(field)]),
        }
    }

    /// `g(d) = g(d-1) * (x + α^(d-1+b))`, built in increasing degree
    fn get(&self, field: &Arc<GaloisField>, degree: usize) -> RsResult<Polynomial> {
        {
            let generators = self
                .generators
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(generator) = generators.get(degree) {
                return Ok(generator.clone());
            }
        }

        let mut generators = self
            .generators
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another writer may have extended the cache in the meantime
        while generators.len() <= degree {
            let d = generators.len();
            let factor = Polynomial::new(
                Arc::clone(field),
                vec![1, field.exp(d - 1 + field.generator_base())],
            );
            let next = generators[d - 1].multiply(&factor)?;
            generators.push(next);
        }
        debug!("Generator polynomial cache extended to degree {}", degree);
        Ok(generators[degree].clone())
    }
}

/// Result of decoding one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    /// All syndromes were zero
    Clean,
    /// Errors were corrected at these byte offsets within the codeword
    Corrected { positions: Vec<usize> },
    /// The block could not be corrected
    Failed(DecodeFailure),
}

/// One decoded data block together with how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBlock {
    pub index: usize,
    /// `k` data bytes; for failed blocks, the uncorrected received data
    pub data: Vec<u8>,
    pub outcome: BlockOutcome,
}

impl DecodedBlock {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, BlockOutcome::Failed(_))
    }
}

/// Per-block results of a decode call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub blocks: Vec<DecodedBlock>,
}

impl DecodeReport {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn failed_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_failed()).count()
    }

    /// Total number of symbols corrected across all blocks
    pub fn corrected_symbols(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| match &b.outcome {
                BlockOutcome::Corrected { positions } => positions.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Concatenate block data, substituting `marker` for failed blocks
    pub fn to_bytes(&self, marker: &[u8]) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.blocks.len() * marker.len());
        for block in &self.blocks {
            if block.is_failed() {
                result.extend_from_slice(marker);
            } else {
                result.extend_from_slice(&block.data);
            }
        }
        result
    }
}

/// Reed-Solomon encoder/decoder for byte buffers
#[derive(Debug)]
pub struct ReedSolomonCoder {
    field: Arc<GaloisField>,
    /// Data bytes per block (`k`)
    block_length: usize,
    /// Parity bytes per block (`e`)
    parity_symbols: usize,
    generators: GeneratorCache,
    /// Marker padded to `block_length`
    failure_block: Vec<u8>,
}

impl ReedSolomonCoder {
    pub fn new(
        field: Arc<GaloisField>,
        block_length: usize,
        parity_symbols: usize,
    ) -> Result<Self, ConfigError> {
        if field.size() != GF256_SIZE {
            return Err(ConfigError::FieldSizeMismatch(field.size()));
        }
        if block_length < FAILURE_MARKER.len() {
            return Err(ConfigError::BlockTooShort {
                block_length,
                marker_length: FAILURE_MARKER.len(),
            });
        }
        if parity_symbols == 0 {
            return Err(ConfigError::NoParitySymbols);
        }
        if block_length + parity_symbols > field.size() - 1 {
            warn!(
                "Codeword length {} exceeds {} symbols; error positions become ambiguous",
                block_length + parity_symbols,
                field.size() - 1
            );
        }

        let mut failure_block = vec![MARKER_FILLER; block_length];
        failure_block[..FAILURE_MARKER.len()].copy_from_slice(FAILURE_MARKER);

        Ok(Self {
            generators: GeneratorCache::new(&field),
            field,
            block_length,
            parity_symbols,
            failure_block,
        })
    }

    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    pub fn block_length(&self) -> usize {
        self.block_length
    }

    pub fn parity_symbols(&self) -> usize {
        self.parity_symbols
    }

    /// Bytes per encoded block (`k + e`)
    pub fn codeword_length(&self) -> usize {
        self.block_length + self.parity_symbols
    }

    /// Data block emitted in place of an irrecoverable block
    pub fn failure_block(&self) -> &[u8] {
        &self.failure_block
    }

    /// Generator polynomial of the given degree
    pub fn generator(&self, degree: usize) -> RsResult<Polynomial> {
        self.generators.get(&self.field, degree)
    }

    /// Encode `message`, zero-padding the final data block
    pub fn encode(&self, message: &[u8]) -> RsResult<Vec<u8>> {
        let codeword_length = self.codeword_length();
        let blocks_count = message.len().div_ceil(self.block_length);
        let mut result = Vec::with_capacity(blocks_count * codeword_length);

        let generator = self.generator(self.parity_symbols)?;
        for chunk in message.chunks(self.block_length) {
            let mut block = vec![0u8; codeword_length];
            block[..chunk.len()].copy_from_slice(chunk);
            self.encode_block(&generator, &mut block)?;
            result.extend_from_slice(&block);
        }

        debug!(
            "Encoded {} bytes into {} blocks of {} bytes",
            message.len(),
            blocks_count,
            codeword_length
        );
        Ok(result)
    }

    /// Fill the parity bytes of `block` from its first `k` bytes
    fn encode_block(&self, generator: &Polynomial, block: &mut [u8]) -> RsResult<()> {
        let ec_bytes = self.parity_symbols;
        let data_bytes = block.len() - ec_bytes;

        let info = Polynomial::new(
            Arc::clone(&self.field),
            block[..data_bytes].iter().map(|&b| b as u16).collect(),
        )
        .multiply_by_monomial(ec_bytes, 1);

        let (_, remainder) = info.divide(generator)?;
        let coefficients = remainder.coefficients();
        let num_zero_coefficients = ec_bytes - coefficients.len();

        let parity = &mut block[data_bytes..];
        parity[..num_zero_coefficients].fill(0);
        for (slot, &c) in parity[num_zero_coefficients..]
            .iter_mut()
            .zip(coefficients.iter())
        {
            *slot = c as u8;
        }
        Ok(())
    }

    /// Decode `codeword`, substituting the failure block for irrecoverable blocks
    ///
    /// Always returns `blocks * k` bytes.
    pub fn decode(&self, codeword: &[u8]) -> Vec<u8> {
        self.decode_report(codeword).to_bytes(&self.failure_block)
    }

    /// Decode `codeword`, reporting the outcome of every block
    pub fn decode_report(&self, codeword: &[u8]) -> DecodeReport {
        let codeword_length = self.codeword_length();
        let blocks = codeword
            .chunks(codeword_length)
            .enumerate()
            .map(|(index, chunk)| {
                // Short trailing block is zero-padded before syndrome computation
                let mut received = vec![0u16; codeword_length];
                for (slot, &b) in received.iter_mut().zip(chunk.iter()) {
                    *slot = b as u16;
                }
                self.decode_block(index, received)
            })
            .collect::<Vec<_>>();

        let report = DecodeReport { blocks };
        debug!(
            "Decoded {} blocks: {} failed, {} symbols corrected",
            report.block_count(),
            report.failed_count(),
            report.corrected_symbols()
        );
        report
    }

    fn decode_block(&self, index: usize, mut received: Vec<u16>) -> DecodedBlock {
        let outcome =
            match decoder::correct_errors(&self.field, &mut received, self.parity_symbols) {
                Ok(positions) if positions.is_empty() => BlockOutcome::Clean,
                Ok(positions) => BlockOutcome::Corrected { positions },
                Err(failure) => {
                    debug!("Block {} is irrecoverable: {}", index, failure);
                    BlockOutcome::Failed(failure)
                }
            };

        DecodedBlock {
            index,
            data: received[..self.block_length]
                .iter()
                .map(|&s| s as u8)
                .collect(),
            outcome,
        }
    }
}
