//! Error types for Reed-Solomon coding
//!
//! Three families, matching how each one is handled:
//! - [`ConfigError`] is fatal and returned from constructors.
//! - [`AlgebraError`] signals a violated precondition in field/polynomial math.
//! - [`DecodeFailure`] marks a single block as irrecoverable; `decode` turns it
//!   into the failure marker and carries on with the next block.

use thiserror::Error;

/// Invalid field or coder parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Field size is not a power of two in the supported range
    #[error("Field size {0} is not a power of two between 2 and 65536")]
    InvalidFieldSize(usize),

    /// Degree of the primitive polynomial does not match log2(size)
    #[error("Primitive polynomial {primitive:#x} does not have degree log2({size})")]
    PrimitiveDegreeMismatch { primitive: u32, size: usize },

    /// Powers of the generator element do not cover every non-zero element
    #[error("Polynomial {primitive:#x} is not primitive over GF({size})")]
    NotPrimitive { primitive: u32, size: usize },

    /// Generator base must be 0 or 1
    #[error("Generator base must be 0 or 1, got {0}")]
    InvalidGeneratorBase(usize),

    /// Symbols are bytes, so the coder needs GF(256)
    #[error("Coder requires a field of size 256, got {0}")]
    FieldSizeMismatch(usize),

    /// Data block cannot hold the failure marker
    #[error("Block length {block_length} is shorter than the {marker_length}-byte failure marker")]
    BlockTooShort {
        block_length: usize,
        marker_length: usize,
    },

    /// At least one parity symbol is required
    #[error("Number of parity symbols must be greater than 0")]
    NoParitySymbols,
}

/// Precondition errors in field and polynomial arithmetic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    #[error("Division by the zero polynomial")]
    DivideByZero,

    #[error("Zero has no multiplicative inverse")]
    InverseOfZero,

    #[error("Logarithm of zero is undefined")]
    LogOfZero,

    /// Operands belong to different fields
    #[error("Polynomials must belong to the same field")]
    FieldMismatch,
}

/// Reasons a single block could not be corrected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// Euclidean remainder reached zero before the stopping degree
    #[error("Euclidean remainder became zero prematurely")]
    PrematureZeroRemainder,

    /// Remainder degree did not decrease during a Euclidean step
    #[error("Euclidean remainder degree {remainder} did not drop below {divisor}")]
    DegreeConditionViolated { remainder: usize, divisor: usize },

    /// Error locator has no constant term, so it cannot be normalised
    #[error("Error locator constant term is zero")]
    SigmaConstantZero,

    /// Syndromes are non-zero but the error locator is a constant
    #[error("Non-zero syndromes with a constant error locator")]
    ConstantErrorLocator,

    /// Chien search found fewer roots than the locator degree
    #[error("Error locator degree is {expected} but only {found} roots were found")]
    MissingLocatorRoots { expected: usize, found: usize },

    /// Located error lies outside the received block
    #[error("Error location {log} is outside a block of {block_length} symbols")]
    PositionOutOfRange { log: usize, block_length: usize },

    #[error(transparent)]
    Algebra(#[from] AlgebraError),
}

/// Any error produced by the codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Algebra error: {0}")]
    Algebra(#[from] AlgebraError),

    #[error("Decode failure: {0}")]
    Decode(#[from] DecodeFailure),
}

/// Type alias for Result with RsError
pub type RsResult<T> = std::result::Result<T, RsError>;
