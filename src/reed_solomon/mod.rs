//! Reed-Solomon Error Correction Module
//!
//! Block Reed-Solomon coding over GF(2^8): exp/log table field arithmetic,
//! polynomial algebra, and an encode/decode pipeline built from syndromes,
//! the Euclidean key-equation solver, Chien search and Forney's algorithm.

pub mod coder;
pub mod decoder;
pub mod error;
pub mod galois;
pub mod poly;

pub use coder::*;
pub use error::*;
pub use galois::*;
pub use poly::*;
