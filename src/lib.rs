//! Reed-Solomon forward error correction over GF(256)
//!
//! The codec lives in [`reed_solomon`]; the other modules are the surfaces
//! around it: hex text persistence, the error-injection experiment and the
//! command-line configuration.

pub mod args;
pub mod config;
pub mod experiment;
pub mod hex_text;
pub mod reed_solomon;
pub mod reporters;

pub use args::build_cli;
pub use config::CoderConfig;
pub use reed_solomon::{
    BlockOutcome, ConfigError, DecodeFailure, DecodeReport, GaloisField, Polynomial,
    ReedSolomonCoder, RsError, RsResult, FAILURE_MARKER,
};
