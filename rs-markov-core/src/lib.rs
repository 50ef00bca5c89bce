//! Word-level n-gram Markov text generation library.
//!
//! This crate provides:
//! - Chain construction from a raw corpus (`ChainBuilder`, `ChainTable`)
//! - Randomized walks over the chain table (`TextGenerator`)
//! - Generation parameters (`GenerationInput`, `StartSeed`)
//! - Small I/O helpers used by the driver binaries
//!
//! The model code is pure: it never touches the filesystem and takes its
//! randomness from a caller-supplied `rand::Rng`.

/// Chain table construction and text generation.
pub mod model;

/// Error type shared by every fallible operation of the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::{MarkovError, MarkovResult};
pub use model::chain_table::{ChainBuilder, ChainTable, NGramKey};
pub use model::generation_input::{GenerationInput, StartSeed};
pub use model::generator::TextGenerator;
