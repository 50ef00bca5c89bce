//! Top-level module for the word-level Markov chain system.
//!
//! This module provides:
//! - Chain construction from a corpus (`ChainBuilder`, `ChainTable`)
//! - Per-key successor storage (`State`)
//! - Generation parameters (`GenerationInput`)
//! - The random walk itself (`TextGenerator`)

/// Chain table keyed by n-gram, and the builder that fills it.
///
/// Handles tokenization, order validation and successor accumulation.
pub mod chain_table;

/// Randomized walk over a `ChainTable`.
///
/// Selects a start key, extends with uniformly drawn successors and stops
/// on terminal punctuation, on a dead-end key or on the step bound.
pub mod generator;

/// Internal representation of the successors observed after one n-gram.
///
/// This module is not exposed publicly.
mod state;

/// Generation parameters (step bound, excerpt retries, start strategy).
pub mod generation_input;
