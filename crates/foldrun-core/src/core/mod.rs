//! # Core Module
//!
//! This module provides the building blocks shared by every stage of a prediction run.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Chains, proteins, the raw input union and the canonical request
//! - **Sequence Normalization** ([`sequence`]) - Validation policy and the normalizer that turns
//!   any raw input shape into one canonical request
//! - **File I/O** ([`io`]) - Reading FASTA-like input, writing canonical requests and loading
//!   structured protein lists from TOML

pub mod io;
pub mod models;
pub mod sequence;
