//! Provides input/output for the sequence formats accepted and produced by the pipeline.
//!
//! FASTA-like text files are read line by line for normalization and canonical requests are
//! written back out in the same convention. Structured protein lists can be loaded from TOML.

pub mod fasta;
pub mod proteins;
