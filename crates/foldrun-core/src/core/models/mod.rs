//! # Core Models Module
//!
//! Plain data types describing what the caller wants folded and the engine-ready request
//! derived from it.
//!
//! - [`chain`] - A single amino-acid chain and the protein (monomer or multimer) it belongs to
//! - [`input`] - The tagged union of accepted raw input shapes
//! - [`request`] - The canonical header/sequence request consumed by the engine

pub mod chain;
pub mod input;
pub mod request;
