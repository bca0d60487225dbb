//! # foldrun Core Library
//!
//! Prepares protein sequence input for an external structure prediction engine, supervises the
//! engine while it runs, and lays out its raw output as a stable artifact tree.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Chain`, `Protein`, `RawInput`,
//!   `CanonicalRequest`), the sequence normalization policy and validator, and request file I/O.
//!
//! - **[`engine`]: The Supervisor.** Run parameters and their clamping bounds, the engine
//!   invocation contract, the ordered failure signature table and the streaming runner that
//!   classifies engine output while the process is still executing.
//!
//! - **[`artifacts`]: The Layout.** Splits a raw output directory into `results/` and `other/`
//!   using filesystem moves only.
//!
//! - **[`workflows`]: The Public API.** Ties the layers together into one sequential pipeline
//!   per request.

pub mod artifacts;
pub mod core;
pub mod engine;
pub mod workflows;
