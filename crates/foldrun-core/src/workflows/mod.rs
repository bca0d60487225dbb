//! # Workflows Module
//!
//! High-level entry points that run the whole pipeline for one request.
//!
//! ## Overview
//!
//! A workflow owns the sequencing of the lower layers: the input is normalized and written
//! before the engine is launched, and the engine has finished before its output is partitioned.
//! Every failure is terminal for the request and is reported to the caller as a notice before
//! it is returned.
//!
//! ## Architecture
//!
//! - **Fold Workflow** ([`fold`]) - Normalization, run parameter clamping, supervised engine
//!   execution and artifact partitioning

pub mod fold;
