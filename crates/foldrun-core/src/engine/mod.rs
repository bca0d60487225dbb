//! # Engine Module
//!
//! Drives the external structure prediction engine as a child process and turns what it prints
//! into typed outcomes while it is still running.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run parameters with clamping bounds and the engine
//!   invocation settings
//! - **Failure Signatures** ([`signatures`]) - The ordered `(signature, kind)` table and the pure
//!   line classifier
//! - **Runner** ([`runner`]) - Process launch, merged output streaming, early termination and reaping
//! - **Cancellation** ([`cancel`]) - A cloneable token checked between output lines
//! - **Progress Reporting** ([`progress`]) - Phases, forwarded engine lines and caller notices
//! - **Error Handling** ([`error`]) - Engine-specific errors

pub mod cancel;
pub mod config;
pub mod error;
pub mod progress;
pub mod runner;
pub mod signatures;
