//! # Artifacts Module
//!
//! Turns the engine's raw output directory into the stable layout handed back to callers.
//!
//! ## Overview
//!
//! Partitioning never reads or rewrites file contents. Primary coordinate files are moved into
//! `results/`, and the rest of the raw tree is moved wholesale into `other/`, so every raw file
//! ends up in exactly one place.
//!
//! ## Architecture
//!
//! - **Partitioning** ([`partition`]) - Staging layout, primary artifact selection and the final
//!   addressable location
//! - **Filesystem Moves** ([`fs`]) - Rename with a copy-and-remove fallback across filesystems

pub mod fs;
pub mod partition;
