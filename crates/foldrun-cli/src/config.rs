//! Layered configuration for the CLI.
//!
//! Precedence, highest first: command-line flags, `--set KEY=VALUE` overrides, the TOML file
//! named by `--config`, then [`defaults::DefaultsConfig`].

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, build_policy};
