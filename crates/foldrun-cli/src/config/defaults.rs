use foldrun::artifacts::partition::DEFAULT_NAMESPACE;
use foldrun::core::sequence::policy::{Alphabet, DEFAULT_MIN_CHAIN_LENGTH};
use foldrun::engine::config::{DEFAULT_EXECUTABLE, DEFAULT_HOST_URL};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub executable: PathBuf,
    pub host_url: String,
    pub amber: bool,
    pub gpu_relax: bool,
    pub num_models: i64,
    pub num_recycles: i64,
    pub alphabet: Alphabet,
    pub min_chain_length: usize,
    pub output_root: PathBuf,
    pub default_namespace: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            host_url: DEFAULT_HOST_URL.to_string(),
            amber: true,
            gpu_relax: true,
            num_models: 1,
            num_recycles: 3,
            alphabet: Alphabet::default(),
            min_chain_length: DEFAULT_MIN_CHAIN_LENGTH,
            output_root: PathBuf::from("."),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}
