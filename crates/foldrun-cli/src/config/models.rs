use foldrun::artifacts::partition::PartitionConfig;
use foldrun::core::sequence::policy::NormalizationPolicy;
use foldrun::engine::config::{EngineConfig, RunParameters};

/// Fully merged settings for one `predict` invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub policy: NormalizationPolicy,
    pub engine: EngineConfig,
    pub partition: PartitionConfig,
    pub params: RunParameters,
    pub destination_root: Option<String>,
}
