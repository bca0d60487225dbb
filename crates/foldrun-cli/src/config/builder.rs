use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileNormalizationConfig};
use super::models::AppConfig;
use crate::cli::PredictArgs;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use foldrun::artifacts::partition::{DEFAULT_PRIMARY_EXTENSION, PartitionConfig};
use foldrun::core::sequence::policy::NormalizationPolicy;
use foldrun::engine::config::{EngineConfigBuilder, RunParameters};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub fn build_config(args: &PredictArgs, data_manager: &DataManager) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let FileConfig {
        engine,
        run,
        normalization,
        output,
    } = load_file_config(args.config.as_deref(), &args.set_values)?;

    let policy = merge_policy(normalization, &defaults)?;

    let engine_file = engine.unwrap_or_default();
    let amber = !args.no_amber && engine_file.amber.unwrap_or(defaults.amber);
    let timeout = args
        .timeout
        .or(engine_file.timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);
    let engine = EngineConfigBuilder::new()
        .executable(
            args.engine
                .clone()
                .or(engine_file.executable)
                .unwrap_or(defaults.executable),
        )
        .data_dir(data_manager.get_data_path().to_path_buf())
        .host_url(engine_file.host_url.unwrap_or(defaults.host_url))
        .amber(amber)
        .gpu_relax(engine_file.gpu_relax.unwrap_or(defaults.gpu_relax))
        .timeout(timeout)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let output_file = output.unwrap_or_default();
    let partition = PartitionConfig {
        staging_root: args
            .output_dir
            .clone()
            .or(output_file.root)
            .unwrap_or(defaults.output_root),
        primary_extension: DEFAULT_PRIMARY_EXTENSION.to_string(),
        default_namespace: output_file
            .default_namespace
            .unwrap_or(defaults.default_namespace),
    };

    let run_file = run.unwrap_or_default();
    let mut params = RunParameters::new(args.run_name.clone());
    params.model_count = args
        .num_models
        .or(run_file.num_models)
        .unwrap_or(defaults.num_models);
    params.recycle_count = args
        .num_recycles
        .or(run_file.num_recycles)
        .unwrap_or(defaults.num_recycles);
    if let Some(dir) = &args.templates {
        if !dir.is_dir() {
            return Err(CliError::Argument(format!(
                "Template directory does not exist: {}",
                dir.display()
            )));
        }
        params.template_dir = Some(dir.clone());
    }

    Ok(AppConfig {
        policy,
        engine,
        partition,
        params,
        destination_root: args.destination.clone().or(output_file.destination),
    })
}

/// Builds only the normalization policy, for commands that never launch the engine.
pub fn build_policy(config: Option<&Path>, set_values: &[String]) -> Result<NormalizationPolicy> {
    let file_config = load_file_config(config, set_values)?;
    merge_policy(file_config.normalization, &DefaultsConfig::default())
}

fn load_file_config(config: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

fn merge_policy(
    file_val: Option<FileNormalizationConfig>,
    defaults: &DefaultsConfig,
) -> Result<NormalizationPolicy> {
    let file_val = file_val.unwrap_or_default();
    let min_chain_length = file_val
        .min_chain_length
        .unwrap_or(defaults.min_chain_length);
    if min_chain_length == 0 {
        return Err(CliError::Config(
            "`normalization.min-chain-length` must be at least 1".to_string(),
        ));
    }
    Ok(NormalizationPolicy {
        alphabet: file_val.alphabet.unwrap_or(defaults.alphabet),
        min_chain_length,
    })
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "engine.executable" => {
                config.engine.get_or_insert_with(Default::default).executable =
                    Some(PathBuf::from(value_str));
            }
            "engine.host-url" => {
                config.engine.get_or_insert_with(Default::default).host_url =
                    Some(value_str.to_string());
            }
            "engine.amber" => {
                config.engine.get_or_insert_with(Default::default).amber =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "engine.gpu-relax" => {
                config.engine.get_or_insert_with(Default::default).gpu_relax =
                    Some(parse_value(key, value_str, "boolean")?);
            }
            "engine.timeout-secs" => {
                config.engine.get_or_insert_with(Default::default).timeout_secs =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.num-models" => {
                config.run.get_or_insert_with(Default::default).num_models =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.num-recycles" => {
                config.run.get_or_insert_with(Default::default).num_recycles =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "normalization.alphabet" => {
                config
                    .normalization
                    .get_or_insert_with(Default::default)
                    .alphabet = Some(parse_value(key, value_str, "alphabet")?);
            }
            "normalization.min-chain-length" => {
                config
                    .normalization
                    .get_or_insert_with(Default::default)
                    .min_chain_length = Some(parse_value(key, value_str, "integer")?);
            }
            "output.root" => {
                config.output.get_or_insert_with(Default::default).root =
                    Some(PathBuf::from(value_str));
            }
            "output.default-namespace" => {
                config
                    .output
                    .get_or_insert_with(Default::default)
                    .default_namespace = Some(value_str.to_string());
            }
            "output.destination" => {
                config.output.get_or_insert_with(Default::default).destination =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
