use super::progress::Notice;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_EXECUTABLE: &str = "colabfold_batch";
pub const DEFAULT_HOST_URL: &str = "https://api.colabfold.com";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Inclusive bounds applied to caller-supplied counts before a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameterBounds {
    pub models: RangeInclusive<i64>,
    pub recycles: RangeInclusive<i64>,
}

impl Default for RunParameterBounds {
    fn default() -> Self {
        Self {
            models: 1..=5,
            recycles: 1..=50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub model_count: i64,
    pub recycle_count: i64,
    pub run_name: String,
    pub template_dir: Option<PathBuf>,
}

impl RunParameters {
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            model_count: 1,
            recycle_count: 3,
            run_name: run_name.into(),
            template_dir: None,
        }
    }

    /// Pulls out-of-range counts back into `bounds`.
    ///
    /// Never fails; every correction is returned as a warning notice for the caller.
    pub fn clamp(&mut self, bounds: &RunParameterBounds) -> Vec<Notice> {
        let mut notices = Vec::new();
        if let Some(notice) = clamp_count(&mut self.model_count, &bounds.models, "models") {
            notices.push(notice);
        }
        if let Some(notice) = clamp_count(&mut self.recycle_count, &bounds.recycles, "recycles") {
            notices.push(notice);
        }
        notices
    }
}

fn clamp_count(value: &mut i64, bounds: &RangeInclusive<i64>, what: &str) -> Option<Notice> {
    let (min, max) = (*bounds.start(), *bounds.end());
    let body = if *value < min {
        *value = min;
        format!("Number of {} below {}. Setting to {}", what, min, min)
    } else if *value > max {
        *value = max;
        format!("Number of {} greater than {}. Setting to {}", what, max, max)
    } else {
        return None;
    };
    Some(Notice::warning("Invalid Input", body))
}

/// How the external engine is invoked. The flag names it receives are fixed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub executable: PathBuf,
    pub data_dir: PathBuf,
    pub host_url: String,
    pub amber: bool,
    pub gpu_relax: bool,
    pub timeout: Option<Duration>,
}

#[derive(Default)]
pub struct EngineConfigBuilder {
    executable: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    host_url: Option<String>,
    amber: Option<bool>,
    gpu_relax: Option<bool>,
    timeout: Option<Duration>,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executable(mut self, path: PathBuf) -> Self {
        self.executable = Some(path);
        self
    }
    pub fn data_dir(mut self, path: PathBuf) -> Self {
        self.data_dir = Some(path);
        self
    }
    pub fn host_url(mut self, url: impl Into<String>) -> Self {
        self.host_url = Some(url.into());
        self
    }
    pub fn amber(mut self, enabled: bool) -> Self {
        self.amber = Some(enabled);
        self
    }
    pub fn gpu_relax(mut self, enabled: bool) -> Self {
        self.gpu_relax = Some(enabled);
        self
    }
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            executable: self
                .executable
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXECUTABLE)),
            data_dir: self
                .data_dir
                .ok_or(ConfigError::MissingParameter("data_dir"))?,
            host_url: self
                .host_url
                .unwrap_or_else(|| DEFAULT_HOST_URL.to_string()),
            amber: self.amber.unwrap_or(true),
            gpu_relax: self.gpu_relax.unwrap_or(true),
            timeout: self.timeout,
        })
    }
}
