use crate::artifacts::partition::{self, ArtifactLayout, PartitionConfig, PartitionError};
use crate::core::io::fasta::{FastaFile, REQUEST_FILE_NAME};
use crate::core::models::input::RawInput;
use crate::core::sequence::error::NormalizeError;
use crate::core::sequence::normalizer::SequenceNormalizer;
use crate::core::sequence::policy::NormalizationPolicy;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::{EngineConfig, RunParameterBounds, RunParameters};
use crate::engine::error::EngineError;
use crate::engine::progress::{Notice, Progress, ProgressReporter};
use crate::engine::runner::EngineRunner;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Name of the engine's raw output directory inside the working directory.
pub const RAW_OUTPUT_DIR_NAME: &str = "predictions";

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Failed to write request file '{path}': {source}", path = .path.display())]
    RequestWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Partition(#[from] PartitionError),
}

impl WorkflowError {
    /// The error notice reported to the caller when the workflow stops on this error.
    pub fn notice(&self) -> Notice {
        match self {
            WorkflowError::Normalize(e) => match e.validation() {
                Some(validation) => Notice::error(validation.title(), validation.to_string()),
                None => Notice::error("Invalid Input", e.to_string()),
            },
            WorkflowError::RequestWrite { .. } => Notice::error("Filesystem Error", self.to_string()),
            WorkflowError::Engine(e) => e.notice(),
            WorkflowError::Partition(e) => Notice::error("Filesystem Error", e.to_string()),
        }
    }
}

/// Everything a fold run needs besides the request itself.
#[derive(Debug, Clone)]
pub struct FoldConfig {
    pub policy: NormalizationPolicy,
    pub bounds: RunParameterBounds,
    pub engine: EngineConfig,
    pub partition: PartitionConfig,
    /// Scratch directory owned by this run; receives the request file and the raw output.
    pub work_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FoldRequest {
    pub input: RawInput,
    pub params: RunParameters,
    pub destination_root: Option<String>,
}

impl FoldRequest {
    pub fn new(input: RawInput, params: RunParameters) -> Self {
        Self {
            input,
            params,
            destination_root: None,
        }
    }

    pub fn with_destination(mut self, destination_root: impl Into<String>) -> Self {
        self.destination_root = Some(destination_root.into());
        self
    }
}

#[instrument(skip_all, name = "fold_workflow", fields(run = %request.params.run_name))]
pub fn run(
    request: FoldRequest,
    config: &FoldConfig,
    reporter: &ProgressReporter,
    cancel: Option<CancellationToken>,
) -> Result<ArtifactLayout, WorkflowError> {
    let result = execute(request, config, reporter, cancel);
    if let Err(e) = &result {
        warn!("Fold workflow stopped: {}", e);
        reporter.notify(e.notice());
    }
    result
}

fn execute(
    request: FoldRequest,
    config: &FoldConfig,
    reporter: &ProgressReporter,
    cancel: Option<CancellationToken>,
) -> Result<ArtifactLayout, WorkflowError> {
    let FoldRequest {
        input,
        mut params,
        destination_root,
    } = request;

    // === Phase 1: Normalization ===
    reporter.report(Progress::PhaseStart {
        name: "Normalizing input",
    });
    info!(kind = input.kind(), "Normalizing input.");
    let canonical = SequenceNormalizer::new(config.policy.clone()).normalize(&input)?;
    info!(
        "Normalized {} record(s), {} monomer(s) and {} multimer(s).",
        canonical.record_count(),
        canonical.record_count() - canonical.multimer_count(),
        canonical.multimer_count()
    );
    let staging = partition::check_destination(&params.run_name, &config.partition)?;
    debug!(staging = %staging.display(), "Artifact destination is free.");

    let request_path = config.work_dir.join(REQUEST_FILE_NAME);
    FastaFile::write_to_path(&canonical, &request_path).map_err(|source| {
        WorkflowError::RequestWrite {
            path: request_path.clone(),
            source,
        }
    })?;
    reporter.report(Progress::PhaseFinish);

    for notice in params.clamp(&config.bounds) {
        warn!("{}", notice.body);
        reporter.notify(notice);
    }

    // === Phase 2: Engine ===
    reporter.report(Progress::PhaseStart {
        name: "Running structure prediction",
    });
    let mut runner = EngineRunner::new(&config.engine, reporter);
    if let Some(token) = cancel {
        runner = runner.with_cancellation(token);
    }
    let raw_output_dir = runner.run(
        &request_path,
        &config.work_dir.join(RAW_OUTPUT_DIR_NAME),
        &params,
    )?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Partitioning ===
    reporter.report(Progress::PhaseStart {
        name: "Organizing artifacts",
    });
    let layout = partition::partition(
        &raw_output_dir,
        &params.run_name,
        destination_root.as_deref(),
        &config.partition,
    )?;
    reporter.report(Progress::PhaseFinish);

    info!(
        "Workflow complete. {} primary artifact(s) at {}.",
        layout.primary_artifacts.len(),
        layout.location
    );
    Ok(layout)
}
