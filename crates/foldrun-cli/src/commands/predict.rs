use crate::cli::PredictArgs;
use crate::config;
use crate::data::DataManager;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use foldrun::engine::cancel::CancellationToken;
use foldrun::engine::config::RunParameterBounds;
use foldrun::engine::progress::ProgressReporter;
use foldrun::workflows::fold::{self, FoldConfig, FoldRequest};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, warn};

pub async fn run(args: PredictArgs, ui_sender: UnboundedSender<UiEvent>) -> Result<()> {
    info!("Initializing data manager...");
    let data_manager = DataManager::new()?;

    info!("Merging configuration from defaults, file and CLI arguments...");
    let app = config::build_config(&args, &data_manager)?;
    let input = super::load_input(&args.input)?;

    // Scratch space lives under the staging root so raw output moves stay on one filesystem.
    fs::create_dir_all(&app.partition.staging_root)?;
    let work_dir = tempfile::Builder::new()
        .prefix(".foldrun-")
        .tempdir_in(&app.partition.staging_root)?;
    debug!("Working directory: {:?}", work_dir.path());

    let fold_config = FoldConfig {
        policy: app.policy,
        bounds: RunParameterBounds::default(),
        engine: app.engine,
        partition: app.partition,
        work_dir: work_dir.path().to_path_buf(),
    };
    let request = FoldRequest {
        input,
        params: app.params,
        destination_root: app.destination_root,
    };

    let cancel = CancellationToken::new();
    let interrupt_watcher = watch_for_interrupt(cancel.clone());

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the core fold workflow...");
    let result =
        task::block_in_place(|| fold::run(request, &fold_config, &reporter, Some(cancel)));
    interrupt_watcher.abort();

    let layout = match result {
        Ok(layout) => layout,
        Err(e) => {
            if let Some(raw) = preserve_raw_output(work_dir) {
                warn!("Raw engine output kept at {:?}", raw);
                eprintln!("Raw engine output kept at: {}", raw.display());
            }
            return Err(e.into());
        }
    };
    info!(
        "Workflow finished with {} primary artifact(s).",
        layout.primary_artifacts.len()
    );

    if layout.primary_artifacts.is_empty() {
        warn!("The engine finished but produced no structure files.");
        println!("Warning: the engine finished but produced no structure files.");
    }
    println!("✓ Artifacts organized under: {}", layout.root.display());
    for artifact in &layout.primary_artifacts {
        println!("  {}", artifact.display());
    }
    println!("Location: {}", layout.location);

    Ok(())
}

/// Keeps the scratch directory on disk when the engine already wrote output into it.
fn preserve_raw_output(work_dir: TempDir) -> Option<PathBuf> {
    let raw = work_dir.path().join(fold::RAW_OUTPUT_DIR_NAME);
    if !raw.exists() {
        return None;
    }
    let kept = work_dir.keep();
    Some(kept.join(fold::RAW_OUTPUT_DIR_NAME))
}

fn watch_for_interrupt(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping the engine.");
            token.cancel();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_dir_without_engine_output_is_removed() {
        let parent = tempfile::tempdir().unwrap();
        let work_dir = TempDir::new_in(parent.path()).unwrap();
        let path = work_dir.path().to_path_buf();

        assert_eq!(preserve_raw_output(work_dir), None);
        assert!(!path.exists());
    }

    #[test]
    fn scratch_dir_with_engine_output_is_kept() {
        let parent = tempfile::tempdir().unwrap();
        let work_dir = TempDir::new_in(parent.path()).unwrap();
        let raw = work_dir.path().join(fold::RAW_OUTPUT_DIR_NAME);
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("model_1.pdb"), "ATOM").unwrap();

        let kept = preserve_raw_output(work_dir).unwrap();

        assert_eq!(kept, raw);
        assert!(kept.join("model_1.pdb").exists());
    }
}
