use super::fs::move_path;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_PRIMARY_EXTENSION: &str = "pdb";
pub const DEFAULT_NAMESPACE: &str = "ColabFold Outputs";
pub const RESULTS_DIR_NAME: &str = "results";
pub const OTHER_DIR_NAME: &str = "other";

#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("Raw output directory does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Artifact directory already exists: {}", .0.display())]
    StagingExists(PathBuf),

    #[error("Invalid run name '{0}': must be a single non-empty path component")]
    InvalidRunName(String),

    #[error("Filesystem error at '{path}': {source}", path = .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PartitionError {
    fn at(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| PartitionError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Directory under which each run gets its own `<run_name>` staging root.
    pub staging_root: PathBuf,
    /// Extension of primary coordinate files, compared case-sensitively.
    pub primary_extension: String,
    /// Leaf namespace used for the location when the caller names no destination.
    pub default_namespace: String,
}

impl PartitionConfig {
    pub fn new(staging_root: impl Into<PathBuf>) -> Self {
        Self {
            staging_root: staging_root.into(),
            primary_extension: DEFAULT_PRIMARY_EXTENSION.to_string(),
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// The terminal layout of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactLayout {
    pub root: PathBuf,
    pub results_dir: PathBuf,
    pub other_dir: PathBuf,
    /// Primary artifacts in their final place under `results_dir`, sorted by name.
    pub primary_artifacts: Vec<PathBuf>,
    /// The caller-facing address of the layout.
    pub location: String,
}

/// Splits `raw_output_dir` into `results/` and `other/` under a fresh staging root.
///
/// Files directly inside the raw directory whose extension matches the primary extension are
/// moved into `results/`. The raw directory itself, with everything left in it, then becomes
/// `other/`. The source location is gone once this returns `Ok`.
#[instrument(skip_all, name = "partition_artifacts", fields(run = run_name))]
pub fn partition(
    raw_output_dir: &Path,
    run_name: &str,
    destination_root: Option<&str>,
    config: &PartitionConfig,
) -> Result<ArtifactLayout, PartitionError> {
    let root = check_destination(run_name, config)?;
    if !raw_output_dir.is_dir() {
        return Err(PartitionError::MissingSource(raw_output_dir.to_path_buf()));
    }
    let results_dir = root.join(RESULTS_DIR_NAME);
    let other_dir = root.join(OTHER_DIR_NAME);

    fs::create_dir_all(&config.staging_root).map_err(PartitionError::at(&config.staging_root))?;
    fs::create_dir(&root).map_err(PartitionError::at(&root))?;
    fs::create_dir(&results_dir).map_err(PartitionError::at(&results_dir))?;

    let mut primary_artifacts = Vec::new();
    for source in primary_files(raw_output_dir, &config.primary_extension)? {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let target = results_dir.join(file_name);
        move_path(&source, &target).map_err(PartitionError::at(&source))?;
        debug!(file = %target.display(), "Moved primary artifact.");
        primary_artifacts.push(target);
    }

    move_path(raw_output_dir, &other_dir).map_err(PartitionError::at(raw_output_dir))?;

    let location = resolve_location(run_name, destination_root, &config.default_namespace);
    info!(
        primary = primary_artifacts.len(),
        root = %root.display(),
        %location,
        "Artifacts partitioned."
    );

    Ok(ArtifactLayout {
        root,
        results_dir,
        other_dir,
        primary_artifacts,
        location,
    })
}

/// Returns the staging root `run_name` would be partitioned into, failing if the name is not a
/// single path component or the root is already taken. Nothing is created.
pub fn check_destination(
    run_name: &str,
    config: &PartitionConfig,
) -> Result<PathBuf, PartitionError> {
    validate_run_name(run_name)?;
    let root = config.staging_root.join(run_name);
    if root.exists() {
        return Err(PartitionError::StagingExists(root));
    }
    Ok(root)
}

/// Computes the addressable location of a run's layout.
pub fn resolve_location(run_name: &str, destination_root: Option<&str>, namespace: &str) -> String {
    match destination_root.filter(|root| !root.is_empty()) {
        Some(root) => format!("{}/{}", root.trim_end_matches('/'), run_name),
        None => format!("{}/{}", namespace, run_name),
    }
}

fn validate_run_name(run_name: &str) -> Result<(), PartitionError> {
    let mut components = Path::new(run_name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(()),
        _ => Err(PartitionError::InvalidRunName(run_name.to_string())),
    }
}

fn primary_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, PartitionError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(PartitionError::at(dir))? {
        let entry = entry.map_err(PartitionError::at(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(PartitionError::at(&path))?;
        if file_type.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn raw_dir(files: &[&str]) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("predictions");
        fs::create_dir_all(&raw).unwrap();
        for name in files {
            let path = raw.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, name.as_bytes()).unwrap();
        }
        (dir, raw)
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn primary_files_go_to_results_and_everything_else_to_other() {
        let (dir, raw) = raw_dir(&["a.pdb", "b.pdb", "log.txt"]);
        let config = PartitionConfig::new(dir.path().join("staging"));

        let layout = partition(&raw, "run1", None, &config).unwrap();

        assert_eq!(layout.root, dir.path().join("staging/run1"));
        assert_eq!(file_names(&layout.results_dir), vec!["a.pdb", "b.pdb"]);
        assert_eq!(file_names(&layout.other_dir), vec!["log.txt"]);
        assert_eq!(
            fs::read_to_string(layout.results_dir.join("a.pdb")).unwrap(),
            "a.pdb"
        );
        assert!(!raw.exists());
        assert_eq!(
            layout.primary_artifacts,
            vec![layout.results_dir.join("a.pdb"), layout.results_dir.join("b.pdb")]
        );
    }

    #[test]
    fn nested_entries_and_other_extensions_stay_in_other() {
        let (dir, raw) = raw_dir(&[
            "model_1.pdb",
            "MODEL_2.PDB",
            "msa/uniref.a3m",
            "msa/nested.pdb",
            "coverage.png",
        ]);
        let config = PartitionConfig::new(dir.path().join("staging"));

        let layout = partition(&raw, "run2", None, &config).unwrap();

        assert_eq!(file_names(&layout.results_dir), vec!["model_1.pdb"]);
        assert_eq!(
            file_names(&layout.other_dir),
            vec!["MODEL_2.PDB", "coverage.png", "msa"]
        );
        assert_eq!(
            file_names(&layout.other_dir.join("msa")),
            vec!["nested.pdb", "uniref.a3m"]
        );
    }

    #[test]
    fn empty_raw_directory_yields_empty_results() {
        let (dir, raw) = raw_dir(&[]);
        let config = PartitionConfig::new(dir.path().join("staging"));

        let layout = partition(&raw, "empty", None, &config).unwrap();

        assert!(file_names(&layout.results_dir).is_empty());
        assert!(layout.other_dir.is_dir());
        assert!(layout.primary_artifacts.is_empty());
    }

    #[test]
    fn location_uses_destination_root_when_given() {
        let (dir, raw) = raw_dir(&["a.pdb"]);
        let config = PartitionConfig::new(dir.path().join("staging"));

        let layout = partition(&raw, "run3", Some("s3://bucket/folds/"), &config).unwrap();

        assert_eq!(layout.location, "s3://bucket/folds/run3");
    }

    #[test]
    fn location_falls_back_to_default_namespace() {
        assert_eq!(
            resolve_location("run4", None, DEFAULT_NAMESPACE),
            "ColabFold Outputs/run4"
        );
        assert_eq!(
            resolve_location("run4", Some(""), DEFAULT_NAMESPACE),
            "ColabFold Outputs/run4"
        );
        assert_eq!(resolve_location("run4", Some("out"), "ignored"), "out/run4");
    }

    #[test]
    fn existing_staging_root_is_rejected_without_touching_source() {
        let (dir, raw) = raw_dir(&["a.pdb"]);
        let config = PartitionConfig::new(dir.path().join("staging"));
        fs::create_dir_all(config.staging_root.join("taken")).unwrap();

        let err = partition(&raw, "taken", None, &config).unwrap_err();

        assert!(matches!(err, PartitionError::StagingExists(_)));
        assert!(raw.join("a.pdb").exists());
    }

    #[test]
    fn check_destination_resolves_a_free_root_without_creating_it() {
        let dir = tempdir().unwrap();
        let config = PartitionConfig::new(dir.path().join("staging"));

        let root = check_destination("fresh", &config).unwrap();

        assert_eq!(root, dir.path().join("staging/fresh"));
        assert!(!config.staging_root.exists());

        fs::create_dir_all(&root).unwrap();
        assert!(matches!(
            check_destination("fresh", &config),
            Err(PartitionError::StagingExists(_))
        ));
        assert!(matches!(
            check_destination("a/b", &config),
            Err(PartitionError::InvalidRunName(_))
        ));
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = tempdir().unwrap();
        let config = PartitionConfig::new(dir.path().join("staging"));

        let err = partition(&dir.path().join("nope"), "run", None, &config).unwrap_err();

        assert!(matches!(err, PartitionError::MissingSource(_)));
        assert!(!config.staging_root.exists());
    }

    #[test]
    fn run_names_must_be_a_single_component() {
        let (dir, raw) = raw_dir(&["a.pdb"]);
        let config = PartitionConfig::new(dir.path().join("staging"));

        for name in ["", "..", "a/b", "/abs"] {
            let err = partition(&raw, name, None, &config).unwrap_err();
            assert!(matches!(err, PartitionError::InvalidRunName(_)), "{name}");
        }
        assert!(raw.join("a.pdb").exists());
    }
}
