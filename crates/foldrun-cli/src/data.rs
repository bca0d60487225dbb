use crate::error::{CliError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PATH_CONFIG_FILE: &str = "path.conf";

/// Locates the directory the engine uses for model weights and caches.
#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn with_custom_path(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn set_custom_path(path: &Path) -> Result<PathBuf> {
        let absolute = std::path::absolute(path)?;
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, absolute.to_string_lossy().as_bytes())?;
        info!("Pinned data path to {:?} in {:?}", &absolute, &config_path);
        Ok(absolute)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(&config_path)?;
                info!("Removed data path pin {:?}", &config_path);
            }
        }
        Ok(())
    }

    fn determine_data_path() -> Result<PathBuf> {
        let default_path = Self::get_default_data_path()?;
        match Self::get_path_config_file() {
            Ok(config_path) => Self::read_pinned_path(&config_path, default_path),
            Err(_) => Ok(default_path),
        }
    }

    fn read_pinned_path(config_path: &Path, default_path: PathBuf) -> Result<PathBuf> {
        if !config_path.exists() {
            return Ok(default_path);
        }
        let custom_path_str = fs::read_to_string(config_path)?.trim().to_string();
        if custom_path_str.is_empty() {
            warn!("Custom path config file is empty, falling back to default path.");
            Ok(default_path)
        } else {
            Ok(PathBuf::from(custom_path_str))
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "foldrun", "foldrun")
    }

    fn get_path_config_file() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join(PATH_CONFIG_FILE))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
