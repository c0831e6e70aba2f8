use crate::api::ShelfApi;
use crate::commands::ShelfPaths;
use crate::config::ShelfConfig;
use crate::covers::FileCovers;
use crate::error::{Result, ShelfError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the data directory when `--home` is not given.
pub const HOME_ENV: &str = "SHELF_HOME";

pub struct ShelfContext {
    pub api: ShelfApi<FileStore, FileCovers>,
    pub config: ShelfConfig,
}

/// Pick the data directory: explicit path, then `$SHELF_HOME`, then the
/// platform data dir.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "shelf", "shelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ShelfError::Store("Could not determine data directory".to_string()))
}

pub fn initialize(data_dir: &Path) -> Result<ShelfContext> {
    let config = ShelfConfig::load(data_dir)?;
    let paths = ShelfPaths::new(data_dir);
    let store = FileStore::new(data_dir);
    let covers = FileCovers::new(paths.covers_dir());
    debug!(data_dir = %data_dir.display(), key = %config.storage_key, "initializing shelf");

    let api = ShelfApi::open(store, &config.storage_key, covers)?;
    Ok(ShelfContext { api, config })
}
