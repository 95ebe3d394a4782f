//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the record store, so
//! that save/load never read process-wide environment variables mid-session.

use crate::constants::DATA_FILE_EXTENSION;
use crate::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Store configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    data_dir: PathBuf,
}

impl StoreConfig {
    /// Create a new `StoreConfig` rooted at `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if `data_dir` is not an existing directory.
    pub fn new(data_dir: PathBuf) -> StoreResult<Self> {
        if !data_dir.is_dir() {
            return Err(StoreError::InvalidInput(format!(
                "data directory is not a directory: {}",
                data_dir.display()
            )));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolve a user-supplied file name to the path used for save/load.
    ///
    /// Appends `.dat` when the name does not already end with it, then joins relative names
    /// onto the data directory. Absolute names are used as given.
    pub fn resolve_data_file(&self, file_name: &str) -> PathBuf {
        let file_name = with_data_extension(file_name);
        let path = Path::new(&file_name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
        }
    }
}

/// Append the data file extension unless the name already ends with it.
pub fn with_data_extension(file_name: &str) -> String {
    let suffix = format!(".{DATA_FILE_EXTENSION}");
    if file_name.ends_with(&suffix) {
        file_name.to_string()
    } else {
        format!("{file_name}{suffix}")
    }
}

/// Build a `StoreConfig` from an optional `MEDREC_DATA_DIR` value.
///
/// `None` or a blank value falls back to the current directory.
pub fn store_config_from_env_value(value: Option<String>) -> StoreResult<StoreConfig> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(dir) => StoreConfig::new(PathBuf::from(dir)),
        None => Ok(StoreConfig::default()),
    }
}
