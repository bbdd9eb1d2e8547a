//! The folder library and its on-disk storage.
//!
//! This module handles:
//! - `library.json`: remembered folder shortcuts
//! - the storage directory of packed bundles
//! - markdown file discovery and `index.json` ordering ([`scan`])
//! - packing/unpacking folder bundles ([`bundle`])

pub mod bundle;
pub mod scan;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bundle::{BUNDLE_EXTENSION, flatten_path, is_bundle_file, pack_folder, unpack_to_temp};
pub use scan::{
    INDEX_FILE_NAME, list_files_with_ext, ordered_markdown_files, relative_label,
    write_initial_index,
};

/// Errors from library and bundle storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("path must be absolute: {}", .0.display())]
    RelativePath(PathBuf),

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid bundle {}: {reason}", .path.display())]
    InvalidBundle { path: PathBuf, reason: String },
}

impl StorageError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Base directory for the library file and packed bundles.
///
/// `MARKSHELF_DATA_DIR` overrides the platform default; tests rely on it.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("MARKSHELF_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markshelf");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markshelf");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("markshelf");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("markshelf");
        }
    }

    PathBuf::from(".markshelf")
}

/// Where packed bundles live.
pub fn storage_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("storage")
}

/// Where the library file lives.
pub fn library_path(data_dir: &Path) -> PathBuf {
    data_dir.join("library.json")
}

/// Saved folder shortcuts, persisted as `library.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Library {
    pub folders: Vec<PathBuf>,
}

impl Library {
    /// Load the library, degrading to an empty one when the file is
    /// missing or unreadable. A corrupt library is worth a log line, not
    /// a startup failure.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("failed to read {}: {err}", path.display());
                }
                return Self::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(library) => library,
            Err(err) => {
                tracing::warn!("ignoring corrupt library {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Save the library, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::io("create", parent, err))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| StorageError::Json {
            path: path.to_path_buf(),
            source: err,
        })?;
        fs::write(path, json).map_err(|err| StorageError::io("write", path, err))
    }

    /// Add a folder shortcut. Returns false when it was already present.
    pub fn add(&mut self, folder: &Path) -> bool {
        if self.folders.iter().any(|f| f == folder) {
            return false;
        }
        self.folders.push(folder.to_path_buf());
        true
    }

    /// Drop folders that no longer exist on disk. Returns how many were
    /// removed.
    pub fn prune_missing(&mut self) -> usize {
        let before = self.folders.len();
        self.folders.retain(|folder| folder.exists());
        before - self.folders.len()
    }

    /// Stored bundle files in the storage directory, sorted by name.
    pub fn stored_bundles(storage: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(storage) else {
            return Vec::new();
        };
        let mut bundles: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_bundle_file(path))
            .collect();
        bundles.sort();
        bundles
    }
}
