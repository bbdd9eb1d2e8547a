//! Markdown file discovery and `index.json` ordering.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::StorageError;

/// Per-folder ordering file. Entries are `/`-separated relative paths.
pub const INDEX_FILE_NAME: &str = "index.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Index {
    entries: Vec<String>,
}

/// Recursively list all files with the given extension, sorted.
pub fn list_files_with_ext(folder: &Path, ext: &str) -> Vec<PathBuf> {
    tracing::debug!("listing *.{ext} under {}", folder.display());
    let pattern = folder.join("**").join(format!("*.{ext}"));
    let Some(pattern) = pattern.to_str() else {
        return Vec::new();
    };
    let Ok(paths) = glob::glob(pattern) else {
        tracing::warn!("invalid glob pattern for {}", folder.display());
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
    // Byte order, not component order: `a.md` sorts before `a/deep.md`.
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files
}

/// The folder's markdown files in tab order.
///
/// With `use_index` and a readable `index.json`, indexed entries come
/// first in index order; files the index does not mention follow, sorted.
/// Without an index (or when it is unreadable) the sorted listing is the
/// order.
pub fn ordered_markdown_files(folder: &Path, use_index: bool) -> Vec<PathBuf> {
    let discovered = list_files_with_ext(folder, "md");
    if !use_index {
        return discovered;
    }
    let Some(index) = read_index(folder) else {
        return discovered;
    };

    let mut ordered = Vec::with_capacity(discovered.len());
    let mut taken = HashSet::new();
    for entry in &index.entries {
        let path = folder.join(entry);
        if let Some(found) = discovered.iter().find(|p| **p == path) {
            if taken.insert(found.clone()) {
                ordered.push(found.clone());
            }
        }
    }
    for path in discovered {
        if !taken.contains(&path) {
            ordered.push(path);
        }
    }
    ordered
}

fn read_index(folder: &Path) -> Option<Index> {
    let path = folder.join(INDEX_FILE_NAME);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(index) => Some(index),
        Err(err) => {
            tracing::warn!("ignoring corrupt index {}: {err}", path.display());
            None
        }
    }
}

/// Write an `index.json` listing the folder's current markdown files in
/// sorted order, as a starting point for manual reordering.
pub fn write_initial_index(folder: &Path) -> Result<PathBuf, StorageError> {
    let entries: Vec<String> = list_files_with_ext(folder, "md")
        .iter()
        .map(|path| relative_label(folder, path))
        .collect();
    let index = Index { entries };
    let path = folder.join(INDEX_FILE_NAME);
    let json = serde_json::to_string_pretty(&index).map_err(|err| StorageError::Json {
        path: path.clone(),
        source: err,
    })?;
    fs::write(&path, json).map_err(|err| StorageError::io("write", &path, err))?;
    tracing::debug!("wrote initial index at {}", path.display());
    Ok(path)
}

/// The `/`-normalized path of `file` relative to `folder`, used for tab
/// labels and index entries.
pub fn relative_label(folder: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(folder).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_list_finds_nested_files_sorted() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("b.md"), "b");
        touch(&dir.path().join("a").join("deep.md"), "deep");
        touch(&dir.path().join("a.md"), "a");
        touch(&dir.path().join("skip.txt"), "no");

        let labels: Vec<_> = list_files_with_ext(dir.path(), "md")
            .iter()
            .map(|p| relative_label(dir.path(), p))
            .collect();
        assert_eq!(labels, vec!["a.md", "a/deep.md", "b.md"]);
    }

    #[test]
    fn test_list_empty_folder() {
        let dir = tempdir().unwrap();
        assert!(list_files_with_ext(dir.path(), "md").is_empty());
    }

    #[test]
    fn test_ordered_without_index_is_sorted() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("z.md"), "");
        touch(&dir.path().join("a.md"), "");

        let order: Vec<_> = ordered_markdown_files(dir.path(), true)
            .iter()
            .map(|p| relative_label(dir.path(), p))
            .collect();
        assert_eq!(order, vec!["a.md", "z.md"]);
    }

    #[test]
    fn test_index_orders_listed_entries_first() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.md"), "");
        touch(&dir.path().join("b.md"), "");
        touch(&dir.path().join("c.md"), "");
        touch(
            &dir.path().join(INDEX_FILE_NAME),
            r#"{"entries": ["c.md", "a.md"]}"#,
        );

        let order: Vec<_> = ordered_markdown_files(dir.path(), true)
            .iter()
            .map(|p| relative_label(dir.path(), p))
            .collect();
        assert_eq!(order, vec!["c.md", "a.md", "b.md"]);
    }

    #[test]
    fn test_index_ignored_when_disabled() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.md"), "");
        touch(&dir.path().join("c.md"), "");
        touch(
            &dir.path().join(INDEX_FILE_NAME),
            r#"{"entries": ["c.md", "a.md"]}"#,
        );

        let order: Vec<_> = ordered_markdown_files(dir.path(), false)
            .iter()
            .map(|p| relative_label(dir.path(), p))
            .collect();
        assert_eq!(order, vec!["a.md", "c.md"]);
    }

    #[test]
    fn test_index_with_stale_entries_falls_back_to_discovered() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("real.md"), "");
        touch(
            &dir.path().join(INDEX_FILE_NAME),
            r#"{"entries": ["ghost.md", "real.md", "real.md"]}"#,
        );

        let order: Vec<_> = ordered_markdown_files(dir.path(), true)
            .iter()
            .map(|p| relative_label(dir.path(), p))
            .collect();
        assert_eq!(order, vec!["real.md"]);
    }

    #[test]
    fn test_corrupt_index_degrades_to_sorted_listing() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.md"), "");
        touch(&dir.path().join(INDEX_FILE_NAME), "{broken");

        let order = ordered_markdown_files(dir.path(), true);
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_write_initial_index_lists_current_files() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("one.md"), "");
        touch(&dir.path().join("sub").join("two.md"), "");

        let path = write_initial_index(dir.path()).unwrap();
        let index: Index = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(index.entries, vec!["one.md", "sub/two.md"]);
    }
}
