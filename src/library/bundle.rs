//! Folder bundles.
//!
//! A bundle is a one-file snapshot of a folder's markdown tree: a JSON
//! manifest holding relative paths and UTF-8 contents. Packing collects
//! the folder's markdown files (plus `index.json` when present);
//! unpacking recreates the tree in a fresh temporary directory so the
//! viewer can open it like any other folder.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{StorageError, scan};

/// File extension for packed bundles. Checked case-insensitively.
pub const BUNDLE_EXTENSION: &str = "mdsb";

/// Manifest format version, bumped on incompatible layout changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BundleFormatVersion {
    pub major: u32,
    pub minor: u32,
}

impl BundleFormatVersion {
    pub const CURRENT: Self = Self { major: 1, minor: 0 };
}

/// Top-level bundle manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    pub format_version: BundleFormatVersion,
    pub name: String,
    pub files: Vec<BundleFile>,
}

/// One file inside a bundle. `path` is relative, `/`-separated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleFile {
    pub path: String,
    pub contents: String,
}

impl BundleManifest {
    /// Reject manifests this build cannot safely unpack: future major
    /// versions and entries that would escape the extraction directory.
    fn validate(&self, bundle_path: &Path) -> Result<(), StorageError> {
        if self.format_version.major > BundleFormatVersion::CURRENT.major {
            return Err(StorageError::InvalidBundle {
                path: bundle_path.to_path_buf(),
                reason: format!(
                    "format version {}.{} is newer than supported",
                    self.format_version.major, self.format_version.minor
                ),
            });
        }
        for file in &self.files {
            let relative = Path::new(&file.path);
            let escapes = relative.components().any(|component| {
                !matches!(component, Component::Normal(_) | Component::CurDir)
            });
            if file.path.is_empty() || escapes {
                return Err(StorageError::InvalidBundle {
                    path: bundle_path.to_path_buf(),
                    reason: format!("unsafe entry path {:?}", file.path),
                });
            }
        }
        Ok(())
    }
}

/// Returns true if the path carries the bundle extension.
pub fn is_bundle_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(BUNDLE_EXTENSION))
}

/// Convert an absolute path into a safe single-token file stem.
///
/// `C:\Users\me\Docs` → `C_Users_me_Docs`, `/mnt/hdd1/docs` →
/// `mnt_hdd1_docs`. Windows drive prefixes are recognized on every
/// platform so stems stay stable across machines. Relative paths are an
/// error.
pub fn flatten_path(path: &Path) -> Result<String, StorageError> {
    let raw = path.to_string_lossy();
    if !is_absolute_like(&raw) {
        return Err(StorageError::RelativePath(path.to_path_buf()));
    }
    Ok(raw
        .split(['/', '\\'])
        .map(|part| part.strip_suffix(':').unwrap_or(part))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_"))
}

/// Absolute on Unix (`/...`) or Windows (`C:\` / `C:/`), judged from the
/// string so foreign-platform paths flatten consistently.
fn is_absolute_like(raw: &str) -> bool {
    if raw.starts_with('/') {
        return true;
    }
    let mut chars = raw.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(drive), Some(':'), Some('/' | '\\')) if drive.is_ascii_alphabetic()
    )
}

/// Pack a folder's markdown tree into a bundle file.
pub fn pack_folder(folder: &Path, bundle_path: &Path) -> Result<(), StorageError> {
    let mut sources = scan::list_files_with_ext(folder, "md");
    let index = folder.join(scan::INDEX_FILE_NAME);
    if index.is_file() {
        sources.push(index);
    }

    let mut files = Vec::with_capacity(sources.len());
    for source in sources {
        let contents = fs::read_to_string(&source)
            .map_err(|err| StorageError::io("read", &source, err))?;
        files.push(BundleFile {
            path: relative_slash_path(folder, &source),
            contents,
        });
    }

    let manifest = BundleManifest {
        format_version: BundleFormatVersion::CURRENT,
        name: folder
            .file_name()
            .map_or_else(|| "bundle".to_string(), |n| n.to_string_lossy().to_string()),
        files,
    };

    if let Some(parent) = bundle_path.parent() {
        fs::create_dir_all(parent).map_err(|err| StorageError::io("create", parent, err))?;
    }
    let json = serde_json::to_string_pretty(&manifest).map_err(|err| StorageError::Json {
        path: bundle_path.to_path_buf(),
        source: err,
    })?;
    fs::write(bundle_path, json).map_err(|err| StorageError::io("write", bundle_path, err))?;
    tracing::debug!("packed {} into {}", folder.display(), bundle_path.display());
    Ok(())
}

/// Unpack a bundle into a fresh temporary directory and return its path.
///
/// The directory outlives this call; the caller decides when to clean it
/// up (in practice it lives until the process exits).
pub fn unpack_to_temp(bundle_path: &Path) -> Result<PathBuf, StorageError> {
    let json = fs::read_to_string(bundle_path)
        .map_err(|err| StorageError::io("read", bundle_path, err))?;
    let manifest: BundleManifest =
        serde_json::from_str(&json).map_err(|err| StorageError::Json {
            path: bundle_path.to_path_buf(),
            source: err,
        })?;
    manifest.validate(bundle_path)?;

    let root = tempfile::Builder::new()
        .prefix("markshelf-")
        .tempdir()
        .map_err(|err| StorageError::io("create", Path::new("temp dir"), err))?
        .keep();

    for file in &manifest.files {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|err| StorageError::io("create", parent, err))?;
        }
        fs::write(&target, &file.contents)
            .map_err(|err| StorageError::io("write", &target, err))?;
    }
    tracing::debug!("unpacked {} into {}", bundle_path.display(), root.display());
    Ok(root)
}

fn relative_slash_path(folder: &Path, file: &Path) -> String {
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

    #[test]
    fn test_flatten_windows_style_paths() {
        for raw in [
            "C:\\Users\\admin\\Documents",
            "C:/Users/admin/Documents",
            "C:\\Users\\admin\\Documents\\",
        ] {
            assert_eq!(
                flatten_path(Path::new(raw)).unwrap(),
                "C_Users_admin_Documents",
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_flatten_windows_drive_root() {
        assert_eq!(flatten_path(Path::new("C:\\")).unwrap(), "C");
        assert_eq!(flatten_path(Path::new("D:/")).unwrap(), "D");
    }

    #[test]
    fn test_flatten_unix_paths() {
        assert_eq!(flatten_path(Path::new("/mnt/hdd1/docs")).unwrap(), "mnt_hdd1_docs");
        assert_eq!(flatten_path(Path::new("/mnt/hdd1/docs/")).unwrap(), "mnt_hdd1_docs");
    }

    #[test]
    fn test_flatten_root_is_empty() {
        assert_eq!(flatten_path(Path::new("/")).unwrap(), "");
    }

    #[test]
    fn test_flatten_mixed_separators() {
        assert_eq!(
            flatten_path(Path::new("C:/Users\\admin/mixed\\path")).unwrap(),
            "C_Users_admin_mixed_path"
        );
    }

    #[test]
    fn test_flatten_rejects_relative_paths() {
        assert!(matches!(
            flatten_path(Path::new("docs/notes")),
            Err(StorageError::RelativePath(_))
        ));
    }

    #[test]
    fn test_is_bundle_file_case_insensitive() {
        assert!(is_bundle_file(Path::new("a.mdsb")));
        assert!(is_bundle_file(Path::new("a.MDSB")));
        assert!(!is_bundle_file(Path::new("a.md")));
        assert!(!is_bundle_file(Path::new("mdsb")));
    }

    #[test]
    fn test_pack_collects_markdown_and_index() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# A").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("b.md"), "# B").unwrap();
        std::fs::write(dir.path().join("index.json"), "{\"entries\": []}").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "no").unwrap();

        let bundle = dir.path().join("out").join("snapshot.mdsb");
        pack_folder(dir.path(), &bundle).unwrap();

        let manifest: BundleManifest =
            serde_json::from_str(&std::fs::read_to_string(&bundle).unwrap()).unwrap();
        let mut paths: Vec<_> = manifest.files.iter().map(|f| f.path.clone()).collect();
        paths.sort();
        assert_eq!(paths, vec!["a.md", "index.json", "sub/b.md"]);
        assert_eq!(manifest.format_version, BundleFormatVersion::CURRENT);
    }

    #[test]
    fn test_pack_then_unpack_round_trips_contents() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("doc.md"), "# Title\n\n*body*").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("deep.md"), "deep").unwrap();

        let bundle = dir.path().join("snapshot.mdsb");
        pack_folder(dir.path(), &bundle).unwrap();
        let extracted = unpack_to_temp(&bundle).unwrap();

        assert_eq!(
            std::fs::read_to_string(extracted.join("doc.md")).unwrap(),
            "# Title\n\n*body*"
        );
        assert_eq!(
            std::fs::read_to_string(extracted.join("nested").join("deep.md")).unwrap(),
            "deep"
        );
        std::fs::remove_dir_all(extracted).unwrap();
    }

    #[test]
    fn test_unpack_rejects_escaping_paths() {
        let dir = tempdir().unwrap();
        let manifest = BundleManifest {
            format_version: BundleFormatVersion::CURRENT,
            name: "evil".to_string(),
            files: vec![BundleFile {
                path: "../outside.md".to_string(),
                contents: String::new(),
            }],
        };
        let bundle = dir.path().join("evil.mdsb");
        std::fs::write(&bundle, serde_json::to_string(&manifest).unwrap()).unwrap();

        assert!(matches!(
            unpack_to_temp(&bundle),
            Err(StorageError::InvalidBundle { .. })
        ));
    }

    #[test]
    fn test_unpack_rejects_newer_format_version() {
        let dir = tempdir().unwrap();
        let manifest = BundleManifest {
            format_version: BundleFormatVersion { major: 99, minor: 0 },
            name: "future".to_string(),
            files: Vec::new(),
        };
        let bundle = dir.path().join("future.mdsb");
        std::fs::write(&bundle, serde_json::to_string(&manifest).unwrap()).unwrap();

        assert!(matches!(
            unpack_to_temp(&bundle),
            Err(StorageError::InvalidBundle { .. })
        ));
    }

    #[test]
    fn test_unpack_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let bundle = dir.path().join("broken.mdsb");
        std::fs::write(&bundle, "not json").unwrap();

        assert!(matches!(
            unpack_to_temp(&bundle),
            Err(StorageError::Json { .. })
        ));
    }
}
