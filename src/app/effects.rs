//! Side effects of messages: everything that touches the filesystem.
//!
//! [`update`](super::update::update) stays pure; after it runs, the event
//! loop hands the same message here so folder opening, bundle packing,
//! and index writing happen against the already-updated model.

use std::fs;
use std::path::{Path, PathBuf};

use crate::library::{self, Library, StorageError};

use super::model::{LibraryEntry, Model, Screen, ToastLevel};
use super::update::Message;

pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
    match msg {
        Message::OpenSelected => open_selected(model),
        Message::OpenLibrary => refresh_library(model),
        Message::SaveBundle => save_bundle(model),
        Message::WriteIndex => write_index(model),
        _ => {}
    }
}

/// Reload library entries: saved folders (pruned first) followed by
/// stored bundles.
pub(super) fn refresh_library(model: &mut Model) {
    let path = library::library_path(&model.data_dir);
    let mut lib = Library::load(&path);
    if lib.prune_missing() > 0
        && let Err(err) = lib.save(&path)
    {
        tracing::warn!("failed to prune library: {err}");
    }

    let mut entries: Vec<LibraryEntry> =
        lib.folders.into_iter().map(LibraryEntry::Folder).collect();
    entries.extend(
        Library::stored_bundles(&library::storage_dir(&model.data_dir))
            .into_iter()
            .map(LibraryEntry::Bundle),
    );
    model.set_entries(entries);
    model.screen = Screen::Library;
}

fn open_selected(model: &mut Model) {
    let Some(entry) = model.entries.get(model.selected_entry).cloned() else {
        return;
    };
    match entry {
        LibraryEntry::Folder(folder) => open_folder(model, folder, true),
        LibraryEntry::Bundle(bundle) => match library::unpack_to_temp(&bundle) {
            // Extracted copies are throwaway; don't remember them.
            Ok(folder) => open_folder(model, folder, false),
            Err(err) => model.show_toast(ToastLevel::Error, format!("Open failed: {err}")),
        },
    }
}

/// Discover, read, and open a folder's markdown files as tabs.
pub(super) fn open_folder(model: &mut Model, folder: PathBuf, remember: bool) {
    let folder = folder.canonicalize().unwrap_or(folder);
    let files = library::ordered_markdown_files(&folder, model.use_index);
    if files.is_empty() {
        model.show_toast(
            ToastLevel::Warning,
            format!("No markdown files in {}", folder.display()),
        );
        return;
    }

    let mut pages = Vec::with_capacity(files.len());
    for file in files {
        match fs::read_to_string(&file) {
            Ok(content) => pages.push((file, content)),
            Err(err) => tracing::warn!("skipping {}: {err}", file.display()),
        }
    }
    if pages.is_empty() {
        model.show_toast(
            ToastLevel::Error,
            format!("No readable markdown files in {}", folder.display()),
        );
        return;
    }

    model.open_folder(folder.clone(), pages);
    if remember {
        remember_folder(model, &folder);
    }
}

fn remember_folder(model: &Model, folder: &Path) {
    let path = library::library_path(&model.data_dir);
    let mut lib = Library::load(&path);
    if lib.add(folder)
        && let Err(err) = lib.save(&path)
    {
        tracing::warn!("failed to save library: {err}");
    }
}

fn save_bundle(model: &mut Model) {
    let Some(folder) = model.folder.clone() else {
        return;
    };
    match pack_into_storage(&model.data_dir, &folder) {
        Ok(target) => model.show_toast(
            ToastLevel::Info,
            format!("Saved bundle {}", target.display()),
        ),
        Err(err) => model.show_toast(ToastLevel::Error, format!("Save failed: {err}")),
    }
}

fn pack_into_storage(data_dir: &Path, folder: &Path) -> Result<PathBuf, StorageError> {
    let mut stem = library::flatten_path(folder)?;
    if stem.is_empty() {
        stem = "root".to_string();
    }
    let target =
        library::storage_dir(data_dir).join(format!("{stem}.{}", library::BUNDLE_EXTENSION));
    library::pack_folder(folder, &target)?;
    Ok(target)
}

fn write_index(model: &mut Model) {
    let Some(folder) = model.folder.clone() else {
        return;
    };
    match library::write_initial_index(&folder) {
        Ok(path) => model.show_toast(ToastLevel::Info, format!("Wrote {}", path.display())),
        Err(err) => model.show_toast(ToastLevel::Error, format!("Index failed: {err}")),
    }
}
