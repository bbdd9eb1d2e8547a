//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - effects: filesystem side effects, applied after `update`
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{LibraryEntry, Model, Screen, Tab, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ThemeMode;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    folder: Option<PathBuf>,
    no_index: bool,
    theme: ThemeMode,
    data_dir: PathBuf,
}

impl App {
    /// Create a new application; without a folder it starts on the
    /// library screen.
    pub fn new() -> Self {
        Self {
            folder: None,
            no_index: false,
            theme: ThemeMode::Auto,
            data_dir: crate::library::default_data_dir(),
        }
    }

    /// Open this folder's markdown files as tabs on startup.
    pub fn with_folder(mut self, folder: Option<PathBuf>) -> Self {
        self.folder = folder;
        self
    }

    /// Ignore `index.json` ordering when opening folders.
    pub const fn with_no_index(mut self, no_index: bool) -> Self {
        self.no_index = no_index;
        self
    }

    /// Force a theme instead of the default.
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Override where library.json and bundles live.
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
