use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::document::Document;
use crate::ui::flow::RenderedDoc;
use crate::ui::viewport::Viewport;
use crate::ui::{Theme, content_width, flow_document};

/// How long a toast stays on the status row.
const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Saved folders and bundles; shown when started without a folder.
    Library,
    /// The tabbed document viewer.
    Viewer,
}

/// One row in the library screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryEntry {
    Folder(PathBuf),
    Bundle(PathBuf),
}

/// One open document tab.
#[derive(Debug, Clone)]
pub struct Tab {
    /// `/`-normalized path relative to the opened folder
    pub title: String,
    /// Full path of the source file
    pub path: PathBuf,
    /// The parsed document
    pub document: Document,
    /// The document laid out for the current width
    pub rendered: RenderedDoc,
    /// This tab's scroll state
    pub viewport: Viewport,
}

/// The complete application state.
///
/// All state lives here — update is the only place it changes.
pub struct Model {
    /// Current screen
    pub screen: Screen,
    /// The folder open in the viewer, if any
    pub folder: Option<PathBuf>,
    /// Open tabs, one per markdown file
    pub tabs: Vec<Tab>,
    active_tab: usize,
    /// Library screen rows
    pub entries: Vec<LibraryEntry>,
    /// Selected library row
    pub selected_entry: usize,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether `index.json` ordering applies when opening folders
    pub use_index: bool,
    /// Active theme
    pub theme: Theme,
    /// Base directory for library.json and stored bundles
    pub data_dir: PathBuf,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("screen", &self.screen)
            .field("folder", &self.folder)
            .field("tabs", &self.tabs.len())
            .field("active_tab", &self.active_tab)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(80, 24, Theme::default(), PathBuf::new(), true)
    }
}

impl Model {
    /// Create a model showing the (still empty) library screen.
    pub fn new(width: u16, height: u16, theme: Theme, data_dir: PathBuf, use_index: bool) -> Self {
        Self {
            screen: Screen::Library,
            folder: None,
            tabs: Vec::new(),
            active_tab: 0,
            entries: Vec::new(),
            selected_entry: 0,
            help_visible: false,
            use_index,
            theme,
            data_dir,
            should_quit: false,
            toast: None,
            width,
            height,
        }
    }

    /// Rows available to document text: everything minus the tab bar and
    /// the status row.
    fn doc_height(&self) -> u16 {
        self.height.saturating_sub(2)
    }

    /// Replace the open tabs with one per page and switch to the viewer.
    ///
    /// Pages arrive pre-read so this stays a pure state transition; file
    /// I/O lives in the effects layer.
    pub fn open_folder(&mut self, folder: PathBuf, pages: Vec<(PathBuf, String)>) {
        let width = content_width(self.width);
        let height = self.doc_height();
        self.tabs = pages
            .into_iter()
            .map(|(path, content)| {
                let title = crate::library::relative_label(&folder, &path);
                let document = Document::parse(&content);
                let rendered = flow_document(&document, width);
                let viewport = Viewport::new(height, rendered.line_count());
                Tab {
                    title,
                    path,
                    document,
                    rendered,
                    viewport,
                }
            })
            .collect();
        self.active_tab = 0;
        self.folder = Some(folder);
        self.screen = Screen::Viewer;
    }

    /// Re-lay out every tab after a size change.
    pub fn reflow(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let content = content_width(width);
        let doc_height = self.doc_height();
        for tab in &mut self.tabs {
            tab.rendered = flow_document(&tab.document, content);
            tab.viewport.resize(doc_height);
            tab.viewport.set_total_lines(tab.rendered.line_count());
        }
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active_tab)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active_tab)
    }

    pub const fn active_index(&self) -> usize {
        self.active_tab
    }

    /// Switch to the next tab, wrapping.
    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
        }
    }

    /// Switch to the previous tab, wrapping.
    pub fn prev_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + self.tabs.len() - 1) % self.tabs.len();
        }
    }

    /// Jump to a tab by index; out-of-range selections are ignored.
    pub fn select_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.active_tab = index;
        }
    }

    /// Replace the library rows, keeping the selection in range.
    pub fn set_entries(&mut self, entries: Vec<LibraryEntry>) {
        self.selected_entry = self.selected_entry.min(entries.len().saturating_sub(1));
        self.entries = entries;
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            ToastLevel::Info => tracing::info!("{message}"),
            ToastLevel::Warning => tracing::warn!("{message}"),
            ToastLevel::Error => tracing::error!("{message}"),
        }
        self.toast = Some(Toast {
            level,
            message,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// The toast to show, if one is active.
    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Drop an expired toast. Returns true when the display changed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
            return true;
        }
        false
    }
}
