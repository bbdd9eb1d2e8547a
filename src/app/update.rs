use super::model::{Model, Screen};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation (active tab)
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half a page
    HalfPageUp,
    /// Scroll down half a page
    HalfPageDown,
    /// Go to the top of the document
    GoToTop,
    /// Go to the bottom of the document
    GoToBottom,
    /// Jump to the next heading below the current position
    NextHeading,
    /// Jump to the previous heading above the current position
    PrevHeading,

    // Tabs
    /// Cycle to the next tab
    NextTab,
    /// Cycle to the previous tab
    PrevTab,
    /// Jump to a tab by index
    SelectTab(usize),

    // Library screen
    /// Move the library selection up
    LibraryUp,
    /// Move the library selection down
    LibraryDown,
    /// Open the selected folder or bundle
    OpenSelected,
    /// Leave the viewer and show the library
    OpenLibrary,

    // Storage actions
    /// Pack the open folder into the storage directory
    SaveBundle,
    /// Write an initial index.json into the open folder
    WriteIndex,

    // Overlays
    /// Toggle the help overlay
    ToggleHelp,
    /// Hide the help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw without a state change
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// All state transitions happen here; anything touching the filesystem is
/// handled afterwards in the effects layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Navigation
        Message::ScrollUp(n) => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.scroll_up(n);
            }
        }
        Message::ScrollDown(n) => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.scroll_down(n);
            }
        }
        Message::PageUp => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.page_up();
            }
        }
        Message::PageDown => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.page_down();
            }
        }
        Message::HalfPageUp => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.half_page_up();
            }
        }
        Message::HalfPageDown => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.half_page_down();
            }
        }
        Message::GoToTop => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.go_to_top();
            }
        }
        Message::GoToBottom => {
            if let Some(tab) = model.active_tab_mut() {
                tab.viewport.go_to_bottom();
            }
        }
        Message::NextHeading => {
            if let Some(tab) = model.active_tab_mut() {
                let offset = tab.viewport.offset();
                let next = tab
                    .rendered
                    .headings()
                    .iter()
                    .map(|h| h.line)
                    .find(|&line| line > offset);
                if let Some(line) = next {
                    tab.viewport.go_to_line(line);
                }
            }
        }
        Message::PrevHeading => {
            if let Some(tab) = model.active_tab_mut() {
                let offset = tab.viewport.offset();
                let prev = tab
                    .rendered
                    .headings()
                    .iter()
                    .map(|h| h.line)
                    .take_while(|&line| line < offset)
                    .last();
                if let Some(line) = prev {
                    tab.viewport.go_to_line(line);
                }
            }
        }

        // Tabs
        Message::NextTab => model.next_tab(),
        Message::PrevTab => model.prev_tab(),
        Message::SelectTab(index) => model.select_tab(index),

        // Library
        Message::LibraryUp => {
            model.selected_entry = model.selected_entry.saturating_sub(1);
        }
        Message::LibraryDown => {
            model.selected_entry =
                (model.selected_entry + 1).min(model.entries.len().saturating_sub(1));
        }
        Message::OpenLibrary => {
            // Entry list refresh happens in effects.
            model.screen = Screen::Library;
        }
        // Filesystem work; handled in effects.
        Message::OpenSelected | Message::SaveBundle | Message::WriteIndex | Message::Redraw => {}

        // Overlays
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Window
        Message::Resize(width, height) => model.reflow(width, height),

        // Application
        Message::Quit => model.should_quit = true,
    }

    model
}
