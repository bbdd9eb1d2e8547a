use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::{LibraryEntry, Model, Screen};

use super::render;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for row in 0..buffer.area.height {
        for col in 0..buffer.area.width {
            text.push_str(buffer[(col, row)].symbol());
        }
        text.push('\n');
    }
    text
}

fn viewer_model(pages: &[(&str, &str)]) -> Model {
    let mut model = Model::default();
    let folder = PathBuf::from("/docs");
    model.open_folder(
        folder.clone(),
        pages
            .iter()
            .map(|(name, content)| (folder.join(name), (*content).to_string()))
            .collect(),
    );
    model
}

#[test]
fn test_empty_library_shows_hint() {
    let model = Model::default();
    let mut terminal = create_test_terminal(60, 12);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Library is empty"));
}

#[test]
fn test_library_lists_folders_and_bundles() {
    let mut model = Model::default();
    model.set_entries(vec![
        LibraryEntry::Folder(PathBuf::from("/docs/notes")),
        LibraryEntry::Bundle(PathBuf::from("/data/storage/snap.mdsb")),
    ]);
    let mut terminal = create_test_terminal(60, 12);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("/docs/notes"));
    assert!(text.contains("snap [bundle]"));
    assert!(text.contains("> /docs/notes"), "first entry is selected");
}

#[test]
fn test_viewer_shows_tab_titles_and_content() {
    let model = viewer_model(&[("readme.md", "# Title\n\nhello world"), ("other.md", "x")]);
    let mut terminal = create_test_terminal(60, 12);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("readme.md"));
    assert!(text.contains("other.md"));
    assert!(text.contains("Title"));
    assert!(text.contains("hello world"));
}

#[test]
fn test_viewer_status_bar_shows_position() {
    let model = viewer_model(&[("readme.md", "# Title\n\nbody")]);
    let mut terminal = create_test_terminal(60, 12);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("[tab 1/1]"));
    assert!(text.contains("[100%]"), "short document reads fully scrolled");
}

#[test]
fn test_code_block_renders_verbatim_markers() {
    let model = viewer_model(&[("readme.md", "```\n*not styled*\n```")]);
    let mut terminal = create_test_terminal(60, 12);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("*not styled*"), "code keeps literal asterisks");
}

#[test]
fn test_help_overlay_renders_keys() {
    let mut model = viewer_model(&[("readme.md", "body")]);
    model.help_visible = true;
    let mut terminal = create_test_terminal(60, 16);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("next / previous heading"));
}

#[test]
fn test_library_screen_ignores_tabs() {
    let mut model = viewer_model(&[("readme.md", "# Title")]);
    model.screen = Screen::Library;
    let mut terminal = create_test_terminal(60, 12);
    terminal.draw(|frame| render(&model, frame)).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("markshelf"));
    assert!(!text.contains("Title"));
}
