use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Tabs};

use crate::app::{LibraryEntry, Model, Screen};

use super::flow::RenderedLine;
use super::status;

/// Columns of left padding inside the document pane.
pub const DOCUMENT_LEFT_PADDING: u16 = 2;

/// Width available to document text once padding is subtracted.
pub fn content_width(total_width: u16) -> u16 {
    total_width.saturating_sub(DOCUMENT_LEFT_PADDING).max(1)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    match model.screen {
        Screen::Library => render_library(model, frame, area),
        Screen::Viewer => render_viewer(model, frame, area),
    }

    if model.help_visible {
        render_help_overlay(model, frame, area);
    }
}

fn render_viewer(model: &Model, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_tab_bar(model, frame, rows[0]);
    render_document(model, frame, rows[1]);
    status::render_status_bar(model, frame, rows[2]);
}

fn render_tab_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = model
        .tabs
        .iter()
        .map(|tab| Line::from(tab.title.clone()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(model.active_index())
        .style(model.theme.status)
        .highlight_style(model.theme.tab_active)
        .divider("│");
    frame.render_widget(tabs, area);
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(tab) = model.active_tab() else {
        return;
    };

    let range = tab.viewport.visible_range();
    let lines: Vec<Line> = tab
        .rendered
        .visible_lines(range.start, range.len())
        .iter()
        .map(|line| styled_line(model, line))
        .collect();

    let document = Paragraph::new(lines)
        .block(Block::default().padding(Padding::left(DOCUMENT_LEFT_PADDING)));
    frame.render_widget(document, area);
}

fn styled_line(model: &Model, line: &RenderedLine) -> Line<'static> {
    let base = model.theme.line_style(line.line_type());
    let spans: Vec<Span> = line
        .spans()
        .iter()
        .map(|span| {
            Span::styled(
                span.text().to_string(),
                model.theme.span_style(base, span.style()),
            )
        })
        .collect();
    Line::from(spans)
}

fn render_library(model: &Model, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Paragraph::new(" markshelf — select a doc").style(model.theme.status);
    frame.render_widget(header, rows[0]);

    if model.entries.is_empty() {
        let hint = Paragraph::new(
            "\n  Library is empty.\n\n  Run `markshelf <folder>` once to add a folder here.",
        );
        frame.render_widget(hint, rows[1]);
    } else {
        let visible_rows = rows[1].height as usize;
        let start = model
            .selected_entry
            .saturating_sub(visible_rows.saturating_sub(1));
        let items: Vec<Line> = model
            .entries
            .iter()
            .enumerate()
            .skip(start)
            .take(visible_rows)
            .map(|(i, entry)| library_line(model, i, entry))
            .collect();
        frame.render_widget(Paragraph::new(items), rows[1]);
    }

    status::render_status_bar(model, frame, rows[2]);
}

fn library_line(model: &Model, index: usize, entry: &LibraryEntry) -> Line<'static> {
    let marker = if model.selected_entry == index {
        ">"
    } else {
        " "
    };
    let (label, style) = match entry {
        LibraryEntry::Folder(path) => (
            format!("{marker} {}", path.display()),
            Style::default().fg(Color::Cyan),
        ),
        LibraryEntry::Bundle(path) => {
            let stem = path
                .file_stem()
                .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().to_string());
            (
                format!("{marker} {stem} [bundle]"),
                Style::default().fg(Color::Magenta),
            )
        }
    };
    let style = if model.selected_entry == index {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };
    Line::styled(label, style)
}

fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let lines = match model.screen {
        Screen::Library => vec![
            "j/k, arrows  move selection",
            "Enter        open folder or bundle",
            "r            refresh the library",
            "q, Esc       quit",
        ],
        Screen::Viewer => vec![
            "j/k, arrows      scroll",
            "Space/b          page down / up",
            "Ctrl-d/Ctrl-u    half page down / up",
            "g/G              top / bottom",
            "n/p              next / previous heading",
            "Tab, h/l, 1-9    switch tabs",
            "S                pack folder into the library storage",
            "I                write an initial index.json",
            "L, Esc           back to the library",
            "q                quit",
        ],
    };

    let width = 46.min(area.width);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let block = Block::default()
        .title(" keys (any key to close) ")
        .borders(Borders::ALL);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}
