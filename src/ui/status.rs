use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

/// Bottom bar: an active toast wins the row, otherwise position info.
pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    if let Some((message, level)) = model.active_toast() {
        render_toast(message, level, frame, area);
        return;
    }

    let Some(tab) = model.active_tab() else {
        let bar = Paragraph::new(" Enter: open  r: refresh  ?: help  q: quit")
            .style(model.theme.status);
        frame.render_widget(bar, area);
        return;
    };

    let percent = tab.viewport.scroll_percent();
    let status = format!(
        " {}  [tab {}/{}]  [{}%]  Line {}/{}  ?:help",
        tab.title,
        model.active_index() + 1,
        model.tabs.len(),
        percent,
        tab.viewport.offset() + 1,
        tab.viewport.total_lines().max(1),
    );

    let status_bar = Paragraph::new(status).style(model.theme.status);
    frame.render_widget(status_bar, area);
}

fn render_toast(message: &str, level: ToastLevel, frame: &mut Frame, area: Rect) {
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
