//! Theming and color definitions.
//!
//! Visual styling for rendered markdown elements, using ANSI colors that
//! adapt to the terminal's palette. Span styles layer on top of the
//! line's base style so a bold run inside a heading keeps the heading
//! color.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

use super::flow::{InlineStyle, LineType};

/// Theme for the entire application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Heading level 1 style
    pub h1: Style,
    /// Heading level 2 style
    pub h2: Style,
    /// Heading level 3 style
    pub h3: Style,
    /// Code block style
    pub code: Style,
    /// Inline code style
    pub inline_code: Style,
    /// Link label style
    pub link: Style,
    /// Tab bar highlight for the active tab
    pub tab_active: Style,
    /// Status bar style
    pub status: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Pick a theme for the requested mode. `Auto` currently means dark;
    /// most terminals report nothing useful without an OSC round-trip.
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Auto | ThemeMode::Dark => Self::dark(),
        }
    }

    /// Theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            h3: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(245)),
            inline_code: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            status: Style::default().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
        }
    }

    /// Theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Indexed(31)) // Darker cyan
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Indexed(28)) // Darker green
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Indexed(136)) // Darker yellow/olive
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(240)),
            inline_code: Style::default()
                .fg(Color::Indexed(124)) // Darker red
                .add_modifier(Modifier::BOLD),
            link: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::UNDERLINED),
            tab_active: Style::default()
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            status: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
        }
    }

    /// Base style for a line type.
    pub fn line_style(&self, line_type: &LineType) -> Style {
        match line_type {
            LineType::Heading(1) => self.h1,
            LineType::Heading(2) => self.h2,
            LineType::Heading(_) => self.h3,
            LineType::CodeBlock => self.code,
            LineType::Paragraph | LineType::Empty => Style::default(),
        }
    }

    /// Span style merged onto the line's base style.
    pub fn span_style(&self, base: Style, inline: InlineStyle) -> Style {
        let mut style = base;
        if inline.emphasis {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if inline.strong {
            style = style.add_modifier(Modifier::BOLD);
        }
        if inline.code {
            style = style.patch(self.inline_code);
        }
        if inline.link {
            style = style.patch(self.link);
        }
        if inline.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        style
    }
}
