use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::event_loop::ResizeDebouncer;
use super::model::{Model, Screen};
use super::update::Message;
use crate::app::App;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(width, height) => {
                resize_debouncer.queue(*width, *height, now_ms);
                None
            }
            _ => None,
        }
    }

    fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        match (mouse.kind, model.screen) {
            (MouseEventKind::ScrollDown, Screen::Viewer) => {
                let tab = model.active_tab()?;
                tab.viewport.can_scroll_down().then_some(Message::ScrollDown(3))
            }
            (MouseEventKind::ScrollUp, Screen::Viewer) => {
                let tab = model.active_tab()?;
                tab.viewport.can_scroll_up().then_some(Message::ScrollUp(3))
            }
            (MouseEventKind::ScrollDown, Screen::Library) => Some(Message::LibraryDown),
            (MouseEventKind::ScrollUp, Screen::Library) => Some(Message::LibraryUp),
            _ => None,
        }
    }

    fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        match model.screen {
            Screen::Library => Self::handle_library_key(key),
            Screen::Viewer => Self::handle_viewer_key(key, model),
        }
    }

    fn handle_library_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Message::LibraryDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Message::LibraryUp),
            KeyCode::Enter => Some(Message::OpenSelected),
            KeyCode::Char('r') => Some(Message::OpenLibrary),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
            _ => None,
        }
    }

    fn handle_viewer_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => {
                let tab = model.active_tab()?;
                tab.viewport.can_scroll_down().then_some(Message::ScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let tab = model.active_tab()?;
                tab.viewport.can_scroll_up().then_some(Message::ScrollUp(1))
            }
            KeyCode::Char(' ') | KeyCode::PageDown => Some(Message::PageDown),
            KeyCode::Char('b') | KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),
            KeyCode::Char('n') => Some(Message::NextHeading),
            KeyCode::Char('p') => Some(Message::PrevHeading),

            // Tabs
            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => Some(Message::NextTab),
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => Some(Message::PrevTab),
            KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                Some(Message::SelectTab(usize::from(c as u8 - b'1')))
            }

            // Storage
            KeyCode::Char('S') => Some(Message::SaveBundle),
            KeyCode::Char('I') => Some(Message::WriteIndex),

            // Screens
            KeyCode::Char('L') | KeyCode::Esc => Some(Message::OpenLibrary),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),
            _ => None,
        }
    }
}
