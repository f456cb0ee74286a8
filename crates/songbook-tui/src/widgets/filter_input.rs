//! FilterInput — wraps tui-input for use as the search box.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::Palette;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    /// The text was edited.
    Changed(String),
    /// Esc on a non-empty box: the text was wiped.
    Cleared,
    Confirmed,
    /// Esc on an empty box: leave the search box.
    Cancelled,
    None,
}

pub struct FilterInput {
    input: Input,
    active: bool,
    placeholder: String,
}

impl FilterInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Replace the text without emitting anything. A no-op when it already matches,
    /// so the cursor stays where the user left it.
    pub fn set_value(&mut self, value: &str) {
        if self.input.value() != value {
            self.input = Input::new(value.to_string());
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Esc => {
                if self.is_empty() {
                    self.deactivate();
                    FilterAction::Cancelled
                } else {
                    self.input = Input::default();
                    FilterAction::Cleared
                }
            }
            KeyCode::Enter => {
                self.deactivate();
                FilterAction::Confirmed
            }
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    FilterAction::None
                } else {
                    FilterAction::Changed(self.input.value().to_string())
                }
            }
        }
    }

    /// Render the search bar into `area` (one row).
    pub fn draw(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.input.value();
        let prompt_style = if self.active {
            palette.style_filter()
        } else {
            Style::default().fg(palette.secondary)
        };
        let display = if value.is_empty() {
            Span::styled(
                format!("/ {}", self.placeholder),
                Style::default().fg(palette.muted),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("/ {}", visible), prompt_style)
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(palette.style_filter());
        frame.render_widget(paragraph, area);

        if self.active && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for FilterInput {
    fn default() -> Self {
        Self::new("search titles and artists, a:name for an artist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_changes() {
        let mut input = FilterInput::default();
        input.activate();
        assert_eq!(
            input.handle_key(key(KeyCode::Char('z'))),
            FilterAction::Changed("z".into())
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('e'))),
            FilterAction::Changed("ze".into())
        );
    }

    #[test]
    fn test_esc_clears_then_cancels() {
        let mut input = FilterInput::default();
        input.activate();
        input.set_value("amy");
        assert_eq!(input.handle_key(key(KeyCode::Esc)), FilterAction::Cleared);
        assert!(input.is_active());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), FilterAction::Cancelled);
        assert!(!input.is_active());
    }

    #[test]
    fn test_enter_keeps_text() {
        let mut input = FilterInput::default();
        input.activate();
        input.set_value("mid");
        assert_eq!(input.handle_key(key(KeyCode::Enter)), FilterAction::Confirmed);
        assert_eq!(input.input.value(), "mid");
    }

    #[test]
    fn test_cursor_move_is_not_a_change() {
        let mut input = FilterInput::default();
        input.set_value("abc");
        assert_eq!(input.handle_key(key(KeyCode::Left)), FilterAction::None);
    }
}
