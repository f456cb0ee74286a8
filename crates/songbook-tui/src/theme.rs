//! Color palettes for the two display themes.

use ratatui::style::{Color, Modifier, Style};
use songbook_core::prefs::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub accent: Color,
    pub primary: Color,
    pub secondary: Color,
    pub muted: Color,
    pub separator: Color,
    pub selection_bg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub number_hint: Color,
    pub filter_bg: Color,
    pub filter_fg: Color,
    pub artist: Color,
    pub audio: Color,
    pub highlight: Color,
    pub mode_normal: Color,
    pub mode_search: Color,
    pub toast_info: Color,
    pub toast_success: Color,
    pub toast_warning: Color,
    pub toast_error: Color,
}

pub const DARK: Palette = Palette {
    bg: Color::Rgb(18, 18, 18),
    accent: Color::Rgb(255, 95, 95),
    primary: Color::Rgb(210, 210, 225),
    secondary: Color::Rgb(115, 115, 138),
    muted: Color::Rgb(72, 72, 88),
    separator: Color::Rgb(40, 40, 52),
    selection_bg: Color::Rgb(28, 28, 40),
    border: Color::Rgb(40, 40, 52),
    border_focused: Color::Rgb(120, 100, 200),
    number_hint: Color::Rgb(90, 90, 115),
    filter_bg: Color::Rgb(20, 20, 32),
    filter_fg: Color::Rgb(255, 200, 80),
    artist: Color::Rgb(80, 140, 200),
    audio: Color::Rgb(80, 200, 120),
    highlight: Color::Rgb(60, 52, 96),
    mode_normal: Color::Rgb(115, 115, 138),
    mode_search: Color::Rgb(255, 200, 80),
    toast_info: Color::Rgb(80, 160, 220),
    toast_success: Color::Rgb(80, 200, 120),
    toast_warning: Color::Rgb(255, 184, 80),
    toast_error: Color::Rgb(255, 95, 95),
};

pub const LIGHT: Palette = Palette {
    bg: Color::Rgb(246, 244, 238),
    accent: Color::Rgb(200, 50, 50),
    primary: Color::Rgb(32, 32, 40),
    secondary: Color::Rgb(96, 96, 112),
    muted: Color::Rgb(150, 150, 162),
    separator: Color::Rgb(214, 212, 204),
    selection_bg: Color::Rgb(226, 222, 240),
    border: Color::Rgb(200, 198, 190),
    border_focused: Color::Rgb(100, 72, 190),
    number_hint: Color::Rgb(140, 140, 160),
    filter_bg: Color::Rgb(236, 232, 220),
    filter_fg: Color::Rgb(150, 90, 0),
    artist: Color::Rgb(30, 100, 170),
    audio: Color::Rgb(30, 140, 70),
    highlight: Color::Rgb(214, 204, 246),
    mode_normal: Color::Rgb(96, 96, 112),
    mode_search: Color::Rgb(150, 90, 0),
    toast_info: Color::Rgb(30, 110, 180),
    toast_success: Color::Rgb(30, 140, 70),
    toast_warning: Color::Rgb(180, 110, 0),
    toast_error: Color::Rgb(200, 50, 50),
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => DARK,
            ThemeMode::Light => LIGHT,
        }
    }

    pub fn style_default(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn style_secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn style_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn style_selected(&self) -> Style {
        Style::default().bg(self.selection_bg).fg(self.primary)
    }

    pub fn style_selected_focused(&self) -> Style {
        self.style_selected().add_modifier(Modifier::BOLD)
    }

    pub fn style_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn style_filter(&self) -> Style {
        Style::default().fg(self.filter_fg).bg(self.filter_bg)
    }
}

impl Default for Palette {
    fn default() -> Self {
        DARK
    }
}
