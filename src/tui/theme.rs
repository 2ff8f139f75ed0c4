use ratatui::style::{Color, Modifier, Style};

use crate::prefs::Theme;

/// Colors used by the terminal viewer for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub outgoing_text: Color,
    pub incoming_text: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
    pub bar_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(24, 24, 27),
                text: Color::Rgb(250, 250, 250),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(16, 185, 129),
                outgoing_text: Color::Rgb(110, 231, 183),
                incoming_text: Color::Rgb(228, 228, 231),
                highlight_fg: Color::Rgb(24, 24, 27),
                highlight_bg: Color::Rgb(253, 224, 71),
                error: Color::Rgb(239, 68, 68),
                bar_bg: Color::Rgb(39, 39, 42),
            },
            Theme::Light => Self {
                background: Color::Rgb(250, 250, 250),
                text: Color::Rgb(24, 24, 27),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(5, 150, 105),
                outgoing_text: Color::Rgb(4, 120, 87),
                incoming_text: Color::Rgb(39, 39, 42),
                highlight_fg: Color::Rgb(24, 24, 27),
                highlight_bg: Color::Rgb(253, 224, 71),
                error: Color::Rgb(220, 38, 38),
                bar_bg: Color::Rgb(228, 228, 231),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.highlight_fg).bg(self.highlight_bg).add_modifier(Modifier::BOLD)
    }

    pub fn bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.bar_bg)
    }

    pub fn body(&self, outgoing: bool) -> Style {
        Style::default().fg(if outgoing { self.outgoing_text } else { self.incoming_text })
    }
}
