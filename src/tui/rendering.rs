use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::app::{InputMode, MessageType, StatusMessage};
use super::layout::AppLayout;
use super::theme::Palette;
use crate::render::timestamps::format_day;

/// Everything the frame needs, borrowed from the app for one draw
pub struct RenderState<'a> {
    pub title: &'a str,
    pub page_label: &'a str,
    pub loading: bool,
    pub sticky_day: Option<NaiveDate>,
    /// Rows of the message list currently in view
    pub visible_lines: &'a [Line<'static>],
    /// `None` until the first page has arrived
    pub page_len: Option<usize>,
    pub shown_count: usize,
    pub input_mode: InputMode,
    pub query_input: &'a str,
    pub date_input: &'a str,
    /// `false` when the date index is unavailable
    pub dates_enabled: bool,
    pub autoscroll: bool,
    pub status_message: Option<&'a StatusMessage>,
    pub palette: Palette,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, layout: &AppLayout, state: &RenderState) {
    let palette = &state.palette;
    frame.render_widget(Paragraph::new("").style(palette.base()), frame.area());

    render_header(frame, layout.header_area, state);
    if layout.sticky_area.height > 0 {
        render_sticky_header(frame, layout.sticky_area, state.sticky_day, palette);
    }
    render_messages(frame, layout.messages_area, state);
    render_input(frame, layout.input_area, state);
    render_status_bar(frame, layout.status_area, state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let mut right = state.page_label.to_string();
    if state.loading {
        right.push_str(" · loading…");
    }
    let left = format!(" lastseen · {}", state.title);
    let pad = usize::from(area.width)
        .saturating_sub(left.chars().count() + right.chars().count() + 1);

    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(pad)),
        Span::styled(format!("{} ", right), palette.muted()),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.bar()), area);
}

fn render_sticky_header(frame: &mut Frame, area: Rect, day: Option<NaiveDate>, palette: &Palette) {
    let label = day.map(format_day).unwrap_or_default();
    let line = Line::from(Span::styled(
        label,
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ))
    .centered();
    frame.render_widget(Paragraph::new(line), area);
}

fn render_messages(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let placeholder = match state.page_len {
        None => Some("Loading…"),
        Some(0) => Some("No messages on this page"),
        Some(_) if state.shown_count == 0 => Some("No messages match the search"),
        Some(_) => None,
    };
    let paragraph = match placeholder {
        Some(text) => Paragraph::new(Line::from(Span::styled(text, palette.muted())).centered()),
        None => Paragraph::new(state.visible_lines.to_vec()),
    };
    frame.render_widget(paragraph.style(palette.base()), area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let (prompt, value) = match state.input_mode {
        InputMode::Search => (" Search: ", state.query_input),
        InputMode::DatePrompt if state.dates_enabled => {
            (" Go to date (YYYY-MM-DD) or page: ", state.date_input)
        }
        InputMode::DatePrompt => (" Go to page: ", state.date_input),
    };
    let prompt_style = match state.input_mode {
        InputMode::Search => palette.muted(),
        InputMode::DatePrompt => Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    };
    let line = Line::from(vec![
        Span::styled(prompt, prompt_style),
        Span::raw(value.to_string()),
        Span::styled("█", Style::default().fg(palette.accent)),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let palette = &state.palette;
    let (text, style) = if let Some(msg) = state.status_message {
        let style = match msg.message_type {
            MessageType::Success => palette.bar().fg(palette.accent),
            MessageType::Error => palette.bar().fg(palette.error),
        };
        (format!(" {} ", msg.text), style)
    } else {
        let mut parts = Vec::new();
        if let Some(len) = state.page_len {
            if state.shown_count < len {
                parts.push(format!("{}/{} messages", state.shown_count, len));
            } else {
                parts.push(format!("{} messages", len));
            }
        }
        parts.push("←/→: page".to_string());
        parts.push("Ctrl+G: date".to_string());
        parts.push("Ctrl+T: theme".to_string());
        parts.push(format!("Ctrl+A: autoscroll {}", if state.autoscroll { "on" } else { "off" }));
        parts.push("Ctrl+Y: copy".to_string());
        parts.push(if state.query_input.is_empty() { "Esc: quit" } else { "Esc: clear" }.to_string());
        (format!(" {} ", parts.join(" | ")), palette.bar())
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
