//! Lays a page's render blocks out as terminal rows.
//!
//! Wrapping happens here rather than in the `Paragraph` widget so that the row
//! of every day separator and message is known. Those rows drive scrolling,
//! the sticky header and "copy the message at the top".

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use super::theme::Palette;
use crate::render::text::meta_line;
use crate::render::timestamps::format_day;
use crate::render::{Block, MessageView};
use crate::view::sticky::MarkerPosition;

/// Share of the width a bubble may occupy
const BUBBLE_WIDTH_PERCENT: usize = 75;
const MIN_BUBBLE_WIDTH: usize = 10;

#[derive(Debug, Default)]
pub struct Transcript {
    pub lines: Vec<Line<'static>>,
    pub markers: Vec<MarkerPosition>,
    /// `(first row, page index)` of every visible message, ascending
    message_rows: Vec<(usize, usize)>,
}

impl Transcript {
    pub fn build(blocks: &[Block], width: u16, palette: &Palette) -> Self {
        let width = usize::from(width).max(1);
        let bubble_width =
            (width * BUBBLE_WIDTH_PERCENT / 100).max(MIN_BUBBLE_WIDTH).min(width);
        let mut transcript = Self::default();
        let mut after_separator = false;

        for block in blocks {
            match block {
                Block::DaySeparator(date) => {
                    if !transcript.lines.is_empty() {
                        transcript.lines.push(Line::default());
                    }
                    transcript.markers.push(MarkerPosition { top: transcript.lines.len(), date: *date });
                    let label = format!("── {} ──", format_day(*date));
                    transcript.lines.push(Line::from(Span::styled(label, palette.muted())).centered());
                    after_separator = true;
                }
                Block::Message(view) => {
                    if view.group.show_meta && !after_separator && !transcript.lines.is_empty() {
                        transcript.lines.push(Line::default());
                    }
                    transcript.message_rows.push((transcript.lines.len(), view.index));
                    transcript.push_message(view, width, bubble_width, palette);
                    after_separator = false;
                }
            }
        }
        transcript
    }

    fn push_message(&mut self, view: &MessageView, width: usize, bubble_width: usize, palette: &Palette) {
        if view.group.show_meta {
            let pieces = vec![(meta_line(view), palette.muted().add_modifier(Modifier::BOLD))];
            for spans in wrap_styled(&pieces, width) {
                self.push_aligned(spans, view.outgoing, width);
            }
        }

        let body = palette.body(view.outgoing);
        let pieces: Vec<(String, Style)> = view
            .sanitized_segments()
            .into_iter()
            .map(|(segment, marked)| (segment, if marked { palette.highlight() } else { body }))
            .collect();
        let body_lines = wrap_styled(&pieces, bubble_width);
        if body_lines.is_empty() && view.attachments.is_empty() {
            self.lines.push(Line::default());
        }
        for spans in body_lines {
            self.push_aligned(spans, view.outgoing, width);
        }

        let attachment_style = palette.muted().add_modifier(Modifier::ITALIC);
        for attachment in &view.attachments {
            let pieces = vec![(attachment.summary(), attachment_style)];
            for spans in wrap_styled(&pieces, bubble_width) {
                self.push_aligned(spans, view.outgoing, width);
            }
        }
    }

    fn push_aligned(&mut self, spans: Vec<Span<'static>>, outgoing: bool, width: usize) {
        let mut line = Line::from(spans);
        if outgoing {
            let pad = width.saturating_sub(line.width());
            if pad > 0 {
                line.spans.insert(0, Span::raw(" ".repeat(pad)));
            }
        }
        self.lines.push(line);
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// First row of the message at page index `index`, if it is shown
    pub fn row_of_message(&self, index: usize) -> Option<usize> {
        self.message_rows.iter().find(|(_, i)| *i == index).map(|(row, _)| *row)
    }

    /// Page index of the message occupying `row` (or the nearest one above it)
    pub fn message_at_row(&self, row: usize) -> Option<usize> {
        let reached = self.message_rows.partition_point(|(start, _)| *start <= row);
        match reached {
            0 => self.message_rows.first().map(|(_, i)| *i),
            n => Some(self.message_rows[n - 1].1),
        }
    }

    /// Row of the first shown message at or after page index `index`
    pub fn row_at_or_after(&self, index: usize) -> Option<usize> {
        self.message_rows.iter().find(|(_, i)| *i >= index).map(|(row, _)| *row)
    }
}

/// Wrap styled text at `width` terminal columns, breaking on newlines and hard
/// at the edge. Wide characters count as two columns.
fn wrap_styled(pieces: &[(String, Style)], width: usize) -> Vec<Vec<Span<'static>>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut buffer = String::new();
    let mut column = 0;

    for (text, style) in pieces {
        for ch in text.chars() {
            if ch == '\n' {
                flush(&mut current, &mut buffer, *style);
                lines.push(std::mem::take(&mut current));
                column = 0;
                continue;
            }
            let ch = if ch == '\t' { ' ' } else { ch };
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if column > 0 && column + w > width {
                flush(&mut current, &mut buffer, *style);
                lines.push(std::mem::take(&mut current));
                column = 0;
            }
            buffer.push(ch);
            column += w;
        }
        flush(&mut current, &mut buffer, *style);
    }
    if !current.is_empty() || (lines.is_empty() && pieces.iter().any(|(t, _)| !t.is_empty())) {
        lines.push(current);
    }
    lines
}

fn flush(current: &mut Vec<Span<'static>>, buffer: &mut String, style: Style) {
    if !buffer.is_empty() {
        current.push(Span::styled(std::mem::take(buffer), style));
    }
}
