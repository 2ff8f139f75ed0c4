use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas of the viewer, top to bottom
pub struct AppLayout {
    pub header_area: Rect,
    /// Pinned day label; zero-height when the sticky header is disabled
    pub sticky_area: Rect,
    pub messages_area: Rect,
    pub input_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Header: title and page label (1 row)
    /// - Sticky day label (1 row, optional)
    /// - Message list: everything left
    /// - Search / date input (1 row)
    /// - Status bar (1 row)
    pub fn new(area: Rect, sticky_header: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(u16::from(sticky_header)),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            sticky_area: chunks[1],
            messages_area: chunks[2],
            input_area: chunks[3],
            status_area: chunks[4],
        }
    }
}
