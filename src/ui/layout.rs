use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub page: Rect,
    pub bridge: Rect,
    pub shell_state: Rect,
    pub events: Rect,
    pub input_box: Rect,
    pub status_bar: Rect,
    /// Everything between the header and the input box.
    pub body: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: header | content | input | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(8),    // Main content
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let header = main_chunks[0];
    let body = main_chunks[1];
    let input_box = main_chunks[2];
    let status_bar = main_chunks[3];

    // Horizontal: content | gap | side column
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Min(40),    // Content
            Constraint::Length(38), // Side column
        ])
        .split(body);

    let content = h_chunks[0];
    let side = h_chunks[1];

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Page summary
            Constraint::Min(3),    // Bridge traffic
        ])
        .split(content);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Shell state
            Constraint::Min(3),    // Event log
        ])
        .split(side);

    AppLayout {
        header,
        page: content_chunks[0],
        bridge: content_chunks[1],
        shell_state: side_chunks[0],
        events: side_chunks[1],
        input_box,
        status_bar,
        body,
    }
}

/// Rect of `width` x `height` centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}
