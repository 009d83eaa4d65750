use crate::app::state::{AppState, Direction};
use crate::ui::theme::Theme;
use crate::ui::truncate_to_width;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

/// Summary of the hosted page: title, URL and origin.
pub fn render_summary(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Page ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .padding(Padding::horizontal(1))
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width.saturating_sub(8) as usize;
    let row = |label: &'static str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("{:<8}", label), Theme::label()),
            Span::styled(truncate_to_width(&value, width), style),
        ])
    };

    let title = state
        .shell
        .title
        .clone()
        .unwrap_or_else(|| "(untitled)".to_string());
    let url = state
        .shell
        .current_url
        .as_ref()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "-".to_string());
    let origin = state
        .app_url()
        .map(|u| u.origin().ascii_serialization())
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        row("title", title, Theme::value().add_modifier(Modifier::BOLD)),
        row("url", url, Theme::value()),
        row("origin", origin, Style::default().fg(Theme::ACCENT_LAVENDER)),
        row(
            "script",
            format!("{} bridge injected", crate::bridge::script::BRIDGE_GLOBAL),
            Theme::muted(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Messages crossing the bridge, newest at the bottom.
pub fn render_bridge(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Bridge ({}) ", state.bridge_log.len()))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());

    let visible = block.inner(area).height as usize;
    let width = block.inner(area).width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = if state.bridge_log.is_empty() {
        vec![ListItem::new(Span::styled(
            " No bridge traffic yet",
            Theme::muted(),
        ))]
    } else {
        let skip = state.bridge_log.len().saturating_sub(visible);
        state
            .bridge_log
            .iter()
            .skip(skip)
            .map(|t| {
                let (arrow, style) = match t.direction {
                    Direction::Inbound => (" ← ", Theme::inbound()),
                    Direction::Outbound => (" → ", Theme::outbound()),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(arrow, style.add_modifier(Modifier::BOLD)),
                    Span::styled(truncate_to_width(&t.payload, width), Theme::value()),
                ]))
            })
            .collect()
    };

    frame.render_widget(List::new(items).block(block), area);
}
