use crate::app::state::AppState;
use crate::logging::{self, Level};
use crate::ui::theme::Theme;
use crate::ui::truncate_to_width;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Events ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());

    let inner = block.inner(area);
    let visible = inner.height as usize;
    let width = inner.width.saturating_sub(1) as usize;
    let skip = state.events.len().saturating_sub(visible);

    let items: Vec<ListItem> = state
        .events
        .iter()
        .skip(skip)
        .map(|record| {
            let style = match record.level {
                Level::Info => Theme::info(),
                Level::Warn => Theme::warn(),
                Level::Error => Theme::error(),
            };
            ListItem::new(Span::styled(
                format!(" {}", truncate_to_width(&logging::summary(record), width)),
                style,
            ))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
