use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    // Input is inert while a modal is up
    let focused = !state.exit_prompt && state.config_error().is_none();

    let block = Block::default()
        .title(" Command ")
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if focused {
            Style::default().fg(Theme::ACCENT_TEAL)
        } else {
            Theme::border()
        })
        .padding(Padding::horizontal(1))
        .style(Theme::panel_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_text = &state.input.text;

    if focused {
        let line = if input_text.is_empty() {
            Line::from(vec![
                Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
                Span::styled("/post, /open, /volume, /back, /reload", Theme::muted()),
            ])
        } else {
            Line::from(vec![
                Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
                Span::styled(input_text.as_str(), Theme::input_text()),
            ])
        };
        frame.render_widget(Paragraph::new(line), inner);

        if inner.width > 0 {
            // Cursor offset: chevron "❯ " (2 columns)
            let cursor_x = inner.x + 2 + state.input.cursor as u16;
            frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
        }
    } else {
        let paragraph = Paragraph::new(input_text.as_str()).style(Theme::muted());
        frame.render_widget(paragraph, inner);
    }
}
