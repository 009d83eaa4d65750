use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    let (badge, color) = if state.back_press.is_pending() {
        (" EXIT? ", Theme::ACCENT_AMBER)
    } else if state.shell.refreshing {
        (" REFRESH ", Theme::ACCENT_BLUE)
    } else {
        (" SHELL ", Theme::ACCENT_TEAL)
    };
    parts.push(Span::styled(
        badge,
        Style::default()
            .fg(Theme::BG_SURFACE)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    ));

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    let hint = " /help ";
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + hint.len());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        hint,
        Style::default().fg(Theme::TEXT_MUTED).bg(Theme::BG_ELEVATED),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
