use crate::app::state::{AppState, LoadPhase, ShellMode};
use crate::ui::theme::Theme;
use crate::ui::truncate_to_width;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let bg = Style::default().bg(Theme::BG_ELEVATED);
    let sep = Span::styled(" │ ", Style::default().fg(Theme::BORDER_DIM).bg(Theme::BG_ELEVATED));

    let (phase_text, phase_color) = match (&state.mode, &state.shell.phase) {
        (ShellMode::ConfigError(_), _) => ("CONFIG", Theme::ACCENT_RED),
        (_, LoadPhase::Loading) => ("LOADING", Theme::ACCENT_AMBER),
        (_, LoadPhase::Ready) => ("READY", Theme::ACCENT_GREEN),
        (_, LoadPhase::Errored { .. }) => ("ERROR", Theme::ACCENT_RED),
    };

    let mut spans = vec![
        Span::styled(
            " ◆ webshell",
            Style::default()
                .fg(Theme::ACCENT_TEAL)
                .bg(Theme::BG_ELEVATED)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(
            phase_text,
            Style::default()
                .fg(phase_color)
                .bg(Theme::BG_ELEVATED)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let used: usize = spans.iter().map(|s| s.width()).sum::<usize>() + 3;
    let room = (area.width as usize).saturating_sub(used);

    let location = match (&state.shell.title, &state.shell.current_url, state.app_url()) {
        (Some(title), Some(url), _) => format!("{} ({})", title, url),
        (None, Some(url), _) => url.to_string(),
        (_, None, Some(app_url)) => app_url.to_string(),
        (_, None, None) => "no app URL".to_string(),
    };

    if room > 0 {
        spans.push(sep);
        spans.push(Span::styled(
            truncate_to_width(&location, room),
            Style::default().fg(Theme::TEXT_SECONDARY).bg(Theme::BG_ELEVATED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg), area);
}
