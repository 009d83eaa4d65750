use crate::app::back_press::BackPressState;
use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Shell ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .padding(Padding::horizontal(1))
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let shell = &state.shell;
    let flag = |label: &'static str, on: bool| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), Theme::label()),
            Span::styled(if on { "yes" } else { "no" }, Theme::flag(on)),
        ])
    };

    let back = match state.back_press.state() {
        BackPressState::Idle => "idle",
        BackPressState::PendingExit { .. } => "pending exit",
    };

    let lines = vec![
        flag("loading", shell.is_loading()),
        flag("errored", shell.is_errored()),
        flag("can go back", shell.can_go_back),
        flag("refreshing", shell.refreshing),
        Line::from(vec![
            Span::styled(format!("{:<12}", "back press"), Theme::label()),
            Span::styled(
                back,
                if state.back_press.is_pending() {
                    Theme::warn()
                } else {
                    Theme::muted()
                },
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_ELEVATED))
        .ratio(shell.volume.clamp(0.0, 1.0))
        .label(format!("vol {:.0}%", shell.volume * 100.0));
    frame.render_widget(gauge, chunks[1]);
}
