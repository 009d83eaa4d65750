use crate::app::commands::HELP_LINES;
use crate::app::state::AppState;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::time::Instant;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

fn popup_block(title: &'static str, accent: Color) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(Theme::BG_SURFACE))
}

/// Spinner over the content panel while a load is in flight.
pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let frame_idx = (state.tick_count / 2) as usize % SPINNER.len();
    let label = if state.shell.refreshing {
        "Refreshing...".to_string()
    } else {
        state.config.shell.loading_text.clone()
    };
    let width = (label.chars().count() as u16 + 10).max(24);
    let popup = centered(area, width, 3);
    frame.render_widget(Clear, popup);

    let line = Line::from(vec![
        Span::styled(
            SPINNER[frame_idx],
            Style::default()
                .fg(Theme::ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(label, Theme::value()),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(popup_block("", Theme::ACCENT_TEAL));
    frame.render_widget(paragraph, popup);
}

/// Full-screen load failure view with its Retry action.
pub fn render_load_error(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(Clear, area);
    let block = popup_block(" Loading Error ", Theme::ACCENT_RED);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Something went wrong while loading the app.",
            Theme::value().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.replace('\n', " "), Theme::error())),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Retry  ", Theme::button()),
            Span::styled("  Enter / F5", Theme::muted()),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered(inner, inner.width, 9));
}

/// Terminal view shown when the app URL is unusable.
pub fn render_config_error(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(Clear, area);
    let block = popup_block(" Configuration Error ", Theme::ACCENT_RED);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let path = crate::config::config_path();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Configuration Error",
            Theme::error().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Theme::value()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Set app_url in {} and restart.", path.display()),
        Theme::muted(),
    )));
    lines.push(Line::from(Span::styled("Ctrl+C to quit", Theme::muted())));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered(inner, inner.width, 12));
}

/// "Press back again" confirmation.
pub fn render_exit_prompt(frame: &mut Frame, state: &AppState) {
    let popup = centered(frame.area(), 44, 7);
    frame.render_widget(Clear, popup);

    let left = state
        .back_press
        .remaining(Instant::now())
        .unwrap_or_else(|| state.config.shell.exit_window());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Press back again to exit the app", Theme::value())),
        Line::from(Span::styled(
            format!("({:.1}s left)", left.as_secs_f64()),
            Theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " Cancel (n) ",
                Style::default().fg(Theme::TEXT_PRIMARY).bg(Theme::BG_ELEVATED),
            ),
            Span::raw("   "),
            Span::styled(" Exit (y) ", Theme::button()),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(popup_block(" Exit App ", Theme::ACCENT_AMBER));
    frame.render_widget(paragraph, popup);
}

pub fn render_help(frame: &mut Frame) {
    let width = HELP_LINES.iter().map(|l| l.len()).max().unwrap_or(0) as u16 + 6;
    let popup = centered(frame.area(), width, HELP_LINES.len() as u16 + 4);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = HELP_LINES
        .iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), Theme::label())))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" /help again to close", Theme::muted())));

    let paragraph = Paragraph::new(lines).block(popup_block(" Help ", Theme::ACCENT_LAVENDER));
    frame.render_widget(paragraph, popup);
}
