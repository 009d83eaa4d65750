mod event_log;
mod header;
mod input_box;
mod layout;
mod overlay;
mod page;
mod shell_panel;
mod status_bar;
mod theme;

use crate::app::state::{AppState, ShellMode};
use ratatui::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(frame, app_layout.header, state);
    page::render_summary(frame, app_layout.page, state);
    page::render_bridge(frame, app_layout.bridge, state);
    shell_panel::render(frame, app_layout.shell_state, state);
    event_log::render(frame, app_layout.events, state);
    input_box::render(frame, app_layout.input_box, state);
    status_bar::render(frame, app_layout.status_bar, state);

    match &state.mode {
        ShellMode::ConfigError(e) => {
            overlay::render_config_error(frame, app_layout.body, &e.to_string());
        }
        ShellMode::Running { .. } => {
            if let Some(message) = state.shell.error_message() {
                overlay::render_load_error(frame, app_layout.body, message);
            } else if state.shell.is_loading() {
                overlay::render_loading(frame, app_layout.page, state);
            }
        }
    }

    if state.show_help {
        overlay::render_help(frame);
    }
    if state.exit_prompt {
        overlay::render_exit_prompt(frame, state);
    }
}

/// Cut `s` to at most `max` display columns, ending in `…` when shortened.
pub(crate) fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
