use crate::app::action::Action;
use crate::app::back_press::BackOutcome;
use crate::app::commands::{self, ParsedCommand};
use crate::app::event::{AppEvent, ContentEvent};
use crate::app::navigation::{self, NavTarget};
use crate::app::state::*;
use crate::bridge::{self, InboundMessage, OutboundMessage};
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_json::json;
use std::time::Instant;
use url::Url;

/// Start the shell: read the initial volume and load the configured URL, or
/// record why the configuration cannot be used.
pub fn mount(state: &mut AppState) -> Vec<Action> {
    state.log_info("app_start", json!({ "version": env!("CARGO_PKG_VERSION") }));

    let app_url = match &state.mode {
        ShellMode::Running { app_url } => app_url.clone(),
        ShellMode::ConfigError(e) => {
            let (reason, message) = (e.reason(), e.to_string());
            state.log_error("config_error", json!({ "reason": reason, "message": message }));
            return vec![];
        }
    };

    let volume = get_volume(state);
    vec![Action::Load {
        url: app_url,
        injected_script: bridge::script::injected_script(volume),
    }]
}

pub fn handle_event(state: &mut AppState, event: AppEvent, now: Instant) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent, now)
        }
        AppEvent::Content(event) => handle_content(state, event),
        AppEvent::Tick => handle_tick(state, now),
    }
}

fn handle_tick(state: &mut AppState, now: Instant) -> Vec<Action> {
    state.tick_count = state.tick_count.wrapping_add(1);
    expire_back_press(state, now);

    // Spinner and exit countdown
    if state.shell.is_loading() || state.back_press.is_pending() {
        state.dirty = true;
    }
    vec![]
}

fn handle_content(state: &mut AppState, event: ContentEvent) -> Vec<Action> {
    // Nothing is loaded while the configuration is unusable.
    let Some(app_url) = state.app_url().cloned() else {
        return vec![];
    };

    match event {
        ContentEvent::LoadStart { url } => {
            state.log_info("wv_load_start", json!({ "url": url }));
            state.shell.phase = LoadPhase::Loading;
            state.shell.title = None;
            if let Ok(parsed) = Url::parse(&url) {
                state.shell.current_url = Some(parsed);
            }
            state.dirty = true;
            vec![]
        }
        ContentEvent::LoadEnd { url } => {
            state.log_info("wv_load_finish", json!({ "url": url }));
            state.shell.phase = LoadPhase::Ready;
            state.shell.refreshing = false;
            state.dirty = true;
            vec![]
        }
        ContentEvent::LoadError {
            url,
            code,
            description,
        } => {
            handle_load_error(state, &url, code, description);
            vec![]
        }
        ContentEvent::NavigationStateChange {
            url,
            can_go_back,
            redirect,
        } => handle_navigation(state, &app_url, &url, can_go_back, redirect),
        ContentEvent::Message { data } => handle_bridge_message(state, &data),
        ContentEvent::PageTitle { title } => {
            state.shell.title = Some(title);
            state.dirty = true;
            vec![]
        }
    }
}

fn handle_load_error(state: &mut AppState, url: &str, code: Option<i32>, description: Option<String>) {
    let message = format!(
        "WebView Error: {}",
        description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("Unknown error")
    );
    state.log_error(
        "wv_error",
        json!({ "url": url, "code": code, "description": description }),
    );
    state.shell.phase = LoadPhase::Errored {
        message: message.clone(),
    };
    state.dirty = true;

    if let Some(hook) = state.on_error.as_mut() {
        hook(&message);
    }
}

/// Keep in-app navigations inside the shell; hand everything else to the
/// system browser.
fn handle_navigation(
    state: &mut AppState,
    app_url: &Url,
    raw: &str,
    can_go_back: bool,
    redirect: bool,
) -> Vec<Action> {
    state.shell.can_go_back = can_go_back;
    state.dirty = true;

    match navigation::classify(app_url, state.shell.current_url.as_ref(), raw) {
        NavTarget::InApp(url) if state.shell.current_url.as_ref() == Some(&url) => vec![],
        NavTarget::InApp(url) if redirect => vec![Action::Replace { url }],
        NavTarget::InApp(url) => vec![Action::Navigate { url }],
        NavTarget::External(url) => {
            state.log_info("external_link_opened", json!({ "url": url.as_str() }));
            vec![Action::OpenExternal {
                url: url.to_string(),
            }]
        }
        NavTarget::Invalid => {
            state.log_warn("navigation_rejected", json!({ "url": raw }));
            vec![]
        }
    }
}

/// Dispatch one payload posted by the page. Nothing here can fail the shell:
/// undecodable payloads are logged and dropped.
pub fn handle_bridge_message(state: &mut AppState, data: &str) -> Vec<Action> {
    state.record_traffic(Direction::Inbound, data.to_string());

    match bridge::parse_inbound(data) {
        Ok(InboundMessage::JsError {
            message,
            stack,
            url,
        }) => {
            state.log_error(
                "js_error_forwarded",
                json!({ "message": message, "stack": stack, "url": url }),
            );
            vec![]
        }
        Ok(InboundMessage::VolumeChange { volume }) => set_volume(state, volume),
        Ok(InboundMessage::Unknown) => {
            state.log_warn(
                "invalid_js_message",
                json!({ "data": data, "reason": "unknown_type" }),
            );
            vec![]
        }
        Err(e) => {
            state.log_warn(
                "invalid_js_message",
                json!({ "data": data, "reason": e.reason(), "error": e.to_string() }),
            );
            vec![]
        }
    }
}

fn get_volume(state: &mut AppState) -> f64 {
    let configured = state.config.shell.default_volume;
    if valid_volume(configured).is_none() {
        state.log_warn(
            "volume_get_failed",
            json!({ "error": format!("configured default volume {} is outside 0.0-1.0", configured) }),
        );
    }
    let volume = state.shell.volume;
    state.log_info("volume_get", json!({ "volume": volume }));
    volume
}

/// Apply a volume level from either side and tell the page about it.
pub fn set_volume(state: &mut AppState, volume: f64) -> Vec<Action> {
    let Some(volume) = valid_volume(volume) else {
        state.log_error(
            "volume_set_failed",
            json!({ "error": "volume must be a number between 0.0 and 1.0", "volume": volume }),
        );
        return vec![];
    };

    let data = match (OutboundMessage::SystemVolumeChange { volume }).to_wire() {
        Ok(data) => data,
        Err(e) => {
            state.log_error(
                "volume_set_failed",
                json!({ "error": e.to_string(), "volume": volume }),
            );
            return vec![];
        }
    };

    state.shell.volume = volume;
    state.log_info("volume_changed", json!({ "volume": volume }));

    if state.app_url().is_none() {
        return vec![];
    }
    state.record_traffic(Direction::Outbound, data.clone());
    vec![Action::PostMessage { data }]
}

fn step_volume(state: &mut AppState, delta: f64) -> Vec<Action> {
    let stepped = ((state.shell.volume + delta).clamp(0.0, 1.0) * 100.0).round() / 100.0;
    set_volume(state, stepped)
}

/// Pull-to-refresh, also used as the retry action of the error view.
pub fn refresh(state: &mut AppState) -> Vec<Action> {
    if state.app_url().is_none() {
        return vec![];
    }
    state.shell.refreshing = true;
    state.shell.phase = LoadPhase::Loading;
    state.dirty = true;
    vec![Action::Reload]
}

pub fn handle_back_press(state: &mut AppState, now: Instant) -> Vec<Action> {
    expire_back_press(state, now);

    match state.back_press.press(state.shell.can_go_back, now) {
        BackOutcome::WebViewBack => {
            state.log_info("nav_back", json!({ "action": "webview_back" }));
            vec![Action::GoBack]
        }
        BackOutcome::FirstPress => {
            state.log_info("nav_back", json!({ "action": "first_back_press" }));
            if state.config.shell.confirm_exit {
                state.exit_prompt = true;
            } else {
                state.status_message = Some("Press back again to exit".to_string());
            }
            vec![]
        }
        BackOutcome::Exit => exit_app(state),
    }
}

fn exit_app(state: &mut AppState) -> Vec<Action> {
    state.exit_prompt = false;
    state.log_info("nav_back", json!({ "action": "exit_app" }));
    vec![Action::ExitApp]
}

fn expire_back_press(state: &mut AppState, now: Instant) {
    if state.back_press.expire(now) {
        state.log_info("nav_back", json!({ "action": "exit_window_expired" }));
        state.exit_prompt = false;
        state.status_message = None;
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent, now: Instant) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key, now),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return vec![Action::ExitApp];
    }

    // The exit prompt is modal
    if state.exit_prompt {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => exit_app(state),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                state.exit_prompt = false;
                state.log_info("nav_back", json!({ "action": "exit_cancelled" }));
                vec![]
            }
            KeyCode::Esc => handle_back_press(state, now),
            _ => vec![],
        };
    }

    match key.code {
        KeyCode::Esc => handle_back_press(state, now),
        KeyCode::F(5) => refresh(state),
        KeyCode::Char('r') if ctrl => refresh(state),
        KeyCode::F(7) => {
            let step = state.config.shell.volume_step;
            step_volume(state, -step)
        }
        KeyCode::F(8) => {
            let step = state.config.shell.volume_step;
            step_volume(state, step)
        }
        KeyCode::Enter if state.input.text.is_empty() && state.shell.is_errored() => refresh(state),
        _ => handle_input_key(state, key, now),
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Vec<Action> {
    match key.code {
        KeyCode::Enter => {
            let text = state.input.take_text();
            if text.trim().is_empty() {
                return vec![];
            }
            handle_command(state, &text, now)
        }
        KeyCode::Backspace => {
            state.input.delete_back();
            vec![]
        }
        KeyCode::Left => {
            state.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            state.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            state.input.move_home();
            vec![]
        }
        KeyCode::End => {
            state.input.move_end();
            vec![]
        }
        KeyCode::Up => {
            state.input.history_up();
            vec![]
        }
        KeyCode::Down => {
            state.input.history_down();
            vec![]
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => state.input.move_home(),
                    'e' => state.input.move_end(),
                    'u' => state.input.clear(),
                    _ => {}
                }
            } else {
                state.input.insert_char(c);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_command(state: &mut AppState, text: &str, now: Instant) -> Vec<Action> {
    state.status_message = None;

    match commands::parse_command(text) {
        Ok(ParsedCommand::Post { payload }) => {
            if state.app_url().is_none() {
                state.status_message = Some("No content is loaded".to_string());
                return vec![];
            }
            handle_bridge_message(state, &payload)
        }
        Ok(ParsedCommand::Open { url }) => {
            let Some(app_url) = state.app_url().cloned() else {
                state.status_message = Some("No content is loaded".to_string());
                return vec![];
            };
            let can_go_back = state.shell.can_go_back;
            handle_navigation(state, &app_url, &url, can_go_back, false)
        }
        Ok(ParsedCommand::Volume { volume }) => set_volume(state, volume),
        Ok(ParsedCommand::Back) => handle_back_press(state, now),
        Ok(ParsedCommand::Reload) => refresh(state),
        Ok(ParsedCommand::Help) => {
            state.show_help = !state.show_help;
            vec![]
        }
        Ok(ParsedCommand::Quit) => vec![Action::ExitApp],
        Err(msg) => {
            state.status_message = Some(msg);
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::logging::{Level, LogRecord};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    const APP: &str = "https://app.example.com/";

    fn running() -> AppState {
        let config = AppConfig {
            app_url: Some(APP.to_string()),
            ..AppConfig::default()
        };
        AppState::new(config)
    }

    fn content(state: &mut AppState, event: ContentEvent) -> Vec<Action> {
        handle_event(state, AppEvent::Content(event), Instant::now())
    }

    fn message(state: &mut AppState, data: &str) -> Vec<Action> {
        content(state, ContentEvent::Message { data: data.to_string() })
    }

    fn key_at(state: &mut AppState, code: KeyCode, now: Instant) -> Vec<Action> {
        let event = CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE));
        handle_event(state, AppEvent::Terminal(event), now)
    }

    fn type_line(state: &mut AppState, line: &str) -> Vec<Action> {
        let now = Instant::now();
        for c in line.chars() {
            key_at(state, KeyCode::Char(c), now);
        }
        key_at(state, KeyCode::Enter, now)
    }

    fn logged<'a>(state: &'a AppState, event: &str) -> Vec<&'a LogRecord> {
        state.pending_logs.iter().filter(|r| r.event == event).collect()
    }

    fn back_actions(state: &AppState) -> Vec<String> {
        state
            .pending_logs
            .iter()
            .filter(|r| r.event == "nav_back")
            .filter_map(|r| r.meta_str("action").map(str::to_string))
            .collect()
    }

    fn loaded(state: &mut AppState) {
        content(state, ContentEvent::LoadStart { url: APP.into() });
        content(state, ContentEvent::LoadEnd { url: APP.into() });
        state.pending_logs.clear();
    }

    #[test]
    fn test_mount_loads_configured_url() {
        let mut state = running();
        let actions = mount(&mut state);
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::Load { url, injected_script } => {
                assert_eq!(url.as_str(), APP);
                assert!(injected_script.contains("var currentVolume = 0.8;"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(logged(&state, "app_start").len(), 1);
        assert_eq!(logged(&state, "volume_get").len(), 1);
        assert!(logged(&state, "volume_get_failed").is_empty());
    }

    #[test]
    fn test_mount_with_bad_default_volume() {
        let mut config = AppConfig {
            app_url: Some(APP.to_string()),
            ..AppConfig::default()
        };
        config.shell.default_volume = -1.0;
        let mut state = AppState::new(config);
        mount(&mut state);
        assert_eq!(logged(&state, "volume_get_failed")[0].level, Level::Warn);
        assert_eq!(state.shell.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn test_config_error_is_terminal() {
        let mut state = AppState::new(AppConfig {
            app_url: Some("http://example.com".into()),
            ..AppConfig::default()
        });
        assert!(mount(&mut state).is_empty());
        let record = logged(&state, "config_error")[0];
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.meta_str("reason"), Some("not_https"));

        // No retry path and content events are ignored
        assert!(refresh(&mut state).is_empty());
        assert!(content(&mut state, ContentEvent::LoadEnd { url: APP.into() }).is_empty());
        assert!(state.shell.is_loading());
        assert!(state.config_error().is_some());
    }

    #[test]
    fn test_load_lifecycle() {
        let mut state = running();
        content(&mut state, ContentEvent::LoadStart { url: APP.into() });
        assert!(state.shell.is_loading());
        assert_eq!(state.shell.current_url.as_ref().map(Url::as_str), Some(APP));
        content(&mut state, ContentEvent::LoadEnd { url: APP.into() });
        assert_eq!(state.shell.phase, LoadPhase::Ready);
        assert_eq!(logged(&state, "wv_load_start")[0].meta_str("url"), Some(APP));
        assert_eq!(logged(&state, "wv_load_finish").len(), 1);
    }

    #[test]
    fn test_load_failure_then_retry() {
        let mut state = running();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.on_error = Some(Box::new(move |msg: &str| sink.borrow_mut().push(msg.to_string())));

        content(&mut state, ContentEvent::LoadStart { url: APP.into() });
        content(
            &mut state,
            ContentEvent::LoadError {
                url: APP.into(),
                code: Some(-1009),
                description: Some("The Internet connection appears to be offline.".into()),
            },
        );
        assert!(state.shell.is_errored());
        assert_eq!(
            state.shell.error_message(),
            Some("WebView Error: The Internet connection appears to be offline.")
        );
        assert_eq!(seen.borrow().len(), 1);
        let record = logged(&state, "wv_error")[0];
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.meta.as_ref().unwrap()["code"], -1009);

        // Enter on the error view retries
        let actions = key_at(&mut state, KeyCode::Enter, Instant::now());
        assert_eq!(actions, vec![Action::Reload]);
        assert!(state.shell.is_loading());
        assert!(!state.shell.is_errored());
        assert_eq!(state.shell.error_message(), None);
    }

    #[test]
    fn test_load_failure_without_description() {
        let mut state = running();
        content(
            &mut state,
            ContentEvent::LoadError {
                url: APP.into(),
                code: None,
                description: None,
            },
        );
        assert_eq!(state.shell.error_message(), Some("WebView Error: Unknown error"));
    }

    #[test]
    fn test_pull_to_refresh_clears_on_next_load() {
        let mut state = running();
        loaded(&mut state);
        assert_eq!(key_at(&mut state, KeyCode::F(5), Instant::now()), vec![Action::Reload]);
        assert!(state.shell.refreshing);
        assert!(state.shell.is_loading());
        content(&mut state, ContentEvent::LoadStart { url: APP.into() });
        assert!(state.shell.refreshing);
        content(&mut state, ContentEvent::LoadEnd { url: APP.into() });
        assert!(!state.shell.refreshing);
        assert_eq!(state.shell.phase, LoadPhase::Ready);
    }

    #[test]
    fn test_external_navigation_is_vetoed_once() {
        let mut state = running();
        loaded(&mut state);
        for target in [
            "https://other.example.com/x",
            "http://app.example.com/",
            "https://app.example.com.evil.test/",
        ] {
            state.pending_logs.clear();
            let actions = content(
                &mut state,
                ContentEvent::NavigationStateChange {
                    url: target.into(),
                    can_go_back: true,
                    redirect: false,
                },
            );
            assert_eq!(actions.len(), 1, "{}", target);
            assert!(matches!(&actions[0], Action::OpenExternal { .. }));
            assert!(!actions.iter().any(|a| matches!(a, Action::Navigate { .. })));
            assert_eq!(logged(&state, "external_link_opened").len(), 1);
            assert!(state.shell.can_go_back);
        }
    }

    #[test]
    fn test_in_app_navigation_proceeds() {
        let mut state = running();
        loaded(&mut state);
        let actions = content(
            &mut state,
            ContentEvent::NavigationStateChange {
                url: "https://APP.example.com/settings".into(),
                can_go_back: false,
                redirect: false,
            },
        );
        assert_eq!(
            actions,
            vec![Action::Navigate {
                url: Url::parse("https://app.example.com/settings").unwrap()
            }]
        );

        // Reporting the page we are already on only updates history
        let actions = content(
            &mut state,
            ContentEvent::NavigationStateChange {
                url: APP.into(),
                can_go_back: true,
                redirect: false,
            },
        );
        assert!(actions.is_empty());
        assert!(state.shell.can_go_back);
        assert!(logged(&state, "external_link_opened").is_empty());
    }

    #[test]
    fn test_in_app_redirect_replaces_current_entry() {
        let mut state = running();
        loaded(&mut state);
        let actions = content(
            &mut state,
            ContentEvent::NavigationStateChange {
                url: "/login".into(),
                can_go_back: false,
                redirect: true,
            },
        );
        assert_eq!(
            actions,
            vec![Action::Replace {
                url: Url::parse("https://app.example.com/login").unwrap()
            }]
        );
        assert!(!state.shell.can_go_back);

        // Off-origin redirects are still handed to the system browser
        let actions = content(
            &mut state,
            ContentEvent::NavigationStateChange {
                url: "https://sso.example.net/".into(),
                can_go_back: false,
                redirect: true,
            },
        );
        assert!(matches!(&actions[..], [Action::OpenExternal { .. }]));
    }

    #[test]
    fn test_open_command_uses_same_path() {
        let mut state = running();
        loaded(&mut state);
        let actions = type_line(&mut state, "/open https://docs.example.org/");
        assert_eq!(
            actions,
            vec![Action::OpenExternal {
                url: "https://docs.example.org/".into()
            }]
        );
        let actions = type_line(&mut state, "/open /profile");
        assert!(matches!(&actions[0], Action::Navigate { url } if url.path() == "/profile"));
    }

    #[test]
    fn test_malformed_bridge_payloads_change_nothing() {
        let mut state = running();
        loaded(&mut state);
        let before = state.shell.clone();
        for payload in [
            "not json",
            "",
            "{\"message\":\"no type\"}",
            "{\"type\":\"teleport\",\"to\":\"mars\"}",
            "{\"type\":\"volume_change\",\"volume\":\"max\"}",
            "null",
        ] {
            state.pending_logs.clear();
            let actions = message(&mut state, payload);
            assert!(actions.is_empty(), "{}", payload);
            assert_eq!(state.shell, before, "{}", payload);
            assert_eq!(state.pending_logs.len(), 1, "{}", payload);
            let record = &state.pending_logs[0];
            assert_eq!(record.event, "invalid_js_message");
            assert_eq!(record.level, Level::Warn);
            assert_eq!(record.meta_str("data"), Some(payload));
        }
    }

    #[test]
    fn test_js_error_is_forwarded_verbatim() {
        let mut state = running();
        message(
            &mut state,
            r#"{"type":"js_error","message":"TypeError: x is undefined","stack":"at a.js:3:9","url":"https://app.example.com/a.js"}"#,
        );
        let record = logged(&state, "js_error_forwarded")[0];
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.meta_str("message"), Some("TypeError: x is undefined"));
        assert_eq!(record.meta_str("stack"), Some("at a.js:3:9"));
        assert_eq!(record.meta_str("url"), Some("https://app.example.com/a.js"));
    }

    #[test]
    fn test_volume_change_is_echoed_once() {
        let mut state = running();
        let actions = message(&mut state, r#"{"type":"volume_change","volume":0.35}"#);
        assert_eq!(state.shell.volume, 0.35);
        assert_eq!(
            actions,
            vec![Action::PostMessage {
                data: r#"{"type":"system_volume_change","volume":0.35}"#.into()
            }]
        );
        assert_eq!(logged(&state, "volume_changed").len(), 1);
        let outbound: Vec<_> = state
            .bridge_log
            .iter()
            .filter(|t| t.direction == Direction::Outbound)
            .collect();
        assert_eq!(outbound.len(), 1);
    }

    #[test]
    fn test_out_of_range_volume_is_rejected() {
        let mut state = running();
        let actions = message(&mut state, r#"{"type":"volume_change","volume":1.7}"#);
        assert!(actions.is_empty());
        assert_eq!(state.shell.volume, 0.8);
        assert_eq!(logged(&state, "volume_set_failed")[0].level, Level::Error);
    }

    #[test]
    fn test_shell_initiated_volume_steps() {
        let mut state = running();
        let actions = key_at(&mut state, KeyCode::F(8), Instant::now());
        assert_eq!(state.shell.volume, 0.9);
        assert_eq!(actions.len(), 1);
        key_at(&mut state, KeyCode::F(8), Instant::now());
        key_at(&mut state, KeyCode::F(8), Instant::now());
        assert_eq!(state.shell.volume, 1.0);
        key_at(&mut state, KeyCode::F(7), Instant::now());
        assert_eq!(state.shell.volume, 0.9);
        let actions = type_line(&mut state, "/volume 0.25");
        assert!(matches!(&actions[0], Action::PostMessage { data } if data.contains("0.25")));
    }

    #[test]
    fn test_back_with_history_goes_back_in_page() {
        let mut state = running();
        state.shell.can_go_back = true;
        let t0 = Instant::now();
        for i in 0..3 {
            let actions = key_at(&mut state, KeyCode::Esc, t0 + Duration::from_millis(100 * i));
            assert_eq!(actions, vec![Action::GoBack]);
        }
        assert!(!state.back_press.is_pending());
        assert!(!state.exit_prompt);
        assert_eq!(back_actions(&state), vec!["webview_back"; 3]);
    }

    #[test]
    fn test_double_back_within_window_exits() {
        let mut state = running();
        let t0 = Instant::now();
        assert!(key_at(&mut state, KeyCode::Esc, t0).is_empty());
        assert!(state.exit_prompt);
        let actions = key_at(&mut state, KeyCode::Esc, t0 + Duration::from_millis(1200));
        assert_eq!(actions, vec![Action::ExitApp]);
        assert_eq!(back_actions(&state), vec!["first_back_press", "exit_app"]);
    }

    #[test]
    fn test_double_back_outside_window_resets() {
        let mut state = running();
        let t0 = Instant::now();
        key_at(&mut state, KeyCode::Esc, t0);
        handle_event(&mut state, AppEvent::Tick, t0 + Duration::from_millis(2100));
        assert!(!state.back_press.is_pending());
        assert!(!state.exit_prompt);
        let actions = key_at(&mut state, KeyCode::Esc, t0 + Duration::from_millis(3000));
        assert!(actions.is_empty());
        assert!(state.back_press.is_pending());
        assert_eq!(
            back_actions(&state),
            vec!["first_back_press", "exit_window_expired", "first_back_press"]
        );
    }

    #[test]
    fn test_expiry_noticed_on_press_without_tick() {
        let mut state = running();
        let t0 = Instant::now();
        key_at(&mut state, KeyCode::Esc, t0);
        let actions = key_at(&mut state, KeyCode::Esc, t0 + Duration::from_secs(5));
        assert!(actions.is_empty());
        assert!(state.back_press.is_pending());
    }

    #[test]
    fn test_exit_prompt_confirm_and_cancel() {
        let mut state = running();
        let t0 = Instant::now();
        key_at(&mut state, KeyCode::Esc, t0);
        assert!(key_at(&mut state, KeyCode::Char('n'), t0).is_empty());
        assert!(!state.exit_prompt);
        // Cancel leaves the automaton armed
        assert!(state.back_press.is_pending());
        assert_eq!(
            key_at(&mut state, KeyCode::Esc, t0 + Duration::from_millis(500)),
            vec![Action::ExitApp]
        );

        let mut state = running();
        key_at(&mut state, KeyCode::Esc, t0);
        assert_eq!(key_at(&mut state, KeyCode::Char('y'), t0), vec![Action::ExitApp]);
        assert_eq!(back_actions(&state), vec!["first_back_press", "exit_app"]);
    }

    #[test]
    fn test_no_prompt_when_disabled() {
        let mut state = running();
        state.config.shell.confirm_exit = false;
        key_at(&mut state, KeyCode::Esc, Instant::now());
        assert!(!state.exit_prompt);
        assert_eq!(state.status_message.as_deref(), Some("Press back again to exit"));
    }

    #[test]
    fn test_unknown_command_sets_status() {
        let mut state = running();
        assert!(type_line(&mut state, "/dance").is_empty());
        assert!(state.status_message.as_deref().unwrap_or("").contains("Unknown command"));
        type_line(&mut state, "/help");
        assert!(state.show_help);
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn test_page_title_is_recorded_and_cleared_on_next_load() {
        let mut state = running();
        content(&mut state, ContentEvent::PageTitle { title: "Home".into() });
        assert_eq!(state.shell.title.as_deref(), Some("Home"));
        content(&mut state, ContentEvent::LoadStart { url: APP.into() });
        assert_eq!(state.shell.title, None);
    }
}
