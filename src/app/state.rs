use crate::app::back_press::BackPress;
use crate::config::validation::{validate_app_url, ConfigError};
use crate::config::AppConfig;
use crate::logging::{Level, LogRecord};
use serde_json::Value;
use std::collections::VecDeque;
use url::Url;

/// Volume used when the configured default is unusable.
pub const DEFAULT_VOLUME: f64 = 0.8;

/// `Some(v)` if `v` is a usable volume level.
pub fn valid_volume(v: f64) -> Option<f64> {
    (v.is_finite() && (0.0..=1.0).contains(&v)).then_some(v)
}

/// Where the content load lifecycle currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Errored { message: String },
}

/// What the shell shows for the hosted page.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellState {
    pub phase: LoadPhase,
    pub can_go_back: bool,
    pub refreshing: bool,
    /// Always within `[0, 1]`.
    pub volume: f64,
    pub current_url: Option<Url>,
    pub title: Option<String>,
}

impl ShellState {
    pub fn new(volume: f64) -> Self {
        Self {
            phase: LoadPhase::Loading,
            can_go_back: false,
            refreshing: false,
            volume,
            current_url: None,
            title: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_errored(&self) -> bool {
        matches!(self.phase, LoadPhase::Errored { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Errored { message } => Some(message),
            _ => None,
        }
    }
}

/// Decided once at startup from the configured URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellMode {
    Running { app_url: Url },
    /// Terminal until the configuration is fixed and the shell restarted.
    ConfigError(ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BridgeTraffic {
    pub direction: Direction,
    pub payload: String,
}

/// Called with the user-facing message whenever a load fails.
pub type ErrorHook = Box<dyn FnMut(&str)>;

#[derive(Debug)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
    pub history: Vec<String>,
    pub history_index: Option<usize>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: Vec::new(),
            history_index: None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        self.history_index = None;
        if !text.is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.history_index {
            Some(i) if i > 0 => i - 1,
            Some(_) => return,
            None => self.history.len() - 1,
        };
        self.history_index = Some(idx);
        self.text = self.history[idx].clone();
        self.cursor = self.text.len();
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                let idx = i + 1;
                self.history_index = Some(idx);
                self.text = self.history[idx].clone();
                self.cursor = self.text.len();
            }
            Some(_) => {
                self.history_index = None;
                self.clear();
            }
            None => {}
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub mode: ShellMode,
    pub shell: ShellState,
    pub back_press: BackPress,
    /// "Press back again to exit" prompt is on screen.
    pub exit_prompt: bool,
    pub show_help: bool,
    pub input: InputState,
    pub bridge_log: VecDeque<BridgeTraffic>,
    /// Recent records for the on-screen event panel.
    pub events: VecDeque<LogRecord>,
    /// Records not yet handed to the sinks.
    pub pending_logs: Vec<LogRecord>,
    pub on_error: Option<ErrorHook>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub dirty: bool,
    pub tick_count: u64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mode = match validate_app_url(config.app_url.as_deref()) {
            Ok(app_url) => ShellMode::Running { app_url },
            Err(e) => ShellMode::ConfigError(e),
        };
        let back_press = BackPress::new(config.shell.exit_window());
        Self {
            shell: ShellState::new(valid_volume(config.shell.default_volume).unwrap_or(DEFAULT_VOLUME)),
            config,
            mode,
            back_press,
            exit_prompt: false,
            show_help: false,
            input: InputState::new(),
            bridge_log: VecDeque::new(),
            events: VecDeque::new(),
            pending_logs: Vec::new(),
            on_error: None,
            status_message: None,
            should_quit: false,
            dirty: true,
            tick_count: 0,
        }
    }

    pub fn app_url(&self) -> Option<&Url> {
        match &self.mode {
            ShellMode::Running { app_url } => Some(app_url),
            ShellMode::ConfigError(_) => None,
        }
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        match &self.mode {
            ShellMode::ConfigError(e) => Some(e),
            ShellMode::Running { .. } => None,
        }
    }

    pub fn log(&mut self, event: &str, level: Level, meta: Value) {
        let record = LogRecord::new(event, level, meta);
        self.events.push_back(record.clone());
        while self.events.len() > self.config.shell.max_events {
            self.events.pop_front();
        }
        self.pending_logs.push(record);
        self.dirty = true;
    }

    pub fn log_info(&mut self, event: &str, meta: Value) {
        self.log(event, Level::Info, meta);
    }

    pub fn log_warn(&mut self, event: &str, meta: Value) {
        self.log(event, Level::Warn, meta);
    }

    pub fn log_error(&mut self, event: &str, meta: Value) {
        self.log(event, Level::Error, meta);
    }

    pub fn record_traffic(&mut self, direction: Direction, payload: String) {
        self.bridge_log.push_back(BridgeTraffic { direction, payload });
        while self.bridge_log.len() > self.config.shell.max_events {
            self.bridge_log.pop_front();
        }
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        let phase = match (&self.mode, &self.shell.phase) {
            (ShellMode::ConfigError(_), _) => "config error",
            (_, LoadPhase::Loading) if self.shell.refreshing => "refreshing",
            (_, LoadPhase::Loading) => "loading",
            (_, LoadPhase::Ready) => "ready",
            (_, LoadPhase::Errored { .. }) => "error",
        };
        let mut s = format!("{} | vol {:.0}%", phase, self.shell.volume * 100.0);
        if self.shell.can_go_back {
            s.push_str(" | back: page");
        }
        s
    }
}
