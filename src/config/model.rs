//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field except `app_url` has a sensible default; the content URL has to
//! come from the config file or the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin (plus optional start path) of the hosted web application.
    #[serde(default)]
    pub app_url: Option<String>,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Shell controller behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_volume")]
    pub default_volume: f64,
    /// Window in which a second back press exits the app.
    #[serde(default = "default_exit_window_ms")]
    pub exit_window_ms: u64,
    /// Show the "press back again" confirmation prompt on the first press.
    #[serde(default = "default_true")]
    pub confirm_exit: bool,
    #[serde(default = "default_loading_text")]
    pub loading_text: String,
    #[serde(default = "default_volume_step")]
    pub volume_step: f64,
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

impl ShellConfig {
    pub fn exit_window(&self) -> Duration {
        Duration::from_millis(self.exit_window_ms)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
            exit_window_ms: default_exit_window_ms(),
            confirm_exit: true,
            loading_text: default_loading_text(),
            volume_step: default_volume_step(),
            max_events: default_max_events(),
        }
    }
}

/// Settings for the content view that fetches the hosted page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ContentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Structured event log and diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write structured event records to daily JSON-lines files.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// `tracing` filter directive for the diagnostics file.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f64 {
    0.8
}

fn default_exit_window_ms() -> u64 {
    2000
}

fn default_loading_text() -> String {
    "Loading...".to_string()
}

fn default_volume_step() -> f64 {
    0.1
}

fn default_max_events() -> usize {
    500
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Linux; Android 10; SM-G973F) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.120 Mobile Safari/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_log_dir() -> String {
    "~/.local/share/webshell/logs".to_string()
}

fn default_level() -> String {
    "info".to_string()
}
