pub mod model;
pub mod validation;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::{AppConfig, ContentConfig, LoggingConfig};

/// Environment variable that overrides `app_url` from the config file.
pub const APP_URL_ENV: &str = "WEBSHELL_APP_URL";

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("webshell")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path(), std::env::var(APP_URL_ENV).ok())
}

/// Read the config at `path` (defaults when absent) and apply an `app_url`
/// override taken from the environment.
pub fn load_config_from(path: &Path, app_url_override: Option<String>) -> Result<AppConfig> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        parse_config(&contents)?
    } else {
        AppConfig::default()
    };

    if let Some(url) = app_url_override {
        config.app_url = Some(url);
    }
    Ok(config)
}

fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).with_context(|| "Failed to parse config file")
}
