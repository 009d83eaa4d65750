//! Startup validation of the content URL.
//!
//! The shell refuses to load anything unless the configured URL is present,
//! uses HTTPS and parses as a well-formed URL. A failure here is terminal: the
//! shell renders a configuration-error view until the config is fixed.

use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "WEBSHELL_APP_URL is required but not set.\n\
         Set app_url in config.toml or export WEBSHELL_APP_URL with a valid HTTPS URL.\n\
         Example: WEBSHELL_APP_URL=https://your-app.example.com/"
    )]
    Missing,

    #[error("WEBSHELL_APP_URL must be HTTPS.\nGot: {got}\nPlease update your configuration with a valid HTTPS URL.")]
    NotHttps { got: String },

    #[error("WEBSHELL_APP_URL is not a valid URL.\nGot: {got}\nPlease update your configuration with a valid URL.")]
    InvalidUrl { got: String },
}

impl ConfigError {
    /// Short machine-friendly reason used in log metadata.
    pub fn reason(&self) -> &'static str {
        match self {
            ConfigError::Missing => "missing",
            ConfigError::NotHttps { .. } => "not_https",
            ConfigError::InvalidUrl { .. } => "invalid_url",
        }
    }
}

pub fn validate_app_url(raw: Option<&str>) -> Result<Url, ConfigError> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ConfigError::Missing),
    };

    if !raw.starts_with("https://") {
        return Err(ConfigError::NotHttps {
            got: raw.to_string(),
        });
    }

    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidUrl {
        got: raw.to_string(),
    })?;
    if url.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(ConfigError::InvalidUrl {
            got: raw.to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_passes() {
        let url = validate_app_url(Some("https://example.com")).unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_plain_http_fails() {
        let err = validate_app_url(Some("http://example.com")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotHttps {
                got: "http://example.com".into()
            }
        );
        assert!(err.to_string().contains("must be HTTPS"));
    }

    #[test]
    fn test_missing_has_distinct_message() {
        let unset = validate_app_url(None).unwrap_err();
        let empty = validate_app_url(Some("")).unwrap_err();
        let blank = validate_app_url(Some("   ")).unwrap_err();
        assert_eq!(unset, ConfigError::Missing);
        assert_eq!(empty, ConfigError::Missing);
        assert_eq!(blank, ConfigError::Missing);
        assert!(unset.to_string().contains("required but not set"));
        assert_ne!(
            unset.to_string(),
            validate_app_url(Some("http://x")).unwrap_err().to_string()
        );
    }

    #[test]
    fn test_malformed_https_fails() {
        let err = validate_app_url(Some("https://")).unwrap_err();
        assert_eq!(err.reason(), "invalid_url");
        let err = validate_app_url(Some("https://exa mple.com")).unwrap_err();
        assert!(err.to_string().contains("is not a valid URL"));
    }
}
