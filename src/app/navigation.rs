//! In-app versus external navigation.
//!
//! A destination belongs to the app when it has exactly the same origin as
//! the configured URL: scheme, host (compared after normalization, so case
//! does not matter) and port with scheme defaults applied. The path is not
//! considered.

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    InApp(Url),
    External(Url),
    Invalid,
}

pub fn is_in_app(app_url: &Url, target: &Url) -> bool {
    app_url.origin() == target.origin()
}

/// Classify a destination reported by the content view. Relative references
/// are resolved against `base`.
pub fn classify(app_url: &Url, base: Option<&Url>, raw: &str) -> NavTarget {
    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match base.unwrap_or(app_url).join(raw) {
                Ok(url) => url,
                Err(_) => return NavTarget::Invalid,
            }
        }
        Err(_) => return NavTarget::Invalid,
    };
    if is_in_app(app_url, &parsed) {
        NavTarget::InApp(parsed)
    } else {
        NavTarget::External(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Url {
        Url::parse("https://app.example.com/start").unwrap()
    }

    #[test]
    fn test_same_origin_any_path() {
        let app = app();
        for raw in [
            "https://app.example.com",
            "https://app.example.com/",
            "https://APP.Example.com/settings?x=1#top",
            "https://app.example.com:443/other",
        ] {
            assert!(matches!(classify(&app, None, raw), NavTarget::InApp(_)), "{}", raw);
        }
    }

    #[test]
    fn test_other_origins_are_external() {
        let app = app();
        for raw in [
            "http://app.example.com/",
            "https://app.example.com:8443/",
            "https://app.example.com.evil.test/",
            "https://example.com/",
            "mailto:help@example.com",
            "tel:+15551234",
        ] {
            assert!(matches!(classify(&app, None, raw), NavTarget::External(_)), "{}", raw);
        }
    }

    #[test]
    fn test_relative_resolves_against_base() {
        let app = app();
        let base = Url::parse("https://app.example.com/a/b").unwrap();
        assert_eq!(
            classify(&app, Some(&base), "c?d=1"),
            NavTarget::InApp(Url::parse("https://app.example.com/a/c?d=1").unwrap())
        );
        assert_eq!(
            classify(&app, None, "/help"),
            NavTarget::InApp(Url::parse("https://app.example.com/help").unwrap())
        );
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(classify(&app(), None, "https://exa mple.com"), NavTarget::Invalid);
    }
}
