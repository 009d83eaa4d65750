//! Shell slash-command parser.
//!
//! Parses `/command args...` input lines into typed [`ParsedCommand`] values
//! that the event handler can act on. The commands stand in for what the
//! hosted page or the device would otherwise trigger.

/// A parsed user command. Each variant corresponds to a `/command`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommand {
    /// Deliver a raw payload as if the page had posted it.
    Post { payload: String },
    Open { url: String },
    Volume { volume: f64 },
    Back,
    Reload,
    Help,
    Quit,
}

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `Err` with a usage hint when the input is not a recognized command
/// or its arguments are missing. Commands are case-insensitive.
pub fn parse_command(input: &str) -> Result<ParsedCommand, String> {
    let input = input.trim();
    let body = input
        .strip_prefix('/')
        .ok_or_else(|| "Commands start with '/'. Type /help".to_string())?;

    let (cmd, rest) = match body.split_once(' ') {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
        None => (body.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "post" | "msg" => {
            if rest.is_empty() {
                return Err("Usage: /post <json>".to_string());
            }
            Ok(ParsedCommand::Post {
                payload: rest.to_string(),
            })
        }
        "open" | "go" => {
            if rest.is_empty() {
                return Err("Usage: /open <url>".to_string());
            }
            Ok(ParsedCommand::Open {
                url: rest.to_string(),
            })
        }
        "volume" | "vol" => {
            let volume = rest
                .parse::<f64>()
                .map_err(|_| "Usage: /volume <0.0-1.0>".to_string())?;
            Ok(ParsedCommand::Volume { volume })
        }
        "back" => Ok(ParsedCommand::Back),
        "reload" | "refresh" | "retry" => Ok(ParsedCommand::Reload),
        "help" | "h" | "?" => Ok(ParsedCommand::Help),
        "quit" | "exit" | "q" => Ok(ParsedCommand::Quit),
        other => Err(format!("Unknown command '/{}'. Type /help", other)),
    }
}

pub const HELP_LINES: &[&str] = &[
    "/post <json>     deliver a bridge message as the page",
    "/open <url>      navigate (off-origin opens the system browser)",
    "/volume <v>      set the shell volume (0.0-1.0)",
    "/back            hardware back press",
    "/reload          pull-to-refresh / retry",
    "/quit            exit",
    "Esc back  F5 refresh  F7/F8 volume  Ctrl+C quit",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_keeps_payload_verbatim() {
        assert_eq!(
            parse_command(r#"/post {"type":"volume_change", "volume":0.3}"#),
            Ok(ParsedCommand::Post {
                payload: r#"{"type":"volume_change", "volume":0.3}"#.into()
            })
        );
    }

    #[test]
    fn test_case_and_aliases() {
        assert_eq!(parse_command("/VOL 0.5"), Ok(ParsedCommand::Volume { volume: 0.5 }));
        assert_eq!(parse_command("/retry"), Ok(ParsedCommand::Reload));
        assert_eq!(parse_command("  /Back  "), Ok(ParsedCommand::Back));
        assert_eq!(parse_command("/q"), Ok(ParsedCommand::Quit));
    }

    #[test]
    fn test_usage_errors() {
        assert!(parse_command("/post").unwrap_err().contains("Usage"));
        assert!(parse_command("/open   ").unwrap_err().contains("Usage"));
        assert!(parse_command("/volume loud").unwrap_err().contains("Usage"));
        assert!(parse_command("/frobnicate").unwrap_err().contains("Unknown command"));
        assert!(parse_command("hello").is_err());
    }
}
