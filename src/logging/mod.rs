//! Structured event logging.
//!
//! Every significant shell event becomes one [`LogRecord`]:
//! `{event, ts, level, meta?}`. Building a record is a pure function of the
//! event name, level and metadata; where the record goes is decided by the
//! [`LogSink`]s the caller wires up. The controller only produces records and
//! the run loop drains them into the sinks.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::config::LoggingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub event: String,
    #[serde(with = "rfc3339")]
    pub ts: DateTime<Utc>,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl LogRecord {
    /// Build a record stamped with the current time. `meta` is kept only
    /// when it is a JSON object.
    pub fn new(event: &str, level: Level, meta: Value) -> Self {
        Self::at(Utc::now(), event, level, meta)
    }

    pub fn at(ts: DateTime<Utc>, event: &str, level: Level, meta: Value) -> Self {
        let meta = match meta {
            Value::Object(map) => Some(map),
            _ => None,
        };
        Self {
            event: event.to_string(),
            ts,
            level,
            meta,
        }
    }

    #[cfg(test)]
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.as_ref()?.get(key)?.as_str()
    }

    pub fn to_json_line(&self) -> String {
        // A record only holds strings, a timestamp and JSON values.
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"event\":\"{}\"}}", self.event))
    }
}

mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Destination for structured records.
pub trait LogSink {
    fn emit(&mut self, record: &LogRecord);
}

/// Forwards records to `tracing` so they show up in the diagnostics log.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&mut self, record: &LogRecord) {
        let meta = record
            .meta
            .as_ref()
            .map(|m| Value::Object(m.clone()).to_string())
            .unwrap_or_default();
        match record.level {
            Level::Info => tracing::info!(event = %record.event, %meta),
            Level::Warn => tracing::warn!(event = %record.event, %meta),
            Level::Error => tracing::error!(event = %record.event, %meta),
        }
    }
}

/// Appends records as JSON lines to daily files named `events_<date>.log`.
///
/// File handles are cached for the lifetime of the sink. If a file cannot be
/// opened the record is dropped; logging never takes the shell down.
pub struct JsonFileSink {
    enabled: bool,
    log_dir: PathBuf,
    file_handles: HashMap<String, fs::File>,
}

impl JsonFileSink {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            log_dir: expand_home(&config.log_dir),
            file_handles: HashMap::new(),
        }
    }

    fn file_for(&mut self, ts: &DateTime<Utc>) -> Option<&mut fs::File> {
        let filename = format!("events_{}.log", ts.format("%Y-%m-%d"));
        if !self.file_handles.contains_key(&filename) {
            let _ = fs::create_dir_all(&self.log_dir);
            let path = self.log_dir.join(&filename);
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => {
                    self.file_handles.insert(filename.clone(), file);
                }
                Err(e) => {
                    tracing::warn!("cannot open event log {}: {}", path.display(), e);
                    return None;
                }
            }
        }
        self.file_handles.get_mut(&filename)
    }
}

impl LogSink for JsonFileSink {
    fn emit(&mut self, record: &LogRecord) {
        if !self.enabled {
            return;
        }
        let line = record.to_json_line();
        if let Some(handle) = self.file_for(&record.ts) {
            let _ = writeln!(handle, "{}", line);
        }
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// One-line rendering for the on-screen event panel.
pub fn summary(record: &LogRecord) -> String {
    let time = record.ts.to_rfc3339_opts(SecondsFormat::Secs, true);
    match &record.meta {
        Some(meta) if !meta.is_empty() => {
            format!("{} {} {}", &time[11..19], record.event, Value::Object(meta.clone()))
        }
        _ => format!("{} {}", &time[11..19], record.event),
    }
}
