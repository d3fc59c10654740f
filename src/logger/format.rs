//! Single-line rendering of log events.
//!
//! Layout: `<origin>[<label>] <YYYY-MM-DD HH:MM:SS> [- line <n> ]<message>`.
//! The origin is the calling method when one is given, else the bound
//! classname. This line is the only text format the crate produces, and it is
//! what every sink stores.

use crate::logger::level::Severity;
use chrono::{Local, TimeZone, Utc};

/// `date("Y-m-d H:i:s")` equivalent.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Seconds since the Unix epoch.
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// Renders a timestamp in the local timezone using [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).earliest() {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        // out of chrono's range; fall back to the raw value
        None => timestamp.to_string(),
    }
}

/// One log call, captured for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub message: String,
    pub severity: Severity,
    pub line: Option<u32>,
    pub method: Option<String>,
    pub timestamp: i64,
}

impl LogEvent {
    /// Creates an event stamped with the current time.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            line: None,
            method: None,
            timestamp: now(),
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Formats the event for a logger bound to `origin`.
    pub fn render(&self, origin: &str) -> String {
        format_message(
            origin,
            &self.message,
            self.severity,
            self.line,
            self.method.as_deref(),
            Some(self.timestamp),
        )
    }
}

/// Builds the formatted line.
///
/// # Arguments
/// * `origin` - Classname the logger is bound to
/// * `message` - Raw message text, appended without escaping
/// * `severity` - Severity whose label is embedded
/// * `line` - Optional line number; `0` is treated as absent
/// * `method` - Optional calling method, replaces `origin` in the prefix when non-empty
/// * `timestamp` - Seconds since epoch; the current time is used when `None`
pub fn format_message(
    origin: &str,
    message: &str,
    severity: Severity,
    line: Option<u32>,
    method: Option<&str>,
    timestamp: Option<i64>,
) -> String {
    let timestamp = timestamp.unwrap_or_else(now);

    let prefix = match method {
        Some(m) if !m.is_empty() => m,
        _ => origin,
    };

    let mut out = format!(
        "{}[{}] {} ",
        prefix,
        severity.label(),
        format_timestamp(timestamp)
    );

    if let Some(line) = line
        && line != 0
    {
        out.push_str(&format!("- line {} ", line));
    }

    out.push_str(message);
    out
}
