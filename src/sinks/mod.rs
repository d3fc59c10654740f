//! Output backends for formatted log lines.
//!
//! Each adapter takes an already formatted line and its severity and performs
//! one blocking write. Adapters don't filter; that is the logger's job. The
//! debug channel is the one adapter that looks at severity, to pick one of its
//! four sub-channels.
//!
//! The set of backends is closed: [`Sink`] is an enum over the six adapters and
//! [`BackendKind`] maps the configured `log_type` identifiers onto them.
//!
//! - `0`: system log ([`SyslogSink`])
//! - `1`: mail ([`MailSink`])
//! - `3`: custom file ([`FileSink`])
//! - `4`: console ([`ConsoleSink`])
//! - `5`: database ([`DatabaseSink`])
//! - `6`: debug channel ([`DebugChannelSink`])

pub mod console;
pub mod database;
pub mod debug_channel;
pub mod file;
pub mod mail;
pub mod syslog;


pub use console::ConsoleSink;
pub use database::DatabaseSink;
pub use debug_channel::{Channel, DebugChannel, DebugChannelSink, WildfireChannel};
pub use file::FileSink;
pub use mail::{MailMessage, MailSink, MailTransport, SendmailTransport};
pub use syslog::SyslogSink;

use crate::config::Properties;
use crate::error::{LoggerError, Result, SinkError};
use crate::logger::level::Severity;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    SystemLog,
    Mail,
    CustomFile,
    Console,
    Database,
    DebugChannel,
}

impl BackendKind {
    /// Maps a configured identifier to its backend.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(BackendKind::SystemLog),
            1 => Some(BackendKind::Mail),
            3 => Some(BackendKind::CustomFile),
            4 => Some(BackendKind::Console),
            5 => Some(BackendKind::Database),
            6 => Some(BackendKind::DebugChannel),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            BackendKind::SystemLog => 0,
            BackendKind::Mail => 1,
            BackendKind::CustomFile => 3,
            BackendKind::Console => 4,
            BackendKind::Database => 5,
            BackendKind::DebugChannel => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::SystemLog => "system log",
            BackendKind::Mail => "mail",
            BackendKind::CustomFile => "custom file",
            BackendKind::Console => "console",
            BackendKind::Database => "database",
            BackendKind::DebugChannel => "debug channel",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a `log_type` value. Anything that isn't one of the six integer
/// identifiers is `InvalidBackend`.
impl FromStr for BackendKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        value
            .parse::<i64>()
            .ok()
            .and_then(BackendKind::from_id)
            .ok_or_else(|| LoggerError::InvalidBackend {
                value: value.to_string(),
            })
    }
}

/// A concrete output backend, exclusively owned by one logger.
pub enum Sink {
    Console(ConsoleSink),
    SystemLog(SyslogSink),
    File(FileSink),
    Database(DatabaseSink),
    Mail(MailSink),
    DebugChannel(DebugChannelSink),
}

impl Sink {
    /// Builds the adapter for `kind` from the backend-specific configuration keys.
    ///
    /// # Arguments
    /// * `kind` - Backend selected by the factory
    /// * `properties` - Loaded configuration holding the adapter's keys
    ///
    /// # Returns
    /// The ready adapter, `ConfigurationMissing`/`InvalidConfiguration` for bad
    /// keys, or `SinkUnavailable` if its resource can't be acquired
    pub fn from_properties(kind: BackendKind, properties: &Properties) -> Result<Self> {
        let sink = match kind {
            BackendKind::SystemLog => Sink::SystemLog(SyslogSink::from_properties(properties)?),
            BackendKind::Mail => Sink::Mail(MailSink::from_properties(properties)?),
            BackendKind::CustomFile => Sink::File(FileSink::from_properties(properties)?),
            BackendKind::Console => Sink::Console(ConsoleSink::new()),
            BackendKind::Database => Sink::Database(DatabaseSink::from_properties(properties)?),
            BackendKind::DebugChannel => Sink::DebugChannel(DebugChannelSink::stdout()),
        };
        tracing::trace!(backend = %kind, "sink initialized");
        Ok(sink)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Sink::Console(_) => BackendKind::Console,
            Sink::SystemLog(_) => BackendKind::SystemLog,
            Sink::File(_) => BackendKind::CustomFile,
            Sink::Database(_) => BackendKind::Database,
            Sink::Mail(_) => BackendKind::Mail,
            Sink::DebugChannel(_) => BackendKind::DebugChannel,
        }
    }

    /// Writes one formatted line.
    pub fn write(&mut self, line: &str, severity: Severity) -> std::result::Result<(), SinkError> {
        match self {
            Sink::Console(sink) => sink.write(line),
            Sink::SystemLog(sink) => sink.write(line, severity),
            Sink::File(sink) => sink.write(line),
            Sink::Database(sink) => sink.write(line),
            Sink::Mail(sink) => sink.write(line, severity),
            Sink::DebugChannel(sink) => sink.write(line, severity),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sink").field(&self.kind()).finish()
    }
}

impl From<ConsoleSink> for Sink {
    fn from(sink: ConsoleSink) -> Self {
        Sink::Console(sink)
    }
}

impl From<SyslogSink> for Sink {
    fn from(sink: SyslogSink) -> Self {
        Sink::SystemLog(sink)
    }
}

impl From<FileSink> for Sink {
    fn from(sink: FileSink) -> Self {
        Sink::File(sink)
    }
}

impl From<DatabaseSink> for Sink {
    fn from(sink: DatabaseSink) -> Self {
        Sink::Database(sink)
    }
}

impl From<MailSink> for Sink {
    fn from(sink: MailSink) -> Self {
        Sink::Mail(sink)
    }
}

impl From<DebugChannelSink> for Sink {
    fn from(sink: DebugChannelSink) -> Self {
        Sink::DebugChannel(sink)
    }
}

/// Wraps an acquisition failure for `backend`.
pub(crate) fn unavailable(backend: BackendKind, source: impl Into<SinkError>) -> LoggerError {
    LoggerError::SinkUnavailable {
        backend,
        source: source.into(),
    }
}
