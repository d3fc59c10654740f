//! Class-bound loggers and the threshold filter.
//!
//! Responsibilities:
//! - Define the `Logger` trait: one generic `log` call plus one helper per severity
//! - Bind a classname, a threshold and one owned sink in `ClassLogger`
//! - Admit an event iff its rank is `<=` the threshold rank; otherwise do nothing
//!
//! Every call runs inline on the caller's thread: format, write, return.
//! Loggers take `&mut self` and do no locking; use one logger per thread.

use crate::config::{LOG_LEVEL, Properties};
use crate::error::{LoggerError, Result};
use crate::logger::format::{self, LogEvent};
use crate::logger::level::{IntoSeverity, Severity};
use crate::sinks::Sink;

/// Leveled logging surface.
///
/// Implementors provide `log`; the per-severity helpers delegate to it.
/// Each call returns `Ok(Some(timestamp))` if the event was written,
/// `Ok(None)` if it was filtered out.
pub trait Logger {
    /// Logs `message` at `severity`.
    ///
    /// # Arguments
    /// * `message` - Raw message text
    /// * `severity` - Severity of the event
    /// * `line` - Optional originating line number
    /// * `method` - Optional originating method, replaces the classname in the output
    fn log(
        &mut self,
        message: &str,
        severity: Severity,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>>;

    fn emergency(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Emergency, line, method)
    }

    fn alert(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Alert, line, method)
    }

    fn critical(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Critical, line, method)
    }

    fn error(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Error, line, method)
    }

    fn warning(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Warning, line, method)
    }

    fn notice(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Notice, line, method)
    }

    fn info(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Info, line, method)
    }

    fn debug(
        &mut self,
        message: &str,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        self.log(message, Severity::Debug, line, method)
    }
}

/// Reads the `log_level` threshold from a configuration.
pub fn threshold_from(properties: &Properties) -> Result<Severity> {
    properties.require(LOG_LEVEL)?.parse()
}

/// A logger bound to one originating classname and one sink.
#[derive(Debug)]
pub struct ClassLogger {
    origin: String,
    threshold: Severity,
    properties: Properties,
    sink: Sink,
}

impl ClassLogger {
    /// Binds `origin` to `sink`, taking the threshold from `log_level`.
    ///
    /// Fails with `ConfigurationMissing` if `log_level` is absent and
    /// `InvalidSeverity` if it names none of the eight ranks.
    pub fn new(
        origin: impl Into<String>,
        properties: Properties,
        sink: impl Into<Sink>,
    ) -> Result<Self> {
        let threshold = threshold_from(&properties)?;
        Ok(Self::from_parts(origin.into(), threshold, properties, sink.into()))
    }

    pub(crate) fn from_parts(
        origin: String,
        threshold: Severity,
        properties: Properties,
        sink: Sink,
    ) -> Self {
        Self {
            origin,
            threshold,
            properties,
            sink,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) -> &mut Self {
        self.origin = origin.into();
        self
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Replaces the threshold; out-of-range values fail with `InvalidSeverity`
    /// and leave the current threshold untouched.
    pub fn set_threshold(&mut self, threshold: impl IntoSeverity) -> Result<&mut Self> {
        self.threshold = threshold.into_severity()?;
        Ok(self)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get_property(name)
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut Sink {
        &mut self.sink
    }

    /// Whether a call at `severity` would be admitted.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.admitted_by(self.threshold)
    }

    /// Renders a line exactly as `log` would, without writing it.
    pub fn format(
        &self,
        message: &str,
        severity: Severity,
        line: Option<u32>,
        method: Option<&str>,
        timestamp: Option<i64>,
    ) -> String {
        format::format_message(&self.origin, message, severity, line, method, timestamp)
    }

    /// Logs a prebuilt event, keeping its timestamp.
    pub fn log_event(&mut self, event: &LogEvent) -> Result<Option<i64>> {
        if !self.is_enabled(event.severity) {
            return Ok(None);
        }
        let line = event.render(&self.origin);
        self.write(&line, event.severity)?;
        Ok(Some(event.timestamp))
    }

    fn write(&mut self, line: &str, severity: Severity) -> Result<()> {
        self.sink.write(line, severity).map_err(|source| {
            let backend = self.sink.kind();
            tracing::warn!(%backend, origin = %self.origin, error = %source, "log write failed");
            LoggerError::SinkWriteFailure { backend, source }
        })
    }
}

impl Logger for ClassLogger {
    fn log(
        &mut self,
        message: &str,
        severity: Severity,
        line: Option<u32>,
        method: Option<&str>,
    ) -> Result<Option<i64>> {
        if !self.is_enabled(severity) {
            return Ok(None);
        }

        let timestamp = format::now();
        let formatted = self.format(message, severity, line, method, Some(timestamp));
        self.write(&formatted, severity)?;
        Ok(Some(timestamp))
    }
}
