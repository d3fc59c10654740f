//! Builds class-bound loggers from configuration.
//!
//! The factory is a plain value: there is no process-wide instance table.
//! Callers create a `LoggerFactory`, ask it for loggers, and own the results.

use crate::config::{LOG_TYPE, Properties};
use crate::error::Result;
use crate::logger::core::{ClassLogger, threshold_from};
use crate::sinks::{BackendKind, Sink};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LoggerFactory {
    defaults: Properties,
}

impl LoggerFactory {
    /// Factory whose fallback configuration is system log at `error`.
    pub fn new() -> Self {
        Self::with_defaults(Properties::defaults())
    }

    /// Factory using `defaults` whenever no configuration source is given.
    pub fn with_defaults(defaults: Properties) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &Properties {
        &self.defaults
    }

    /// Creates a logger for `classname`.
    ///
    /// # Arguments
    /// * `classname` - Origin shown in every formatted line
    /// * `config_source` - Properties or JSON file; the factory defaults apply when `None`
    ///
    /// # Returns
    /// A logger owning a freshly built sink, or the first configuration or
    /// acquisition error encountered
    pub fn for_class(&self, classname: &str, config_source: Option<&Path>) -> Result<ClassLogger> {
        let properties = match config_source {
            Some(path) => Properties::load(path)?,
            None => self.defaults.clone(),
        };
        self.for_properties(classname, properties)
    }

    /// Creates a logger named after the static type of `instance`.
    pub fn for_instance<T: ?Sized>(
        &self,
        _instance: &T,
        config_source: Option<&Path>,
    ) -> Result<ClassLogger> {
        self.for_class(std::any::type_name::<T>(), config_source)
    }

    /// Creates a logger from an already loaded configuration.
    pub fn for_properties(&self, classname: &str, properties: Properties) -> Result<ClassLogger> {
        let kind = backend_from(&properties)?;
        let threshold = threshold_from(&properties)?;
        let sink = Sink::from_properties(kind, &properties)?;

        tracing::debug!(
            classname,
            backend = %kind,
            threshold = %threshold,
            "logger created"
        );

        Ok(ClassLogger::from_parts(
            classname.to_string(),
            threshold,
            properties,
            sink,
        ))
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the `log_type` backend identifier.
pub fn backend_from(properties: &Properties) -> Result<BackendKind> {
    properties.require(LOG_TYPE)?.parse()
}
