//! Error taxonomy for logger construction and log calls.
//!
//! Every failure is surfaced to the caller unchanged. Severity filtering is
//! not an error: an unadmitted call yields `Ok(None)`.

use crate::sinks::BackendKind;
use thiserror::Error;

/// Failure reported by a sink adapter while performing its write.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("mail dispatch failed: {0}")]
    Mail(String),
}

#[derive(Debug, Error)]
pub enum LoggerError {
    /// A severity or threshold outside the eight defined ranks.
    #[error("found invalid log level {value}")]
    InvalidSeverity { value: String },

    /// The configured backend identifier is not one of the known sinks.
    #[error("log type {value} defined in configuration is not valid")]
    InvalidBackend { value: String },

    #[error("error while writing log message to {backend}: {source}")]
    SinkWriteFailure {
        backend: BackendKind,
        #[source]
        source: SinkError,
    },

    #[error("required configuration key '{key}' is missing")]
    ConfigurationMissing { key: String },

    #[error("configuration key '{key}' is invalid: {reason}")]
    InvalidConfiguration { key: String, reason: String },

    #[error("can't read configuration from {path}: {reason}")]
    ConfigurationUnreadable { path: String, reason: String },

    /// The sink's resource (file, database, socket) could not be acquired.
    #[error("can't initialize {backend} sink: {source}")]
    SinkUnavailable {
        backend: BackendKind,
        #[source]
        source: SinkError,
    },
}

impl LoggerError {
    pub(crate) fn invalid_severity(value: impl ToString) -> Self {
        LoggerError::InvalidSeverity {
            value: value.to_string(),
        }
    }

    pub(crate) fn missing(key: &str) -> Self {
        LoggerError::ConfigurationMissing {
            key: key.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoggerError>;
