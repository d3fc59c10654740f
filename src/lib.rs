pub mod config;
pub mod error;
pub mod logger;
pub mod sinks;

#[cfg(test)]
mod test_utilities;

pub use config::Properties;
pub use error::{LoggerError, Result, SinkError};
pub use logger::{ClassLogger, LogEvent, Logger, LoggerFactory, Severity};
pub use sinks::{BackendKind, Sink};
