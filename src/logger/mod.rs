//! Leveled, class-bound logging.
//!
//! - `level`: the eight-rank severity scale and its labels
//! - `format`: rendering of one event into the single-line text layout
//! - `core`: the `Logger` trait and `ClassLogger`, which filters and writes
//! - `factory`: `LoggerFactory`, which turns configuration into loggers
//!
//! ```rust,no_run
//! use classlog::logger::{Logger, LoggerFactory};
//!
//! let factory = LoggerFactory::new();
//! let mut log = factory.for_class("Checkout", None)?;
//! log.error("payment gateway timed out", Some(42), None)?;
//! # Ok::<(), classlog::LoggerError>(())
//! ```

pub mod core;
pub mod factory;
pub mod format;
pub mod level;

#[cfg(test)]
pub mod tests;

pub use self::core::{ClassLogger, Logger, threshold_from};
pub use factory::{LoggerFactory, backend_from};
pub use format::{LogEvent, format_message};
pub use level::{IntoSeverity, LEVELS, Severity, label_of};
