//! The eight-rank severity scale.
//!
//! Ranks follow the syslog convention: `0` is the most severe
//! (`emergency`), `7` the least (`debug`). Ordering on [`Severity`] follows
//! rank, so `Severity::Emergency < Severity::Debug`.

use crate::error::{LoggerError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

/// Ordered (rank, label) pairs for every defined severity.
pub const LEVELS: [(u8, &str); 8] = [
    (0, "emergency"),
    (1, "alert"),
    (2, "critical"),
    (3, "error"),
    (4, "warning"),
    (5, "notice"),
    (6, "info"),
    (7, "debug"),
];

const ALL: [Severity; 8] = [
    Severity::Emergency,
    Severity::Alert,
    Severity::Critical,
    Severity::Error,
    Severity::Warning,
    Severity::Notice,
    Severity::Info,
    Severity::Debug,
];

/// Looks up the label for a raw rank.
///
/// Fails with `InvalidSeverity` for anything outside `0..=7`.
pub fn label_of(rank: i64) -> Result<&'static str> {
    Severity::from_rank(rank).map(|s| s.label())
}

impl Severity {
    pub fn from_rank(rank: i64) -> Result<Self> {
        usize::try_from(rank)
            .ok()
            .and_then(|idx| ALL.get(idx).copied())
            .ok_or_else(|| LoggerError::invalid_severity(rank))
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        LEVELS[self as usize].1
    }

    /// Every severity from most to least severe.
    pub fn all() -> [Severity; 8] {
        ALL
    }

    /// True if an event at `self` passes a logger whose threshold is `threshold`.
    pub fn admitted_by(self, threshold: Severity) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts a numeric rank (`"3"`) or a label (`"error"`, any case).
impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if let Ok(rank) = value.parse::<i64>() {
            return Severity::from_rank(rank);
        }
        ALL.iter()
            .copied()
            .find(|sev| sev.label().eq_ignore_ascii_case(value))
            .ok_or_else(|| LoggerError::invalid_severity(value))
    }
}

/// Conversion into a validated [`Severity`].
///
/// Lets threshold mutators take an enum value, a raw rank or a config string.
pub trait IntoSeverity {
    fn into_severity(self) -> Result<Severity>;
}

impl IntoSeverity for Severity {
    fn into_severity(self) -> Result<Severity> {
        Ok(self)
    }
}

impl IntoSeverity for i64 {
    fn into_severity(self) -> Result<Severity> {
        Severity::from_rank(self)
    }
}

impl IntoSeverity for i32 {
    fn into_severity(self) -> Result<Severity> {
        Severity::from_rank(i64::from(self))
    }
}

impl IntoSeverity for u8 {
    fn into_severity(self) -> Result<Severity> {
        Severity::from_rank(i64::from(self))
    }
}

impl IntoSeverity for &str {
    fn into_severity(self) -> Result<Severity> {
        self.parse()
    }
}
