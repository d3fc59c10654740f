//! Key/value logger configuration.
//!
//! A `Properties` map is loaded once when a logger is built and is only read
//! afterwards. Sources are either flat `.properties` files (`key=value` per
//! line) or JSON objects whose values are scalars.

use crate::error::{LoggerError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Selects the backend; see [`crate::sinks::BackendKind`].
pub const LOG_TYPE: &str = "log_type";

/// Minimum severity admitted by the logger, as a rank or a label.
pub const LOG_LEVEL: &str = "log_level";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration used when no source is given: system log, threshold `error`.
    pub fn defaults() -> Self {
        Self::new().with(LOG_TYPE, "0").with(LOG_LEVEL, "3")
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns the value for `name`, failing with `ConfigurationMissing` if absent or blank.
    pub fn require(&self, name: &str) -> Result<&str> {
        match self.get_property(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(LoggerError::missing(name)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Loads properties from a file on disk.
    ///
    /// Files with a `.json` extension are read as a flat JSON object; anything
    /// else is read as a `.properties` file.
    ///
    /// # Arguments
    /// * `path` - Location of the configuration source
    ///
    /// # Returns
    /// The loaded map, or `ConfigurationUnreadable` if the file can't be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let unreadable = |reason: String| LoggerError::ConfigurationUnreadable {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&content).map_err(unreadable)
        } else {
            Ok(Self::parse(&content))
        }
    }

    /// Parses `.properties` text. Blank lines and lines starting with `#` or
    /// `!` are skipped; the key ends at the first `=` or `:`.
    pub fn parse(content: &str) -> Self {
        let mut properties = Self::new();
        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            match line.find(['=', ':']) {
                Some(idx) => {
                    properties.set_property(line[..idx].trim(), line[idx + 1..].trim());
                }
                // a bare key is an empty value
                None => {
                    properties.set_property(line, "");
                }
            }
        }
        properties
    }

    fn parse_json(content: &str) -> std::result::Result<Self, String> {
        let raw: BTreeMap<String, Scalar> =
            serde_json::from_str(content).map_err(|e| e.to_string())?;

        Ok(raw
            .into_iter()
            .map(|(key, value)| (key, value.into_string()))
            .collect())
    }
}

/// A JSON configuration value; arrays and objects fail to deserialize.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Empty(()),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Flag(b) => b.to_string(),
            Scalar::Empty(()) => String::new(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (k, v) in iter {
            properties.set_property(k, v);
        }
        properties
    }
}
