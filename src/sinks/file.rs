//! Custom file sink: appends each line to a configured file.

use crate::config::Properties;
use crate::error::{Result, SinkError};
use crate::sinks::{BackendKind, unavailable};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Path of the file to append to.
pub const LOG_FILE: &str = "log_file";

/// Holds the file open for the sink's lifetime; the handle closes on drop.
#[derive(Debug)]
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Opens (creating if needed) `path` in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| unavailable(BackendKind::CustomFile, e))?;
        Ok(Self { file, path })
    }

    pub fn from_properties(properties: &Properties) -> Result<Self> {
        Self::open(properties.require(LOG_FILE)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, line: &str) -> std::result::Result<(), SinkError> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        self.file.write_all(buf.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}
