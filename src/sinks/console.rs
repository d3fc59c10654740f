//! Console sink: one line per call on standard output.

use crate::error::SinkError;
use std::io::{self, Write};

pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
}

impl ConsoleSink {
    /// Writes to the process's standard output.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Writes to an arbitrary stream instead of stdout.
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Box::new(writer),
        }
    }

    /// Writes `line` followed by a newline and flushes.
    ///
    /// A short write surfaces as `WriteZero` from `write_all`.
    pub fn write(&mut self, line: &str) -> Result<(), SinkError> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        self.out.write_all(buf.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}
