//! System log sink.
//!
//! Sends RFC 3164 style datagrams (`<PRI>ident: line`) to the local syslog
//! daemon's Unix socket. The severity ranks of this crate are the syslog
//! severities, so the priority is `facility * 8 + rank`.

use crate::config::Properties;
use crate::error::{Result, SinkError};
use crate::logger::level::Severity;
use crate::sinks::{BackendKind, unavailable};
use std::io;
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};

/// Socket path of the syslog daemon.
pub const LOG_SYSLOG_SOCKET: &str = "log_syslog_socket";

/// Tag placed in front of every message.
pub const LOG_SYSLOG_IDENT: &str = "log_syslog_ident";

pub const DEFAULT_SOCKET: &str = "/dev/log";
pub const DEFAULT_IDENT: &str = "classlog";

/// `LOG_USER`
const FACILITY_USER: u8 = 1;

#[derive(Debug)]
pub struct SyslogSink {
    socket: UnixDatagram,
    path: PathBuf,
    ident: String,
}

impl SyslogSink {
    /// Creates an unbound datagram socket aimed at `path`.
    ///
    /// Nothing is sent until the first write, so a missing daemon shows up as
    /// a write failure rather than a construction failure.
    pub fn new(path: impl AsRef<Path>, ident: impl Into<String>) -> Result<Self> {
        let socket = UnixDatagram::unbound().map_err(|e| unavailable(BackendKind::SystemLog, e))?;
        Ok(Self {
            socket,
            path: path.as_ref().to_path_buf(),
            ident: ident.into(),
        })
    }

    pub fn from_properties(properties: &Properties) -> Result<Self> {
        let path = properties
            .get_property(LOG_SYSLOG_SOCKET)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_SOCKET);
        let ident = properties
            .get_property(LOG_SYSLOG_IDENT)
            .filter(|i| !i.trim().is_empty())
            .unwrap_or(DEFAULT_IDENT);
        Self::new(path, ident)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Priority value for a message at `severity`.
    pub fn priority(severity: Severity) -> u8 {
        FACILITY_USER * 8 + severity.rank()
    }

    pub fn write(&mut self, line: &str, severity: Severity) -> std::result::Result<(), SinkError> {
        let datagram = format!("<{}>{}: {}", Self::priority(severity), self.ident, line);
        let sent = self.socket.send_to(datagram.as_bytes(), &self.path)?;
        if sent < datagram.len() {
            return Err(SinkError::Io(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("syslog accepted {} of {} bytes", sent, datagram.len()),
            )));
        }
        Ok(())
    }
}
