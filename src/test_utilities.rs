//! Shared fixtures for sink and logger tests.

use crate::config::Properties;
use crate::error::SinkError;
use crate::sinks::debug_channel::{Channel, DebugChannel};
use crate::sinks::mail::{MailMessage, MailTransport};
use std::io::{self, Write};
use std::os::fd::{AsFd, AsRawFd};
use std::sync::{Arc, Mutex};

/// Serializes tests that redirect file descriptor 1.
static STDOUT_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with file descriptor 1 redirected into a temp file and returns
/// what was written to it.
pub fn capture_stdout<F: FnOnce()>(f: F) -> String {
    use std::io::{Read, Seek, SeekFrom};

    let _guard = STDOUT_LOCK.lock().unwrap_or_else(|e| e.into_inner());

    let mut reader = tempfile::tempfile().unwrap();
    let writer = reader.try_clone().unwrap();

    io::stdout().flush().unwrap();
    let saved = unsafe { libc::dup(libc::STDOUT_FILENO) };
    unsafe { libc::dup2(writer.as_fd().as_raw_fd(), libc::STDOUT_FILENO) };

    f();

    io::stdout().flush().unwrap();
    unsafe { libc::dup2(saved, libc::STDOUT_FILENO) };
    unsafe { libc::close(saved) };

    // fd 1 shared the file offset; rewind before reading
    reader.seek(SeekFrom::Start(0)).unwrap();
    let mut output = String::new();
    reader.read_to_string(&mut output).unwrap();
    output
}

/// In-memory writer whose contents stay readable after the sink takes ownership.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that fails every call.
pub struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Debug channel double that records every send.
#[derive(Clone, Default)]
pub struct RecordingChannel {
    pub messages: Arc<Mutex<Vec<(Channel, String)>>>,
    pub include_line_numbers: Arc<Mutex<Option<bool>>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(Channel, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl DebugChannel for RecordingChannel {
    fn send(&mut self, channel: Channel, message: &str) -> io::Result<()> {
        self.messages
            .lock()
            .unwrap()
            .push((channel, message.to_string()));
        Ok(())
    }

    fn set_include_line_numbers(&mut self, include: bool) {
        *self.include_line_numbers.lock().unwrap() = Some(include);
    }
}

/// Mail transport double; optionally fails every send.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    pub sent: Arc<Mutex<Vec<MailMessage>>>,
    pub fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl MailTransport for RecordingTransport {
    fn send(&mut self, message: &MailMessage) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Mail("transport rejected message".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Console configuration at the given threshold.
pub fn console_properties(level: &str) -> Properties {
    Properties::new().with("log_type", "4").with("log_level", level)
}
