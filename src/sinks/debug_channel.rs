//! In-browser debug channel sink.
//!
//! Admitted lines are bucketed by severity into one of four console
//! sub-channels of a remote debugging channel:
//!
//! | rank | channel |
//! |------|---------|
//! | 0-3  | error   |
//! | 4    | warn    |
//! | 5-6  | info    |
//! | 7+   | log     |
//!
//! The default channel speaks the Wildfire JSON-stream protocol used by
//! FirePHP: every send becomes one `X-Wf-1-1-1-<n>` header line written to a
//! buffered output, which is flushed when the sink is dropped.

use crate::error::SinkError;
use crate::logger::level::Severity;
use serde_json::{Map, Value, json};
use std::io::{self, BufWriter, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Error,
    Warn,
    Info,
    Log,
}

impl Channel {
    /// Picks the sub-channel for a severity rank.
    pub fn for_rank(rank: u8) -> Self {
        match rank {
            0..=3 => Channel::Error,
            4 => Channel::Warn,
            5..=6 => Channel::Info,
            _ => Channel::Log,
        }
    }

    /// Wildfire `Type` value.
    pub fn wire_type(self) -> &'static str {
        match self {
            Channel::Error => "ERROR",
            Channel::Warn => "WARN",
            Channel::Info => "INFO",
            Channel::Log => "LOG",
        }
    }
}

/// A remote debugging channel with four console sub-channels.
///
/// Only `send` is required; the per-channel helpers delegate to it so test
/// doubles stay small.
pub trait DebugChannel: Send {
    fn send(&mut self, channel: Channel, message: &str) -> io::Result<()>;

    /// Toggles the channel's own line-number decoration.
    fn set_include_line_numbers(&mut self, _include: bool) {}

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.send(Channel::Error, message)
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        self.send(Channel::Warn, message)
    }

    fn info(&mut self, message: &str) -> io::Result<()> {
        self.send(Channel::Info, message)
    }

    fn log(&mut self, message: &str) -> io::Result<()> {
        self.send(Channel::Log, message)
    }
}

const PROTOCOL_HEADERS: [&str; 3] = [
    "X-Wf-Protocol-1: http://meta.wildfirehq.org/Protocol/JsonStream/0.2",
    "X-Wf-1-Plugin-1: http://meta.firephp.org/Wildfire/Plugin/FirePHP/Library-FirePHPCore/0.3",
    "X-Wf-1-Structure-1: http://meta.firephp.org/Wildfire/Structure/FirePHP/FirebugConsole/0.1",
];

/// Wildfire/FirePHP header encoder over a buffered writer.
pub struct WildfireChannel {
    out: BufWriter<Box<dyn Write + Send>>,
    index: usize,
    include_line_numbers: bool,
}

impl WildfireChannel {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: BufWriter::new(Box::new(writer)),
            index: 0,
            include_line_numbers: true,
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn include_line_numbers(&self) -> bool {
        self.include_line_numbers
    }

    /// Number of messages sent so far.
    pub fn sent(&self) -> usize {
        self.index
    }

    /// Builds the header line for the `index`-th message (1-based).
    pub fn encode(&self, index: usize, channel: Channel, message: &str) -> String {
        let mut meta = Map::new();
        meta.insert("Type".to_string(), json!(channel.wire_type()));
        if self.include_line_numbers
            && let Some(line) = line_hint(message)
        {
            meta.insert("Line".to_string(), json!(line));
        }

        let payload = Value::Array(vec![Value::Object(meta), json!(message)]).to_string();
        format!("X-Wf-1-1-1-{}: {}|{}|", index, payload.len(), payload)
    }
}

impl DebugChannel for WildfireChannel {
    fn send(&mut self, channel: Channel, message: &str) -> io::Result<()> {
        if self.index == 0 {
            for header in PROTOCOL_HEADERS {
                writeln!(self.out, "{}", header)?;
            }
        }
        self.index += 1;
        let header = self.encode(self.index, channel, message);
        writeln!(self.out, "{}", header)
    }

    fn set_include_line_numbers(&mut self, include: bool) {
        self.include_line_numbers = include;
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

// Line number carried in a formatted entry ("... - line 42 ...").
fn line_hint(message: &str) -> Option<u32> {
    let rest = &message[message.find("- line ")? + "- line ".len()..];
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

pub struct DebugChannelSink {
    channel: Box<dyn DebugChannel>,
}

impl DebugChannelSink {
    /// Wraps `channel`, turning off its line-number decoration since the
    /// formatted line already carries the line.
    pub fn new(mut channel: Box<dyn DebugChannel>) -> Self {
        channel.set_include_line_numbers(false);
        Self { channel }
    }

    /// Wildfire headers on standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(WildfireChannel::stdout()))
    }

    /// Replaces the channel. The previous one is flushed and dropped.
    pub fn set_channel(&mut self, mut channel: Box<dyn DebugChannel>) -> &mut Self {
        channel.set_include_line_numbers(false);
        let mut previous = std::mem::replace(&mut self.channel, channel);
        if let Err(e) = previous.flush() {
            tracing::warn!(error = %e, "failed to flush replaced debug channel");
        }
        self
    }

    pub fn channel_mut(&mut self) -> &mut dyn DebugChannel {
        self.channel.as_mut()
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.channel.flush()?;
        Ok(())
    }

    pub fn write(&mut self, line: &str, severity: Severity) -> Result<(), SinkError> {
        match Channel::for_rank(severity.rank()) {
            Channel::Error => self.channel.error(line)?,
            Channel::Warn => self.channel.warn(line)?,
            Channel::Info => self.channel.info(line)?,
            Channel::Log => self.channel.log(line)?,
        }
        Ok(())
    }
}

impl Drop for DebugChannelSink {
    fn drop(&mut self) {
        if let Err(e) = self.channel.flush() {
            tracing::warn!(error = %e, "failed to flush debug channel output");
        }
    }
}
