//! Mail sink.
//!
//! Each admitted line is sent as the body of one mail. The subject names the
//! originating host and the severity label. Delivery goes through a
//! [`MailTransport`]; the default pipes the message into `sendmail`.

use crate::config::Properties;
use crate::error::{Result, SinkError};
use crate::logger::level::Severity;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const LOG_MAIL_TO: &str = "log_mail_to";
pub const LOG_MAIL_FROM: &str = "log_mail_from";

/// Host shown in the subject; defaults to the machine hostname.
pub const LOG_MAIL_HOST: &str = "log_mail_host";

/// Path of the sendmail-compatible binary.
pub const LOG_MAIL_SENDMAIL: &str = "log_mail_sendmail";

pub const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// Renders headers and body as RFC 822 text.
    pub fn to_rfc822(&self) -> String {
        format!(
            "To: {}\nFrom: {}\nSubject: {}\n\n{}\n",
            header_value(&self.to),
            header_value(&self.from),
            header_value(&self.subject),
            self.body
        )
    }
}

// Header values must stay on one line.
fn header_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// Delivers a rendered mail.
pub trait MailTransport: Send {
    fn send(&mut self, message: &MailMessage) -> std::result::Result<(), SinkError>;
}

/// Hands messages to a local `sendmail -t -i` process.
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    program: PathBuf,
}

impl SendmailTransport {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SENDMAIL)
    }
}

impl MailTransport for SendmailTransport {
    fn send(&mut self, message: &MailMessage) -> std::result::Result<(), SinkError> {
        let mut child = Command::new(&self.program)
            .arg("-t")
            .arg("-i")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // stdin is closed at the end of this block so the child sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(message.to_rfc822().as_bytes()),
            None => Ok(()),
        };

        // Always reap the child, even when it stopped reading early.
        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(SinkError::Mail(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        written?;
        Ok(())
    }
}

pub struct MailSink {
    to: String,
    from: String,
    host: String,
    transport: Box<dyn MailTransport>,
}

impl MailSink {
    pub fn new(
        to: impl Into<String>,
        from: impl Into<String>,
        host: impl Into<String>,
        transport: Box<dyn MailTransport>,
    ) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            host: host.into(),
            transport,
        }
    }

    /// Reads recipient and sender (both required), host and sendmail path.
    pub fn from_properties(properties: &Properties) -> Result<Self> {
        let to = properties.require(LOG_MAIL_TO)?;
        let from = properties.require(LOG_MAIL_FROM)?;
        let host = match properties.get_property(LOG_MAIL_HOST) {
            Some(host) if !host.trim().is_empty() => host.trim().to_string(),
            _ => local_hostname(),
        };
        let program = properties
            .get_property(LOG_MAIL_SENDMAIL)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_SENDMAIL);

        Ok(Self::new(
            to,
            from,
            host,
            Box::new(SendmailTransport::new(program)),
        ))
    }

    /// Swaps the delivery mechanism.
    pub fn set_transport(&mut self, transport: Box<dyn MailTransport>) -> &mut Self {
        self.transport = transport;
        self
    }

    pub fn recipient(&self) -> &str {
        &self.to
    }

    pub fn sender(&self) -> &str {
        &self.from
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn subject(&self, severity: Severity) -> String {
        format!(
            "New Log-Message from {} with state {}",
            self.host,
            severity.label()
        )
    }

    pub fn message(&self, line: &str, severity: Severity) -> MailMessage {
        MailMessage {
            to: self.to.clone(),
            from: self.from.clone(),
            subject: self.subject(severity),
            body: line.to_string(),
        }
    }

    pub fn write(&mut self, line: &str, severity: Severity) -> std::result::Result<(), SinkError> {
        let message = self.message(line, severity);
        self.transport.send(&message)
    }
}

/// Hostname via `gethostname(2)`, or `localhost` if it can't be read.
pub fn local_hostname() -> String {
    let mut buf = [0u8; 256];
    // SAFETY: `buf` is valid for writes of `buf.len()` bytes for the whole call;
    // gethostname writes at most that many bytes and nothing outlives the call.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    if rc != 0 {
        return "localhost".to_string();
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]).into_owned();
    if name.is_empty() {
        "localhost".to_string()
    } else {
        name
    }
}
