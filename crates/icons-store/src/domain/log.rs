//! Log entries and the sink they are written to.
//!
//! The store never decides anything based on logging; it only reports load
//! failures through a [`LogSink`].  Concrete sinks live in
//! `infrastructure::log`.

use std::fmt;

/// Severity of a [`LogEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    /// Upper-case label used in transcript lines (`"INFO"`, `"ERROR"`, ...).
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Rendered error that caused this entry, if any.
    pub cause: Option<String>,
    /// `true` when the entry should also land in the in-memory transcript
    /// shown to the user after a job.
    pub transcript: bool,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            cause: None,
            transcript: false,
        }
    }

    /// Attaches the error that caused this entry.
    pub fn with_cause(mut self, cause: &dyn fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Marks the entry for the in-memory transcript.
    pub fn for_transcript(mut self) -> Self {
        self.transcript = true;
        self
    }
}

/// Destination for [`LogEntry`] values.
///
/// Implementations must be cheap and must not panic; a sink failure is never
/// reported back to the caller.
pub trait LogSink: Send + Sync {
    fn record(&self, entry: &LogEntry);

    fn debug(&self, message: &str) {
        self.record(&LogEntry::new(LogLevel::Debug, message));
    }

    fn info(&self, message: &str) {
        self.record(&LogEntry::new(LogLevel::Info, message));
    }

    fn warn(&self, message: &str) {
        self.record(&LogEntry::new(LogLevel::Warn, message));
    }

    fn error(&self, message: &str, cause: &dyn fmt::Display) {
        self.record(&LogEntry::new(LogLevel::Error, message).with_cause(cause));
    }
}
