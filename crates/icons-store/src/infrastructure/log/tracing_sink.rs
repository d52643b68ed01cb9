use tracing::{debug, error, info, warn};

use crate::domain::log::{LogEntry, LogLevel, LogSink};

/// Forwards entries to `tracing` at the matching level.
///
/// `Fatal` has no `tracing` counterpart and is emitted as `error` with a
/// `fatal = true` field.
#[derive(Debug, Clone)]
pub struct TracingSink {
    name: String,
}

impl TracingSink {
    /// `name` is attached to every event as the `logger` field.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LogSink for TracingSink {
    fn record(&self, entry: &LogEntry) {
        let logger = self.name.as_str();
        let cause = entry.cause.as_deref();
        let message = entry.message.as_str();
        match entry.level {
            LogLevel::Debug => debug!(logger, cause, "{message}"),
            LogLevel::Info => info!(logger, cause, "{message}"),
            LogLevel::Warn => warn!(logger, cause, "{message}"),
            LogLevel::Error => error!(logger, cause, "{message}"),
            LogLevel::Fatal => error!(logger, cause, fatal = true, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_sink_accepts_every_level_without_subscriber() {
        // No subscriber is installed; recording must still be a no-op, not a panic.
        let sink = TracingSink::new("EmbyIcons");
        for level in [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
            LogLevel::Fatal,
        ] {
            sink.record(&LogEntry::new(level, "message").with_cause(&"cause"));
        }
    }
}
