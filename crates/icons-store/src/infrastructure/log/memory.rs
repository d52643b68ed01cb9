use chrono::Local;
use parking_lot::Mutex;

use crate::domain::log::{LogEntry, LogSink};

/// Keeps formatted entries in memory for later display.
///
/// Lines look like `[2026-01-31 18:04:05.123] [INFO] message`; an entry
/// with a cause gets a second line, `Error: <cause>`.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    capture_all: bool,
}

impl MemorySink {
    /// Records only entries marked with [`LogEntry::for_transcript`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every entry, marked or not.
    pub fn capture_all() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            capture_all: true,
        }
    }

    /// Snapshot of the recorded lines, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// All recorded lines joined with `\n`.
    pub fn as_string(&self) -> String {
        self.lines.lock().join("\n")
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    fn format(entry: &LogEntry) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let mut line = format!("[{timestamp}] [{}] {}", entry.level, entry.message);
        if let Some(cause) = &entry.cause {
            line.push_str("\nError: ");
            line.push_str(cause);
        }
        line
    }
}

impl LogSink for MemorySink {
    fn record(&self, entry: &LogEntry) {
        if !(self.capture_all || entry.transcript) {
            return;
        }
        let line = Self::format(entry);
        self.lines.lock().push(line);
    }
}
