use std::sync::Arc;

use crate::domain::log::{LogEntry, LogSink};

/// Sends every entry to each of its sinks, in order.
#[derive(Clone, Default)]
pub struct FanOutSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl FanOutSink {
    /// Adds another sink.
    pub fn with(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl LogSink for FanOutSink {
    fn record(&self, entry: &LogEntry) {
        for sink in &self.sinks {
            sink.record(entry);
        }
    }
}
