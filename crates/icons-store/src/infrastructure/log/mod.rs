//! Log sinks.
//!
//! - [`TracingSink`] forwards every entry to the host's `tracing` subscriber.
//! - [`MemorySink`] keeps formatted lines in memory so a job can show the
//!   user what happened.
//! - [`FanOutSink`] sends each entry to several sinks, which is how the two
//!   above are combined.

mod fan_out;
mod memory;
mod tracing_sink;

pub use fan_out::FanOutSink;
pub use memory::MemorySink;
pub use tracing_sink::TracingSink;
