//! Output module
//!
//! Where extracted records go once they leave the engine.
//!
//! # Overview
//!
//! - `RecordSink` - async destination for post-processed records
//! - `JsonLinesSink` - one `RECORD` message per line to stdout or a file
//! - `MemorySink` - collects records in memory for callers and tests

mod sink;
mod types;

pub use sink::{JsonLinesSink, MemorySink, RecordSink};
pub use types::Message;
