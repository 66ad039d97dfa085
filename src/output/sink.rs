//! Record sinks

use super::types::Message;
use crate::error::{Result, ResultExt};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Destination for extracted records
#[async_trait]
pub trait RecordSink: Send {
    /// Accept one post-processed record
    async fn emit(&mut self, stream: &str, record: Value) -> Result<()>;

    /// Flush anything buffered
    async fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON `RECORD` message per line
pub struct JsonLinesSink<W> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: AsyncWrite + Unpin + Send> JsonLinesSink<W> {
    /// Wrap any async writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    /// Number of messages written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Recover the underlying writer; call `flush` first
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesSink<tokio::io::Stdout> {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl JsonLinesSink<tokio::fs::File> {
    /// Sink writing to a newly created (or truncated) file
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::create(path)
            .await
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(Self::new(file))
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> RecordSink for JsonLinesSink<W> {
    async fn emit(&mut self, stream: &str, record: Value) -> Result<()> {
        let mut line = serde_json::to_vec(&Message::record(stream, record))?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        self.written += 1;
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

impl<W> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink")
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

/// Keeps every record in memory, in arrival order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<(String, Value)>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All records with their stream names
    pub fn records(&self) -> &[(String, Value)] {
        &self.records
    }

    /// Records belonging to one stream
    pub fn records_for(&self, stream: &str) -> Vec<&Value> {
        self.records
            .iter()
            .filter(|(s, _)| s == stream)
            .map(|(_, r)| r)
            .collect()
    }

    /// Total records collected
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing was collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn emit(&mut self, stream: &str, record: Value) -> Result<()> {
        self.records.push((stream.to_string(), record));
        Ok(())
    }
}
