//! Engine types
//!
//! Configuration and statistics for extraction runs.

use crate::error::Error;
use crate::http::BackoffPolicy;

/// Configuration for an extraction run
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Initial `per_page`; `None` leaves it to the API
    pub page_size: Option<u32>,
    /// Retry schedule for each page fetch
    pub backoff: BackoffPolicy,
    /// Stop the run at the first failed resource
    pub fail_fast: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            backoff: BackoffPolicy::default(),
            fail_fast: true,
        }
    }
}

impl ExtractConfig {
    /// Create a new extract config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the backoff policy
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set fail fast mode
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Statistics from extracting one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Stream name
    pub stream: String,
    /// Successful page responses processed
    pub pages_fetched: usize,
    /// Records handed to the sink
    pub records_emitted: usize,
    /// Records dropped because post-processing failed
    pub records_skipped: usize,
    /// Retriable failures that were retried
    pub retries: usize,
    /// Page-size reductions after gateway timeouts
    pub shrinks: usize,
    /// Page size in effect when extraction ended
    pub final_page_size: Option<u32>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExtractStats {
    /// Create empty stats for a stream
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
            ..Default::default()
        }
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add an emitted record
    pub fn add_record(&mut self) {
        self.records_emitted += 1;
    }

    /// Add a skipped record
    pub fn add_skipped(&mut self) {
        self.records_skipped += 1;
    }

    /// Add a retry
    pub fn add_retry(&mut self) {
        self.retries += 1;
    }

    /// Add a page-size reduction
    pub fn add_shrink(&mut self) {
        self.shrinks += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Outcome of extracting several resources
#[derive(Debug, Default)]
pub struct RunReport {
    /// Stats for every resource that finished
    pub completed: Vec<ExtractStats>,
    /// Resources that failed, with their errors
    pub failed: Vec<(String, Error)>,
}

impl RunReport {
    /// Check if every resource finished
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Records emitted across all finished resources
    pub fn total_records(&self) -> usize {
        self.completed.iter().map(|s| s.records_emitted).sum()
    }
}
