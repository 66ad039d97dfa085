//! Execution engine module
//!
//! Sequential, page-by-page extraction of a resource.
//!
//! # Overview
//!
//! The engine module provides:
//! - `RequestExecutor` - fetches pages, classifies responses, retries with
//!   backoff, shrinks the page size on gateway timeouts and feeds
//!   post-processed records into a sink
//! - `ExtractConfig` - page size, backoff policy and failure mode
//! - `ExtractStats` / `RunReport` - per-resource and per-run results
//!
//! One request is in flight at a time. Each page gets a fresh attempt
//! counter; the page-size throttle lives for one resource's extraction.
//! Both network calls and backoff waits abort on cancellation.

mod types;

pub use types::{ExtractConfig, ExtractStats, RunReport};

use crate::decode::JsonDecoder;
use crate::error::{Error, Result};
use crate::http::{Classification, HttpClient, HttpResponse, ResponseClassifier, RetryReason};
use crate::output::RecordSink;
use crate::pagination::{NextPage, PageSizeThrottle};
use crate::streams::Resource;
use crate::types::PageToken;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// What a page fetch produced once retries are over
enum PageOutcome {
    /// A response classified as success
    Fetched(HttpResponse),
    /// An ignorable status; the stream ends here
    Ignored,
}

/// Drives paginated extraction against one API
pub struct RequestExecutor {
    client: HttpClient,
    config: ExtractConfig,
    cancel: CancellationToken,
}

impl RequestExecutor {
    /// Create an executor with default configuration
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            config: ExtractConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Set extract configuration
    #[must_use]
    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an externally owned cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts in-flight requests and backoff waits when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Get the extract configuration
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Extract every page of a resource into `sink`
    pub async fn extract(
        &self,
        resource: &dyn Resource,
        sink: &mut dyn RecordSink,
    ) -> Result<ExtractStats> {
        let start = Instant::now();
        let name = resource.name();
        let mut stats = ExtractStats::new(name);
        let mut throttle = PageSizeThrottle::new(self.config.page_size);

        info!(stream = name, "Starting extraction");

        let result = self
            .extract_pages(resource, sink, &mut throttle, &mut stats)
            .await;
        // Records from earlier pages stay in the output even when a later page fails
        let flushed = sink.flush().await;
        result?;
        flushed?;

        stats.final_page_size = throttle.current();
        stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            stream = name,
            records = stats.records_emitted,
            pages = stats.pages_fetched,
            "Completed extraction in {}ms",
            stats.duration_ms
        );
        Ok(stats)
    }

    /// Extract several resources one after another
    ///
    /// With `fail_fast` the first failure is returned as the error;
    /// otherwise failures are collected and the next resource starts.
    /// Cancellation always stops the run.
    pub async fn extract_all<'r, R>(
        &self,
        resources: impl IntoIterator<Item = &'r R>,
        sink: &mut dyn RecordSink,
    ) -> Result<RunReport>
    where
        R: Resource + 'r,
    {
        let mut report = RunReport::default();
        for resource in resources {
            match self.extract(resource, sink).await {
                Ok(stats) => report.completed.push(stats),
                Err(e) if e.is_cancelled() || self.config.fail_fast => return Err(e),
                Err(e) => {
                    warn!(stream = resource.name(), "Extraction failed: {e}");
                    report.failed.push((resource.name().to_string(), e));
                }
            }
        }
        Ok(report)
    }

    /// Page loop for one resource; records go to `sink` as each page arrives
    async fn extract_pages(
        &self,
        resource: &dyn Resource,
        sink: &mut dyn RecordSink,
        throttle: &mut PageSizeThrottle,
        stats: &mut ExtractStats,
    ) -> Result<()> {
        let name = resource.name();
        let cursor = resource.cursor();
        let classifier = resource.classifier();
        let decoder = JsonDecoder::with_path(resource.records_path());
        let mut page: Option<PageToken> = None;

        loop {
            let response = match self
                .fetch_page(resource, &classifier, page, throttle, stats)
                .await?
            {
                PageOutcome::Fetched(response) => response,
                PageOutcome::Ignored => break,
            };
            stats.add_page();

            let body = response.json()?;
            let records = decoder.records(&body)?;
            debug!(
                stream = name,
                page = page.map_or(1, u64::from),
                records = records.len(),
                "Fetched page"
            );

            for record in records {
                match resource.post_process(record) {
                    Ok(record) => {
                        sink.emit(name, record).await?;
                        stats.add_record();
                    }
                    Err(e) => {
                        warn!(stream = name, "Skipping record: {e}");
                        stats.add_skipped();
                    }
                }
            }

            match cursor.next_page(page, &body, &response.headers) {
                NextPage::Continue(next) => page = Some(next),
                NextPage::Done => break,
            }
        }

        Ok(())
    }

    /// Fetch one page, retrying retriable failures
    async fn fetch_page(
        &self,
        resource: &dyn Resource,
        classifier: &ResponseClassifier,
        page: Option<PageToken>,
        throttle: &mut PageSizeThrottle,
        stats: &mut ExtractStats,
    ) -> Result<PageOutcome> {
        let backoff = &self.config.backoff;
        let mut attempts: u32 = 0;

        loop {
            let params = resource.build_params(page, throttle.current());
            let url = self.client.build_url(resource.path(), &params.to_query())?;

            let (classification, last_status) = match self.send(&url).await {
                Ok(response) => match classifier.inspect(&response) {
                    Classification::Success => return Ok(PageOutcome::Fetched(response)),
                    Classification::Ignorable => {
                        info!(
                            stream = resource.name(),
                            status = response.status,
                            url = %url,
                            "Ignoring response; ending stream"
                        );
                        return Ok(PageOutcome::Ignored);
                    }
                    Classification::Fatal(_) => {
                        return Err(Error::http_status(response.status, response.body))
                    }
                    retriable => (retriable, Some(response.status)),
                },
                Err(Error::Http(e)) if is_transient(&e) => {
                    warn!(url = %url, "Request failed: retriable (transport): {e}");
                    (Classification::Retriable(RetryReason::Transport), None)
                }
                Err(e) => return Err(e),
            };

            if classification.shrink_requested() {
                let size = throttle.shrink();
                stats.add_shrink();
                let rewritten = self
                    .client
                    .build_url(resource.path(), &params.with_page_size(Some(size)).to_query())?;
                warn!(per_page = size, url = %rewritten, "Gateway timeout; page size reduced");
            }

            attempts += 1;
            if !backoff.allows_another(attempts) {
                return Err(Error::RetriesExhausted {
                    attempts,
                    last_status,
                    message: format!("{classification} for {url}"),
                });
            }

            let wait = backoff.wait(attempts - 1);
            stats.add_retry();
            info!(
                stream = resource.name(),
                attempt = attempts + 1,
                "Backing off {:.1}s before retry",
                wait.as_secs_f64()
            );

            tokio::select! {
                biased;
                () = self.cancel.cancelled() => return Err(Error::Cancelled),
                () = tokio::time::sleep(wait) => {}
            }
        }
    }

    /// Issue one request unless cancelled first
    async fn send(&self, url: &Url) -> Result<HttpResponse> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::Cancelled),
            result = self.client.get(url) => result,
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

/// Transport failures worth another attempt
fn is_transient(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request() || error.is_body()
}
