//! Page cursor
//!
//! Body metadata takes precedence; the `X-Next-Page` header is consulted
//! only when the body carries no current-page value.

use super::types::NextPage;
use crate::decode::extract_u64;
use crate::types::PageToken;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tracing::{debug, warn};

/// Default location of the current page number
pub const DEFAULT_PAGE_PATH: &str = "$.meta.page";

/// Default location of the total page count
pub const DEFAULT_TOTAL_PAGES_PATH: &str = "$.meta.total_pages";

/// Default header carrying the next page number
pub const DEFAULT_NEXT_PAGE_HEADER: &str = "X-Next-Page";

/// Computes the next page token from a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page_path: String,
    total_pages_path: String,
    next_page_header: String,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page_path: DEFAULT_PAGE_PATH.to_string(),
            total_pages_path: DEFAULT_TOTAL_PAGES_PATH.to_string(),
            next_page_header: DEFAULT_NEXT_PAGE_HEADER.to_string(),
        }
    }
}

impl PageCursor {
    /// Cursor reading page metadata from custom locations
    pub fn new(page_path: impl Into<String>, total_pages_path: impl Into<String>) -> Self {
        Self {
            page_path: page_path.into(),
            total_pages_path: total_pages_path.into(),
            ..Default::default()
        }
    }

    /// Override the fallback header name
    #[must_use]
    pub fn with_next_page_header(mut self, header: impl Into<String>) -> Self {
        self.next_page_header = header.into();
        self
    }

    /// Decide which page to fetch after `previous`
    ///
    /// A token that would not move past `previous` ends pagination, so a
    /// server echoing stale metadata cannot cause an endless loop.
    pub fn next_page(
        &self,
        previous: Option<PageToken>,
        body: &Value,
        headers: &HeaderMap,
    ) -> NextPage {
        let candidate = match extract_u64(body, &self.page_path) {
            Some(current) => self.token_from_body(current, body),
            None => self.token_from_header(headers),
        };

        match (candidate, previous) {
            (Some(next), Some(prev)) if next <= prev => {
                warn!(
                    "Page cursor did not advance (previous {prev}, next {next}); stopping"
                );
                NextPage::Done
            }
            (next, _) => next.into(),
        }
    }

    fn token_from_body(&self, current: u64, body: &Value) -> Option<PageToken> {
        let candidate = current.checked_add(1)?;
        let Some(total_pages) = extract_u64(body, &self.total_pages_path) else {
            debug!(
                "'{}' present but '{}' missing; treating page {current} as last",
                self.page_path, self.total_pages_path
            );
            return None;
        };

        if candidate <= total_pages {
            PageToken::new(candidate)
        } else {
            None
        }
    }

    fn token_from_header(&self, headers: &HeaderMap) -> Option<PageToken> {
        headers
            .get(self.next_page_header.as_str())
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .and_then(PageToken::new)
    }
}
