//! Resource capability trait and its static implementation

use super::post_process::RecordPostProcessor;
use crate::error::Result;
use crate::http::ResponseClassifier;
use crate::pagination::{PageCursor, RequestParams};
use crate::types::PageToken;
use serde_json::Value;

/// What the extraction engine needs to know about a resource
///
/// Only the identity and locations are required; everything else has the
/// behavior shared by all Syncro resources.
pub trait Resource: Send + Sync {
    /// Stream name (e.g. "contacts")
    fn name(&self) -> &str;

    /// Path under the API root (e.g. "/contacts")
    fn path(&self) -> &str;

    /// Location of the record array in the response body
    fn records_path(&self) -> &str;

    /// Field the API should sort by, ascending
    fn ordering_key(&self) -> Option<&str> {
        None
    }

    /// Query parameters for one page request
    fn build_params(&self, page: Option<PageToken>, per_page: Option<u32>) -> RequestParams {
        RequestParams::new(page, per_page).with_order_by(self.ordering_key())
    }

    /// Where pagination metadata is read from
    fn cursor(&self) -> PageCursor {
        PageCursor::default()
    }

    /// Status handling for this resource
    fn classifier(&self) -> ResponseClassifier {
        ResponseClassifier::default()
    }

    /// Normalize one record before it is handed to the caller
    fn post_process(&self, record: Value) -> Result<Value> {
        Ok(record)
    }
}

/// Static description of a resource
#[derive(Clone, Copy)]
pub struct ResourceDefinition {
    /// Stream name
    pub name: &'static str,
    /// Path under the API root
    pub path: &'static str,
    /// Record location in the response body
    pub records_path: &'static str,
    /// Primary key fields
    pub primary_keys: &'static [&'static str],
    /// Ascending sort key, if the resource supports one
    pub ordering_key: Option<&'static str>,
    /// Statuses treated as an empty final page
    pub ignore_statuses: &'static [u16],
    /// Statuses retried in addition to 5xx
    pub extra_retry_statuses: &'static [u16],
    /// Record normalization hook
    pub post_processor: &'static dyn RecordPostProcessor,
}

impl Resource for ResourceDefinition {
    fn name(&self) -> &str {
        self.name
    }

    fn path(&self) -> &str {
        self.path
    }

    fn records_path(&self) -> &str {
        self.records_path
    }

    fn ordering_key(&self) -> Option<&str> {
        self.ordering_key
    }

    fn classifier(&self) -> ResponseClassifier {
        ResponseClassifier::default()
            .with_ignore_statuses(self.ignore_statuses.iter().copied())
            .with_extra_retry_statuses(self.extra_retry_statuses.iter().copied())
    }

    fn post_process(&self, record: Value) -> Result<Value> {
        self.post_processor.post_process(record)
    }
}

impl std::fmt::Debug for ResourceDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceDefinition")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("records_path", &self.records_path)
            .field("primary_keys", &self.primary_keys)
            .field("ordering_key", &self.ordering_key)
            .field("ignore_statuses", &self.ignore_statuses)
            .field("extra_retry_statuses", &self.extra_retry_statuses)
            .finish_non_exhaustive()
    }
}
