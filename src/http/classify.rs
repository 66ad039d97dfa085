//! Response classification
//!
//! Every response is sorted into one of four outcomes before the engine
//! decides what to do with it. Rules are applied in order:
//!
//! 1. status in the ignore set            -> `Ignorable`
//! 2. status in the extra-retry set or 5xx -> `Retriable` (504 with a gateway
//!    timeout page additionally asks for a smaller page size)
//! 3. any other 4xx                        -> `Fatal`
//! 4. everything else                      -> `Success`

use super::client::HttpResponse;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// Status code that may carry a gateway timeout page
pub const GATEWAY_TIMEOUT: u16 = 504;

static GATEWAY_TIMEOUT_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)gateway[\s_-]*time[\s-]*out").unwrap());

/// Why a response may succeed on a later attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// 5xx response
    ServerError,
    /// Status listed in the extra-retry set (e.g. 429)
    RetryStatus,
    /// 504 whose body reports a gateway timeout; the page size should shrink
    GatewayTimeout,
    /// No response at all (connect failure, read timeout)
    Transport,
}

/// Why a response can never succeed on retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    /// 4xx response not covered by the ignore set
    ClientError,
}

/// Outcome of classifying one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Extract records and continue
    Success,
    /// Treat as an empty, final page
    Ignorable,
    /// Back off and try the same page again
    Retriable(RetryReason),
    /// Abort extraction of the resource
    Fatal(FatalReason),
}

impl Classification {
    /// Whether the page size should be reduced before the next attempt
    pub fn shrink_requested(&self) -> bool {
        matches!(self, Self::Retriable(RetryReason::GatewayTimeout))
    }

    /// Check if this is a retriable outcome
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Retriable(_))
    }

    /// Check if this is a fatal outcome
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Ignorable => write!(f, "ignorable"),
            Self::Retriable(RetryReason::ServerError) => write!(f, "retriable (server error)"),
            Self::Retriable(RetryReason::RetryStatus) => write!(f, "retriable (retry status)"),
            Self::Retriable(RetryReason::GatewayTimeout) => {
                write!(f, "retriable (gateway timeout)")
            }
            Self::Retriable(RetryReason::Transport) => write!(f, "retriable (transport)"),
            Self::Fatal(FatalReason::ClientError) => write!(f, "fatal (client error)"),
        }
    }
}

/// Status-code driven response classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseClassifier {
    ignore_statuses: BTreeSet<u16>,
    extra_retry_statuses: BTreeSet<u16>,
}

impl Default for ResponseClassifier {
    /// 401 is tolerated and 429 is retried
    fn default() -> Self {
        Self {
            ignore_statuses: BTreeSet::from([401]),
            extra_retry_statuses: BTreeSet::from([429]),
        }
    }
}

impl ResponseClassifier {
    /// Classifier with empty ignore and extra-retry sets
    pub fn strict() -> Self {
        Self {
            ignore_statuses: BTreeSet::new(),
            extra_retry_statuses: BTreeSet::new(),
        }
    }

    /// Replace the ignore set
    #[must_use]
    pub fn with_ignore_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.ignore_statuses = statuses.into_iter().collect();
        self
    }

    /// Replace the extra-retry set
    #[must_use]
    pub fn with_extra_retry_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.extra_retry_statuses = statuses.into_iter().collect();
        self
    }

    /// Statuses treated as an empty success
    pub fn ignore_statuses(&self) -> &BTreeSet<u16> {
        &self.ignore_statuses
    }

    /// Statuses retried in addition to 5xx
    pub fn extra_retry_statuses(&self) -> &BTreeSet<u16> {
        &self.extra_retry_statuses
    }

    /// Classify a status code and body
    pub fn classify(&self, status: u16, body: &str) -> Classification {
        if self.ignore_statuses.contains(&status) {
            return Classification::Ignorable;
        }

        if self.extra_retry_statuses.contains(&status) || (500..=599).contains(&status) {
            if status == GATEWAY_TIMEOUT && is_gateway_timeout_page(body) {
                return Classification::Retriable(RetryReason::GatewayTimeout);
            }
            if self.extra_retry_statuses.contains(&status) {
                return Classification::Retriable(RetryReason::RetryStatus);
            }
            return Classification::Retriable(RetryReason::ServerError);
        }

        if (400..=499).contains(&status) {
            return Classification::Fatal(FatalReason::ClientError);
        }

        Classification::Success
    }

    /// Classify a buffered response, logging every retriable or fatal outcome
    pub fn inspect(&self, response: &HttpResponse) -> Classification {
        let classification = self.classify(response.status, &response.body);
        if classification.is_retriable() || classification.is_fatal() {
            warn!(
                status = response.status,
                request_id = response.request_id().unwrap_or("-"),
                body = %response.body,
                url = %response.url,
                "Request failed: {classification}"
            );
        }
        classification
    }
}

/// Whether a response body is a gateway timeout page
pub fn is_gateway_timeout_page(body: &str) -> bool {
    GATEWAY_TIMEOUT_TEXT.is_match(body)
}
