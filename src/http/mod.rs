//! HTTP module
//!
//! Provides the HTTP client plus the pieces the extraction engine uses to
//! decide what to do with each response.
//!
//! # Features
//!
//! - **Single-shot requests**: `HttpClient` issues one GET and buffers the response
//! - **Classification**: `ResponseClassifier` sorts responses into
//!   success / ignorable / retriable / fatal
//! - **Backoff**: `BackoffPolicy` yields the deterministic wait schedule
//! - **Rate Limiting**: optional token bucket limiter using governor

mod backoff;
mod classify;
mod client;
mod rate_limit;

pub use backoff::{
    BackoffPolicy, DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_CAP, DEFAULT_BACKOFF_FACTOR,
    DEFAULT_MAX_ATTEMPTS,
};
pub use classify::{
    is_gateway_timeout_page, Classification, FatalReason, ResponseClassifier, RetryReason,
    GATEWAY_TIMEOUT,
};
pub use client::{HttpClient, HttpClientConfig, HttpResponse, REQUEST_ID_HEADER};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
