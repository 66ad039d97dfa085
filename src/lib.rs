// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Syncro Tap
//!
//! Paginated record extraction from the Syncro REST API that keeps going
//! through rate limits, transient server errors and gateway timeouts.
//!
//! ## Features
//!
//! - **Page-number pagination**: `meta.page` / `meta.total_pages` with an
//!   `X-Next-Page` header fallback
//! - **Response classification**: ignorable, retriable and fatal statuses
//! - **Deterministic backoff**: 20s doubling up to 640s, 7 attempts per page
//! - **Adaptive page size**: gateway timeouts halve `per_page` down to 1
//! - **Static stream registry**: every Syncro resource the tap knows about
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use syncro_tap::{HttpClient, MemorySink, RequestExecutor, TapConfig};
//!
//! #[tokio::main]
//! async fn main() -> syncro_tap::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let executor = RequestExecutor::new(HttpClient::from_tap_config(&config)?);
//!
//!     let contacts = syncro_tap::streams::get_resource("contacts").unwrap();
//!     let mut sink = MemorySink::new();
//!     let stats = executor.extract(contacts, &mut sink).await?;
//!     println!("{} records", stats.records_emitted);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        RequestExecutor                          │
//! │  build params → GET → classify → retry / shrink → post-process  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Streams  │   Output    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Token    │ GET       │ PageCursor    │ Registry  │ JSON lines  │
//! │ header   │ Classify  │ Throttle      │ Post-proc │ Memory      │
//! │          │ Backoff   │               │           │             │
//! │          │ Rate Limit│               │           │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration
pub mod config;

/// Authentication
pub mod auth;

/// HTTP client, response classification, backoff and rate limiting
pub mod http;

/// Record and metadata extraction from JSON bodies
pub mod decode;

/// Page cursor and page-size throttle
pub mod pagination;

/// Resource definitions and the stream registry
pub mod streams;

/// Main execution engine
pub mod engine;

/// Record sinks
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::TapConfig;
pub use engine::{ExtractConfig, ExtractStats, RequestExecutor};
pub use http::{BackoffPolicy, HttpClient};
pub use output::{JsonLinesSink, MemorySink, RecordSink};
pub use streams::{Resource, ResourceDefinition};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
