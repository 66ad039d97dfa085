//! Pagination module
//!
//! Page-number pagination driven by response metadata.
//!
//! # Overview
//!
//! - `PageCursor` reads `meta.page` / `meta.total_pages` (or the
//!   `X-Next-Page` header) and decides which page comes next
//! - `PageSizeThrottle` holds the `per_page` value for one extraction and
//!   halves it after gateway timeouts
//! - `RequestParams` turns cursor and throttle state into query parameters

mod cursor;
mod throttle;
mod types;

pub use cursor::{
    PageCursor, DEFAULT_NEXT_PAGE_HEADER, DEFAULT_PAGE_PATH, DEFAULT_TOTAL_PAGES_PATH,
};
pub use throttle::{PageSizeThrottle, INITIAL_SHRINK_SIZE};
pub use types::{NextPage, RequestParams, SORT_ASCENDING};

#[cfg(test)]
mod tests;
