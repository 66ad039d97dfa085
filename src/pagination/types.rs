//! Pagination types

use crate::types::PageToken;

/// `sort` value sent with every `order_by`
pub const SORT_ASCENDING: &str = "asc";

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this page next
    Continue(PageToken),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The token to request next, if any
    pub fn token(&self) -> Option<PageToken> {
        match self {
            Self::Continue(token) => Some(*token),
            Self::Done => None,
        }
    }
}

impl From<Option<PageToken>> for NextPage {
    fn from(token: Option<PageToken>) -> Self {
        token.map_or(Self::Done, Self::Continue)
    }
}

/// Query parameters for one page request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// `page`; omitted on the first request
    pub page: Option<PageToken>,
    /// `per_page`; omitted while the throttle has no value
    pub per_page: Option<u32>,
    /// `order_by`; only for resources with an ordering key, always ascending
    pub order_by: Option<String>,
}

impl RequestParams {
    /// Parameters for a page request
    pub fn new(page: Option<PageToken>, per_page: Option<u32>) -> Self {
        Self {
            page,
            per_page,
            ..Default::default()
        }
    }

    /// Add an ascending ordering key
    #[must_use]
    pub fn with_order_by(mut self, key: Option<&str>) -> Self {
        self.order_by = key.map(str::to_string);
        self
    }

    /// Same request with a different page size
    #[must_use]
    pub fn with_page_size(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }

    /// Query pairs in wire order: `page`, `per_page`, `sort`, `order_by`
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(4);
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(key) = &self.order_by {
            query.push(("sort", SORT_ASCENDING.to_string()));
            query.push(("order_by", key.clone()));
        }
        query
    }
}
