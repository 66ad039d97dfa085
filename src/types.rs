//! Common types used throughout the tap
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Page Token
// ============================================================================

/// Index of the page to request next
///
/// Always positive. Absence of a token (`Option::None`) means either "first
/// request" or "no more pages", depending on where it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PageToken(u64);

impl PageToken {
    /// Create a token, rejecting zero
    pub fn new(page: u64) -> Option<Self> {
        (page > 0).then_some(Self(page))
    }

    /// The page index
    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for PageToken {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "page token must be positive".to_string())
    }
}

impl From<PageToken> for u64 {
    fn from(token: PageToken) -> Self {
        token.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_token_rejects_zero() {
        assert!(PageToken::new(0).is_none());
        assert_eq!(PageToken::new(3).map(PageToken::get), Some(3));
    }

    #[test]
    fn test_page_token_serde() {
        let token: PageToken = serde_json::from_str("2").unwrap();
        assert_eq!(token.get(), 2);
        assert!(serde_json::from_str::<PageToken>("0").is_err());
        assert_eq!(serde_json::to_string(&token).unwrap(), "2");
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some("  ".to_string()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
    }
}
