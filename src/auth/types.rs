//! Auth configuration types

use serde::{Deserialize, Serialize};

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API Key authentication (header or query)
    ApiKey {
        /// Where to place the API key
        location: Location,
        /// Header or query parameter name
        name: String,
        /// Prefix to add before the value (e.g., "Bearer ")
        prefix: Option<String>,
        /// The API key value
        value: String,
    },
}

impl AuthConfig {
    /// `Authorization: <token>`, the placement Syncro accepts
    pub fn authorization_header(token: impl Into<String>) -> Self {
        Self::ApiKey {
            location: Location::Header,
            name: "Authorization".to_string(),
            prefix: None,
            value: token.into(),
        }
    }

    /// Set a value prefix such as `"Bearer "`
    #[must_use]
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        match self {
            Self::ApiKey {
                location,
                name,
                value,
                ..
            } => Self::ApiKey {
                location,
                name,
                prefix: Some(prefix.into()),
                value,
            },
            other => other,
        }
    }
}
