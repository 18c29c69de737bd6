//! OAuth bearer token
//!
//! Kept opaque: whatever the token endpoint returns is cached and written back
//! verbatim, including fields this crate does not know about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,

    #[serde(default = "default_token_type")]
    pub token_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<f64>,

    /// Any other provider fields, preserved for the cache file
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Token {
    /// Create a bearer token with no expiry metadata
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            expires_in: None,
            expires_at: None,
            extra: Map::new(),
        }
    }

    /// An empty access token is treated the same as no token at all
    pub fn is_usable(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}
