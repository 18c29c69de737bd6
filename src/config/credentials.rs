//! OAuth client credentials
//!
//! Read from `CLIENT_ID` / `CLIENT_SECRET`, falling back to the lower-case
//! `client_id` / `client_secret` names. A `.env` file in the working directory
//! is loaded into the environment by the binary before lookup.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::SplitrError;

const CLIENT_ID_VARS: [&str; 2] = ["CLIENT_ID", "client_id"];
const CLIENT_SECRET_VARS: [&str; 2] = ["CLIENT_SECRET", "client_secret"];

/// Client identifier and secret for the client-credentials grant
///
/// Both values are wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load credentials from the process environment
    pub fn from_env() -> Result<Self, SplitrError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SplitrError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = first_set(&lookup, &CLIENT_ID_VARS)?;
        let client_secret = first_set(&lookup, &CLIENT_SECRET_VARS)?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

fn first_set<F>(lookup: &F, names: &[&str]) -> Result<String, SplitrError>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            SplitrError::Config(format!("{} is not set in the environment", names[0]))
        })
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
