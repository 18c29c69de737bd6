//! HTTP transport
//!
//! The client talks to the network only through [`Transport`], so tests can
//! swap in a recording fake. [`ReqwestTransport`] is the real, blocking one.

use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::error::{SplitrError, SplitrResult};
use crate::models::Token;

/// Blocking request/response operations the Splitwise client needs
pub trait Transport {
    /// POST a form to the OAuth token endpoint and decode the token
    ///
    /// Any failure, including a non-2xx status, is an
    /// [`SplitrError::Authentication`].
    fn request_token(&self, token_url: &str, form: &[(&str, &str)]) -> SplitrResult<Token>;

    /// Authenticated GET, decoding whatever JSON body comes back
    fn get(&self, url: &str, token: &Token, query: &[(&str, String)]) -> SplitrResult<Value>;

    /// Authenticated POST of a JSON body, decoding whatever JSON body comes back
    fn post_json(&self, url: &str, token: &Token, body: &Value) -> SplitrResult<Value>;
}

/// [`Transport`] over a blocking reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> SplitrResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("splitr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Use an already configured reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn request_token(&self, token_url: &str, form: &[(&str, &str)]) -> SplitrResult<Token> {
        let response = self
            .client
            .post(token_url)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .map_err(|e| SplitrError::Authentication {
                message: e.to_string(),
                status_code: e.status().map(|s| s.as_u16()),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| SplitrError::Authentication {
            message: format!("Failed to read token response: {}", e),
            status_code: Some(status.as_u16()),
        })?;

        if !status.is_success() {
            return Err(SplitrError::Authentication {
                message: describe_oauth_error(&body),
                status_code: Some(status.as_u16()),
            });
        }

        serde_json::from_str(&body).map_err(|e| SplitrError::Authentication {
            message: format!("Malformed token response: {}", e),
            status_code: Some(status.as_u16()),
        })
    }

    fn get(&self, url: &str, token: &Token, query: &[(&str, String)]) -> SplitrResult<Value> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&token.access_token)
            .query(query)
            .send()?;
        decode_body(response)
    }

    fn post_json(&self, url: &str, token: &Token, body: &Value) -> SplitrResult<Value> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&token.access_token)
            .json(body)
            .send()?;
        decode_body(response)
    }
}

/// Status codes are not checked: the API reports errors in the body
fn decode_body(response: Response) -> SplitrResult<Value> {
    let status = response.status();
    let body = response.text()?;
    serde_json::from_str(&body).map_err(|e| {
        SplitrError::Json(format!(
            "Response (HTTP {}) is not valid JSON: {}",
            status.as_u16(),
            e
        ))
    })
}

/// Pull the human-readable part out of an RFC 6749 error body
pub(crate) fn describe_oauth_error(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    match (field("error"), field("error_description")) {
        (Some(error), Some(description)) => format!("{}: {}", error, description),
        (Some(error), None) => error,
        (None, Some(description)) => description,
        (None, None) if body.trim().is_empty() => "empty response from token endpoint".into(),
        (None, None) => body.trim().chars().take(200).collect(),
    }
}
