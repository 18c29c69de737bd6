//! In-memory transport for unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use serde_json::{json, Value};

use super::transport::Transport;
use crate::error::{SplitrError, SplitrResult};
use crate::models::Token;

/// What the fake token endpoint does when asked
pub enum TokenBehavior {
    Grant(Token),
    Reject { status: u16, body: String },
    Unreachable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get {
        url: String,
        query: Vec<(String, String)>,
    },
    Post {
        url: String,
        body: Value,
    },
}

/// Records every request and answers from a queue of canned bodies
pub struct FakeTransport {
    token: TokenBehavior,
    token_requests: Cell<usize>,
    last_token_form: RefCell<Vec<(String, String)>>,
    responses: RefCell<VecDeque<Value>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
    pub fn granting(access_token: &str) -> Self {
        Self::new(TokenBehavior::Grant(Token::bearer(access_token)))
    }

    pub fn new(token: TokenBehavior) -> Self {
        Self {
            token,
            token_requests: Cell::new(0),
            last_token_form: RefCell::new(Vec::new()),
            responses: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn respond_with(self, body: Value) -> Self {
        self.responses.borrow_mut().push_back(body);
        self
    }

    pub fn token_requests(&self) -> usize {
        self.token_requests.get()
    }

    pub fn last_token_form(&self) -> Vec<(String, String)> {
        self.last_token_form.borrow().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn posted_bodies(&self) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Post { body, .. } => Some(body.clone()),
                Call::Get { .. } => None,
            })
            .collect()
    }

    fn next_response(&self) -> Value {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| json!({"expenses": [], "errors": {}}))
    }
}

impl Transport for FakeTransport {
    fn request_token(&self, _token_url: &str, form: &[(&str, &str)]) -> SplitrResult<Token> {
        self.token_requests.set(self.token_requests.get() + 1);
        *self.last_token_form.borrow_mut() = form
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        match &self.token {
            TokenBehavior::Grant(token) => Ok(token.clone()),
            TokenBehavior::Reject { status, body } => Err(SplitrError::Authentication {
                message: body.clone(),
                status_code: Some(*status),
            }),
            TokenBehavior::Unreachable => {
                Err(SplitrError::Transport("connection refused".into()))
            }
        }
    }

    fn get(&self, url: &str, _token: &Token, query: &[(&str, String)]) -> SplitrResult<Value> {
        self.calls.borrow_mut().push(Call::Get {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });
        Ok(self.next_response())
    }

    fn post_json(&self, url: &str, _token: &Token, body: &Value) -> SplitrResult<Value> {
        self.calls.borrow_mut().push(Call::Post {
            url: url.to_string(),
            body: body.clone(),
        });
        Ok(self.next_response())
    }
}
