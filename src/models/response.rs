//! Typed response bodies for the Splitwise endpoints
//!
//! The API reports most failures inside a 200 response, either as
//! `"errors": {"base": ["..."]}`, `"errors": ["..."]`, or `"error": "..."`.
//! Every record keeps those fields so callers can inspect them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-reported error payload, in any of the shapes the API uses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiErrors(Value);

impl ApiErrors {
    /// Flatten every message into a list
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        collect_messages(&self.0, &mut messages);
        messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|v| collect_messages(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_messages(v, out)),
        other => out.push(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub default_currency: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => format!("user {}", self.id),
        }
    }
}

/// Body of `GET get_current_user`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub errors: ApiErrors,
    #[serde(default)]
    pub error: Option<String>,
}

/// One participant as reported back on an existing expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUser {
    pub user_id: u64,
    #[serde(default)]
    pub paid_share: Option<String>,
    #[serde(default)]
    pub owed_share: Option<String>,
}

/// An expense as stored by Splitwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: u64,
    #[serde(default)]
    pub group_id: Option<u64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub users: Vec<ExpenseUser>,
}

/// Body of `GET get_expenses`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpensesResponse {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub errors: ApiErrors,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST create_expense`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub errors: ApiErrors,
    #[serde(default)]
    pub error: Option<String>,
}

/// Shared inspection of the in-band error fields
pub trait ApiResponse {
    fn api_errors(&self) -> &ApiErrors;
    fn api_error(&self) -> Option<&str>;

    /// Every server-reported error message in this response
    fn error_messages(&self) -> Vec<String> {
        let mut messages = self.api_errors().messages();
        if let Some(error) = self.api_error() {
            messages.push(error.to_string());
        }
        messages
    }

    fn is_success(&self) -> bool {
        self.error_messages().is_empty()
    }
}

macro_rules! impl_api_response {
    ($($ty:ty),*) => {
        $(
            impl ApiResponse for $ty {
                fn api_errors(&self) -> &ApiErrors {
                    &self.errors
                }

                fn api_error(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )*
    };
}

impl_api_response!(CurrentUserResponse, ExpensesResponse, CreateExpenseResponse);
