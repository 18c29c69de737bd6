//! Expense request and the flat payload it is sent as
//!
//! The create endpoint does not accept nested arrays, so participants are
//! encoded as indexed top-level keys (`users__0__user_id`, ...).

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use super::money::Money;
use crate::error::{SplitrError, SplitrResult};

/// Format the API expects for the `date` field
pub const API_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One participant's part of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantShare {
    pub user_id: u64,
    /// What this participant is responsible for
    pub owed_share: Money,
    /// What this participant actually paid
    pub paid_share: Money,
}

impl ParticipantShare {
    pub fn new(user_id: u64, owed_share: Money, paid_share: Money) -> Self {
        Self {
            user_id,
            owed_share,
            paid_share,
        }
    }
}

/// A single expense to be created
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRequest {
    pub group_id: u64,
    pub description: String,
    pub cost: Money,
    pub date: Option<NaiveDateTime>,
    pub currency_code: String,
    pub users: Vec<ParticipantShare>,
    /// Free-form details, sent as a JSON string
    pub details: Option<Map<String, Value>>,
}

impl ExpenseRequest {
    pub fn new(group_id: u64, description: impl Into<String>, cost: Money) -> Self {
        Self {
            group_id,
            description: description.into(),
            cost,
            date: None,
            currency_code: "USD".to_string(),
            users: Vec::new(),
            details: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_currency(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = currency_code.into();
        self
    }

    pub fn with_user(mut self, share: ParticipantShare) -> Self {
        self.users.push(share);
        self
    }

    pub fn with_details(mut self, details: Map<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn total_paid(&self) -> Money {
        self.users.iter().map(|u| u.paid_share).sum()
    }

    pub fn total_owed(&self) -> Money {
        self.users.iter().map(|u| u.owed_share).sum()
    }

    /// Build the flat JSON object posted to `create_expense`
    ///
    /// # Errors
    ///
    /// Returns a validation error if there are no participants.
    pub fn to_payload(&self) -> SplitrResult<Map<String, Value>> {
        if self.users.is_empty() {
            return Err(SplitrError::Validation(
                "An expense needs at least one participant".into(),
            ));
        }

        let mut payload = Map::new();
        payload.insert("group_id".into(), Value::from(self.group_id));
        payload.insert("description".into(), Value::from(self.description.clone()));
        payload.insert("cost".into(), Value::from(self.cost.to_decimal_string()));
        payload.insert(
            "currency_code".into(),
            Value::from(self.currency_code.clone()),
        );

        if let Some(date) = self.date {
            payload.insert(
                "date".into(),
                Value::from(date.format(API_DATE_FORMAT).to_string()),
            );
        }

        if let Some(details) = &self.details {
            let encoded = serde_json::to_string(details)?;
            payload.insert("details".into(), Value::from(encoded));
        }

        for (i, user) in self.users.iter().enumerate() {
            payload.insert(format!("users__{}__user_id", i), Value::from(user.user_id));
            payload.insert(
                format!("users__{}__owed_share", i),
                Value::from(user.owed_share.to_decimal_string()),
            );
            payload.insert(
                format!("users__{}__paid_share", i),
                Value::from(user.paid_share.to_decimal_string()),
            );
        }

        Ok(payload)
    }
}
