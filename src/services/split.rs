//! 50/50 split between the two configured users
//!
//! The primary user pays the whole amount and owes `amount - amount/2`; the
//! secondary user pays nothing and owes `amount/2`. Halving is done in whole
//! cents, so the owed shares always sum to the cost.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::Settings;
use crate::error::{SplitrError, SplitrResult};
use crate::models::{ExpenseRequest, Money, ParticipantShare};

/// Parse a CSV date with the configured format, as midnight on that day
pub fn parse_expense_date(s: &str, format: &str) -> SplitrResult<NaiveDateTime> {
    NaiveDate::parse_from_str(s.trim(), format)
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| {
            SplitrError::Import(format!(
                "Could not parse date '{}' with format '{}': {}",
                s, format, e
            ))
        })
}

/// The two participant shares for an even split of `amount`
pub fn even_shares(settings: &Settings, amount: Money) -> [ParticipantShare; 2] {
    let secondary_owed = amount.half();
    let primary_owed = amount - secondary_owed;

    [
        ParticipantShare::new(settings.primary_user_id, primary_owed, amount),
        ParticipantShare::new(settings.secondary_user_id, secondary_owed, Money::zero()),
    ]
}

/// Build the expense request for one row
pub fn build_split(
    settings: &Settings,
    date: &str,
    description: &str,
    amount: Money,
) -> SplitrResult<ExpenseRequest> {
    let date = parse_expense_date(date, &settings.date_format)?;
    let [primary, secondary] = even_shares(settings, amount);

    Ok(ExpenseRequest::new(settings.group_id, description, amount)
        .with_date(date)
        .with_currency(settings.currency_code.clone())
        .with_user(primary)
        .with_user(secondary))
}
