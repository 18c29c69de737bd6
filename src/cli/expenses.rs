//! `expenses`: list the expenses of a group or a friend

use clap::Args;

use super::connect;
use crate::api::ExpenseScope;
use crate::config::{Settings, SplitrPaths};
use crate::error::{SplitrError, SplitrResult};
use crate::models::{ApiResponse, Expense};

/// Exactly one of `--group` / `--friend`
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct ExpenseScopeArgs {
    /// Splitwise group ID
    #[arg(long)]
    pub group: Option<u64>,
    /// Splitwise friend (user) ID
    #[arg(long)]
    pub friend: Option<u64>,
}

impl ExpenseScopeArgs {
    pub fn scope(&self) -> SplitrResult<ExpenseScope> {
        match (self.group, self.friend) {
            (Some(group), None) => Ok(ExpenseScope::Group(group)),
            (None, Some(friend)) => Ok(ExpenseScope::Friend(friend)),
            _ => Err(SplitrError::Validation(
                "Specify exactly one of --group or --friend".into(),
            )),
        }
    }
}

pub fn handle_expenses_command(
    paths: &SplitrPaths,
    settings: &Settings,
    args: &ExpenseScopeArgs,
) -> SplitrResult<()> {
    let scope = args.scope()?;
    let client = connect(paths, settings)?;
    let response = client.get_expenses(scope)?;

    let messages = response.error_messages();
    if !messages.is_empty() {
        return Err(SplitrError::Api(format!(
            "request refused: {}",
            messages.join("; ")
        )));
    }

    let live: Vec<&Expense> = response
        .expenses
        .iter()
        .filter(|e| e.deleted_at.is_none())
        .collect();

    if live.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    for expense in live {
        println!("{}", format_expense_line(expense));
    }

    Ok(())
}

fn format_expense_line(expense: &Expense) -> String {
    let date = expense
        .date
        .as_deref()
        .and_then(|d| d.get(..10))
        .unwrap_or("----------");
    format!(
        "{}  {:>10} {:<3}  {}  (id {})",
        date,
        expense.cost,
        expense.currency_code.as_deref().unwrap_or(""),
        expense.description,
        expense.id
    )
}
