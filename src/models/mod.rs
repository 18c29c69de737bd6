//! Data models for splitr
//!
//! - `money`: cent-precise amounts
//! - `token`: the cached OAuth bearer token
//! - `expense`: outgoing expense requests and their flat payload
//! - `response`: typed response bodies per endpoint

pub mod expense;
pub mod money;
pub mod response;
pub mod token;

pub use expense::{ExpenseRequest, ParticipantShare, API_DATE_FORMAT};
pub use money::{Money, MoneyParseError};
pub use response::{
    ApiErrors, ApiResponse, CreateExpenseResponse, CurrentUserResponse, Expense, ExpenseUser,
    ExpensesResponse, User,
};
pub use token::Token;
