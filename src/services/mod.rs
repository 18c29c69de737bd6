//! Business logic layer for splitr
//!
//! - `split`: the even split between the two configured users
//! - `import`: the CSV driver and the sinks expenses are submitted to

pub mod import;
pub mod split;

pub use import::{DryRunSink, ExpenseRow, ExpenseSink, ImportService, ImportSummary, SubmitOutcome};
pub use split::{build_split, even_shares, parse_expense_date};
