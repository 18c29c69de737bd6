//! CSV import service
//!
//! Reads an expense export row by row and submits each row as an even split,
//! strictly in file order. The first malformed row or transport failure stops
//! the run; rows before it have already been submitted.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{error, info};
use serde::Deserialize;

use super::split::build_split;
use crate::api::{SplitwiseClient, Transport};
use crate::config::Settings;
use crate::error::{SplitrError, SplitrResult};
use crate::models::{ApiResponse, ExpenseRequest, Money, API_DATE_FORMAT};

/// One row of the expense export
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Custom Name", default)]
    pub custom_name: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl ExpenseRow {
    /// `Custom Name` when it has content, otherwise `Name`
    pub fn description(&self) -> &str {
        match self.custom_name.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => custom,
            _ => self.name.trim(),
        }
    }
}

/// What happened to a submitted expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Splitwise created the expense
    Created { id: Option<u64> },
    /// Splitwise answered but refused the expense
    Rejected(Vec<String>),
    /// Nothing was sent (dry run)
    Planned,
}

/// Destination for split expenses
pub trait ExpenseSink {
    fn submit(&mut self, request: &ExpenseRequest) -> SplitrResult<SubmitOutcome>;
}

impl<T: Transport> ExpenseSink for SplitwiseClient<T> {
    fn submit(&mut self, request: &ExpenseRequest) -> SplitrResult<SubmitOutcome> {
        let response = self.create_expense(request)?;
        let messages = response.error_messages();
        if messages.is_empty() {
            Ok(SubmitOutcome::Created {
                id: response.expenses.first().map(|e| e.id),
            })
        } else {
            Ok(SubmitOutcome::Rejected(messages))
        }
    }
}

/// Sink that prints each planned split instead of sending it
pub struct DryRunSink<W: Write> {
    out: W,
}

impl<W: Write> DryRunSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ExpenseSink for DryRunSink<W> {
    fn submit(&mut self, request: &ExpenseRequest) -> SplitrResult<SubmitOutcome> {
        let date = request
            .date
            .map(|d| d.format(API_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());
        let shares = request
            .users
            .iter()
            .map(|u| {
                format!(
                    "user {} paid {} owes {}",
                    u.user_id,
                    u.paid_share.to_decimal_string(),
                    u.owed_share.to_decimal_string()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            self.out,
            "{}  {}  {} {}  [{}]",
            date,
            request.description,
            request.cost.to_decimal_string(),
            request.currency_code,
            shares
        )?;
        Ok(SubmitOutcome::Planned)
    }
}

/// Totals for a completed import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows read from the file
    pub rows: usize,
    /// Expenses Splitwise created
    pub created: usize,
    /// Expenses printed but not sent
    pub planned: usize,
    /// Rejected expenses by CSV line number, with the server's messages
    pub rejected: Vec<(usize, Vec<String>)>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    settings: &'a Settings,
}

impl<'a> ImportService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Split one expense evenly and hand it to `sink`
    pub fn split_expense(
        &self,
        sink: &mut dyn ExpenseSink,
        date: &str,
        description: &str,
        amount: Money,
    ) -> SplitrResult<SubmitOutcome> {
        let request = build_split(self.settings, date, description, amount)?;
        sink.submit(&request)
    }

    /// Import every row of the CSV file at `path`
    pub fn import_file(
        &self,
        path: &Path,
        sink: &mut dyn ExpenseSink,
    ) -> SplitrResult<ImportSummary> {
        let file = File::open(path).map_err(|e| {
            SplitrError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file, sink)
    }

    /// Import every row from a CSV reader, in order
    pub fn import_reader<R: Read>(
        &self,
        reader: R,
        sink: &mut dyn ExpenseSink,
    ) -> SplitrResult<ImportSummary> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut summary = ImportSummary::default();

        for (idx, result) in reader.deserialize::<ExpenseRow>().enumerate() {
            // Line 1 is the header
            let line = idx + 2;
            let row = result
                .map_err(|e| SplitrError::Import(format!("Line {}: {}", line, e)))?;
            summary.rows += 1;

            let amount = Money::parse(&row.amount)
                .map_err(|e| SplitrError::Import(format!("Line {}: {}", line, e)))?;
            let description = row.description();

            let outcome = self
                .split_expense(sink, &row.date, description, amount)
                .map_err(|e| match e {
                    SplitrError::Import(msg) => {
                        SplitrError::Import(format!("Line {}: {}", line, msg))
                    }
                    other => other,
                })?;

            match outcome {
                SubmitOutcome::Created { id } => {
                    info!(
                        "Created expense '{}' for {} (id {})",
                        description,
                        amount,
                        id.map(|id| id.to_string()).unwrap_or_else(|| "unknown".into())
                    );
                    summary.created += 1;
                }
                SubmitOutcome::Rejected(messages) => {
                    error!(
                        "Splitwise rejected '{}' on line {}: {}",
                        description,
                        line,
                        messages.join("; ")
                    );
                    summary.rejected.push((line, messages));
                }
                SubmitOutcome::Planned => summary.planned += 1,
            }
        }

        Ok(summary)
    }
}
