//! CLI command handler for CSV import
//!
//! Splits every row of an expense export and creates it in Splitwise, or
//! prints the plan with `--dry-run`.

use std::path::{Path, PathBuf};

use clap::Args;

use super::connect;
use crate::config::{Settings, SplitrPaths};
use crate::error::{SplitrError, SplitrResult};
use crate::services::{DryRunSink, ImportService, ImportSummary};

/// Arguments for an import run
#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// CSV file with Date, Name, Custom Name and Amount columns
    pub filename: PathBuf,
    /// Print the planned expenses without contacting Splitwise
    #[arg(long)]
    pub dry_run: bool,
    /// Format of the Date column (strftime), e.g. "%m/%d/%Y"
    #[arg(long, value_name = "FORMAT")]
    pub date_format: Option<String>,
}

/// Handle the import command
pub fn handle_import_command(
    paths: &SplitrPaths,
    settings: &Settings,
    args: &ImportArgs,
) -> SplitrResult<()> {
    let path = args.filename.as_path();
    if !path.exists() {
        return Err(SplitrError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let settings = match &args.date_format {
        Some(format) => Settings {
            date_format: format.clone(),
            ..settings.clone()
        },
        None => settings.clone(),
    };
    let service = ImportService::new(&settings);

    if args.dry_run {
        let summary = {
            let mut sink = DryRunSink::new(std::io::stdout().lock());
            service.import_file(path, &mut sink)?
        };
        println!();
        println!("Dry run: {} expense(s) planned, nothing sent.", summary.planned);
        return Ok(());
    }

    let mut client = connect(paths, &settings)?;
    let summary = service.import_file(path, &mut client)?;
    print_summary(path, &summary);

    Ok(())
}

fn print_summary(path: &Path, summary: &ImportSummary) {
    println!("Import of '{}' complete", path.display());
    println!("{}", "=".repeat(40));
    println!("  Rows read:   {}", summary.rows);
    println!("  Created:     {}", summary.created);
    if !summary.rejected.is_empty() {
        println!("  Rejected:    {}", summary.rejected.len());
        for (line, messages) in &summary.rejected {
            println!("    Line {}: {}", line, messages.join("; "));
        }
    }
}
