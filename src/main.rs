use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use splitr::cli::{
    handle_config_command, handle_expenses_command, handle_import_command,
    handle_whoami_command, ExpenseScopeArgs, ImportArgs,
};
use splitr::config::{paths::SplitrPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "splitr",
    version,
    about = "Replicate CSV expense exports into Splitwise as 50/50 splits",
    long_about = "splitr reads an expense export (Date, Name, Custom Name, Amount) \
                  and creates each row in Splitwise, paid by the primary user and \
                  split evenly with the secondary user.",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// CSV file to import
    #[arg(required = true)]
    filename: Option<PathBuf>,

    /// Print the planned expenses without contacting Splitwise
    #[arg(long)]
    dry_run: bool,

    /// Format of the Date column (strftime), e.g. "%m/%d/%Y"
    #[arg(long, value_name = "FORMAT")]
    date_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a CSV export (same as passing the file directly)
    Import(ImportArgs),

    /// Show the authenticated Splitwise user
    Whoami,

    /// List expenses for a group or a friend
    Expenses(ExpenseScopeArgs),

    /// Show current configuration and paths
    Config {
        /// Write the default settings file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                buf.timestamp(),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();
    // A missing .env file is fine; the variables may already be exported
    dotenvy::dotenv().ok();

    let paths = SplitrPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Import(args)) => handle_import_command(&paths, &settings, &args)?,
        Some(Commands::Whoami) => handle_whoami_command(&paths, &settings)?,
        Some(Commands::Expenses(args)) => handle_expenses_command(&paths, &settings, &args)?,
        Some(Commands::Config { init }) => handle_config_command(&paths, &settings, init)?,
        None => {
            // clap guarantees the filename when no subcommand is given
            if let Some(filename) = cli.filename {
                let args = ImportArgs {
                    filename,
                    dry_run: cli.dry_run,
                    date_format: cli.date_format,
                };
                handle_import_command(&paths, &settings, &args)?;
            }
        }
    }

    Ok(())
}
