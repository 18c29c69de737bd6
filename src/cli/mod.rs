//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod expenses;
pub mod import;
pub mod user;

pub use config::handle_config_command;
pub use expenses::{handle_expenses_command, ExpenseScopeArgs};
pub use import::{handle_import_command, ImportArgs};
pub use user::handle_whoami_command;

use crate::api::{ReqwestTransport, SplitwiseClient};
use crate::config::{ClientCredentials, Settings, SplitrPaths};
use crate::error::SplitrResult;
use crate::storage::FileTokenStore;

/// Authenticate against Splitwise using the environment and the on-disk cache
pub fn connect(
    paths: &SplitrPaths,
    settings: &Settings,
) -> SplitrResult<SplitwiseClient<ReqwestTransport>> {
    let credentials = ClientCredentials::from_env()?;
    let store = FileTokenStore::new(paths.credentials_file());
    SplitwiseClient::connect(settings, &credentials, &store, ReqwestTransport::new()?)
}
