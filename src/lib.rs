//! splitr - replicate expense exports into Splitwise
//!
//! Reads expense records from a CSV export and creates each one in Splitwise,
//! split evenly between two configured users.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings, and OAuth client credentials
//! - `error`: Custom error types
//! - `models`: Money, tokens, expense requests, and API responses
//! - `storage`: Token cache
//! - `api`: HTTP transport and the Splitwise client
//! - `services`: The even split and the CSV import driver
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use splitr::api::{ReqwestTransport, SplitwiseClient};
//! use splitr::config::{ClientCredentials, Settings, SplitrPaths};
//! use splitr::services::ImportService;
//! use splitr::storage::FileTokenStore;
//!
//! let paths = SplitrPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = FileTokenStore::new(paths.credentials_file());
//! let mut client = SplitwiseClient::connect(
//!     &settings,
//!     &ClientCredentials::from_env()?,
//!     &store,
//!     ReqwestTransport::new()?,
//! )?;
//! ImportService::new(&settings).import_file("expenses.csv".as_ref(), &mut client)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{SplitrError, SplitrResult};
