//! Configuration module for splitr
//!
//! This module provides configuration management including:
//! - Config directory and credential cache path resolution
//! - User settings persistence
//! - OAuth client credentials from the environment

pub mod credentials;
pub mod paths;
pub mod settings;

pub use credentials::ClientCredentials;
pub use paths::SplitrPaths;
pub use settings::Settings;
