//! Path management for splitr
//!
//! ## Path Resolution Order
//!
//! Config directory:
//! 1. `SPLITR_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/splitr` or `~/.config/splitr`
//! 3. Windows: `%APPDATA%\splitr`
//!
//! The credential cache always lives directly in the home directory as
//! `~/.splitwise-credentials`.

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::SplitrError;

const CREDENTIALS_FILE_NAME: &str = ".splitwise-credentials";

/// Manages all paths used by splitr
#[derive(Debug, Clone)]
pub struct SplitrPaths {
    config_dir: PathBuf,
    home_dir: PathBuf,
}

impl SplitrPaths {
    /// Create a new SplitrPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SplitrError> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| SplitrError::Config("Could not determine home directory".into()))?;
        let home_dir = base_dirs.home_dir().to_path_buf();

        let config_dir = if let Ok(custom) = std::env::var("SPLITR_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_config_dir(&base_dirs)
        };

        Ok(Self {
            config_dir,
            home_dir,
        })
    }

    /// Create SplitrPaths rooted at custom directories (useful for testing)
    pub fn with_dirs(config_dir: PathBuf, home_dir: PathBuf) -> Self {
        Self {
            config_dir,
            home_dir,
        }
    }

    /// Get the config directory (~/.config/splitr/ or equivalent)
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Get the home directory
    pub fn home_dir(&self) -> &PathBuf {
        &self.home_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Get the path to the cached OAuth token
    pub fn credentials_file(&self) -> PathBuf {
        self.home_dir.join(CREDENTIALS_FILE_NAME)
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), SplitrError> {
        std::fs::create_dir_all(&self.config_dir)
            .map_err(|e| SplitrError::Io(format!("Failed to create config directory: {}", e)))
    }
}

#[cfg(not(windows))]
fn resolve_config_dir(base_dirs: &BaseDirs) -> PathBuf {
    // Prefer XDG_CONFIG_HOME, otherwise ~/.config even on macOS
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| base_dirs.home_dir().join(".config"))
        .join("splitr")
}

#[cfg(windows)]
fn resolve_config_dir(base_dirs: &BaseDirs) -> PathBuf {
    base_dirs.config_dir().join("splitr")
}
