//! User settings for splitr
//!
//! Holds everything that used to be a hardcoded constant: API endpoints, the
//! target group, the two users an expense is split between, and the CSV date
//! format. Built once at startup and passed by reference.

use serde::{Deserialize, Serialize};

use super::paths::SplitrPaths;
use crate::error::SplitrError;
use crate::storage::write_json_atomic;

pub const DEFAULT_BASE_URL: &str = "https://secure.splitwise.com/api/v3.0/";
pub const DEFAULT_TOKEN_URL: &str = "https://secure.splitwise.com/oauth/token";

/// User settings for splitr
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the Splitwise REST API (with trailing slash)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth2 token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Group every imported expense is filed under (0 = no group)
    #[serde(default)]
    pub group_id: u64,

    /// User who paid for every imported expense
    #[serde(default = "default_primary_user_id")]
    pub primary_user_id: u64,

    /// User who owes half of every imported expense
    #[serde(default = "default_secondary_user_id")]
    pub secondary_user_id: u64,

    /// ISO 4217 currency code sent with every expense
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Format of the CSV `Date` column (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_primary_user_id() -> u64 {
    13065056
}

fn default_secondary_user_id() -> u64 {
    13065035
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_url: default_base_url(),
            token_url: default_token_url(),
            group_id: 0,
            primary_user_id: default_primary_user_id(),
            secondary_user_id: default_secondary_user_id(),
            currency_code: default_currency_code(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SplitrPaths) -> Result<Self, SplitrError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SplitrError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SplitrError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SplitrPaths) -> Result<(), SplitrError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
    }

    /// Reject settings that would produce a degenerate split
    pub fn validate(&self) -> Result<(), SplitrError> {
        if self.primary_user_id == self.secondary_user_id {
            return Err(SplitrError::Config(format!(
                "primary_user_id and secondary_user_id must differ (both are {})",
                self.primary_user_id
            )));
        }
        if self.currency_code.trim().is_empty() {
            return Err(SplitrError::Config("currency_code must not be empty".into()));
        }
        Ok(())
    }

    /// Build the URL of an API endpoint relative to `base_url`
    pub fn endpoint(&self, name: &str) -> String {
        if self.base_url.ends_with('/') {
            format!("{}{}", self.base_url, name)
        } else {
            format!("{}/{}", self.base_url, name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_paths(temp_dir: &TempDir) -> SplitrPaths {
        SplitrPaths::with_dirs(
            temp_dir.path().join("config"),
            temp_dir.path().to_path_buf(),
        )
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://secure.splitwise.com/api/v3.0/");
        assert_eq!(settings.token_url, "https://secure.splitwise.com/oauth/token");
        assert_eq!(settings.group_id, 0);
        assert_eq!(settings.currency_code, "USD");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);

        let settings = Settings {
            group_id: 12345,
            date_format: "%m/%d/%Y".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.group_id, 12345);
        assert_eq!(loaded.date_format, "%m/%d/%Y");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = temp_paths(&temp_dir);
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"group_id": 7}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.group_id, 7);
        assert_eq!(loaded.primary_user_id, 13065056);
        assert_eq!(loaded.secondary_user_id, 13065035);
    }

    #[test]
    fn test_same_users_rejected() {
        let settings = Settings {
            primary_user_id: 1,
            secondary_user_id: 1,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SplitrError::Config(_))));
    }

    #[test]
    fn test_endpoint_joins_slash() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.endpoint("get_current_user"),
            "https://secure.splitwise.com/api/v3.0/get_current_user"
        );

        settings.base_url = "http://localhost:8080/api".into();
        assert_eq!(
            settings.endpoint("create_expense"),
            "http://localhost:8080/api/create_expense"
        );
    }
}
