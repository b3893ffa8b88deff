//! User settings for coa-ledger
//!
//! Manages user preferences: where the ledger lives, how the posting log is
//! named and how amounts and dates are shown.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::{LedgerPaths, DEFAULT_ACCOUNTS_FILE};
use crate::error::{LedgerError, LedgerResult};
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for coa-ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Account source file name inside the data directory
    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,

    /// Inserted between the account source stem and its extension to name
    /// the posting log
    #[serde(default = "default_postings_suffix")]
    pub postings_suffix: String,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Characters of the label shown in report headers
    #[serde(default = "default_label_width")]
    pub label_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_accounts_file() -> String {
    DEFAULT_ACCOUNTS_FILE.to_string()
}

fn default_postings_suffix() -> String {
    "_postings".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_label_width() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            accounts_file: default_accounts_file(),
            postings_suffix: default_postings_suffix(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            label_width: default_label_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> LedgerResult<Self> {
        read_json(paths.settings_file())
            .map_err(|e| LedgerError::Config(format!("Failed to load settings: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> LedgerResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Account source selected by these settings, unless `explicit` overrides it
    pub fn resolve_accounts_file(&self, paths: &LedgerPaths, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => paths.accounts_file_named(&self.accounts_file),
        }
    }
}
