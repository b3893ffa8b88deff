//! Path management for coa-ledger
//!
//! Provides XDG-compliant path resolution for configuration, ledger data and
//! generated reports.
//!
//! ## Path Resolution Order
//!
//! 1. `COA_LEDGER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/coa-ledger` or `~/.config/coa-ledger`
//! 3. Windows: `%APPDATA%\coa-ledger`

use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "COA_LEDGER_DATA_DIR";

/// Account source file name used when settings do not name one
pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.txt";

/// Manages all paths used by coa-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all coa-ledger data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application-data directory can be
    /// determined.
    pub fn new() -> LedgerResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/coa-ledger/ or equivalent)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the data directory (~/.config/coa-ledger/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the report directory (~/.config/coa-ledger/reports/)
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the default account source
    pub fn accounts_file(&self) -> PathBuf {
        self.accounts_file_named(DEFAULT_ACCOUNTS_FILE)
    }

    /// Account source with a custom file name inside the data directory
    pub fn accounts_file_named(&self, name: &str) -> PathBuf {
        self.data_dir().join(name)
    }

    /// Default location of the report for one account
    pub fn report_file(&self, account: impl std::fmt::Display) -> PathBuf {
        self.reports_dir().join(format!("{}_report.txt", account))
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/coa-ledger/)
    /// - Data directory (~/.config/coa-ledger/data/)
    /// - Report directory (~/.config/coa-ledger/reports/)
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.reports_dir())
            .map_err(|e| LedgerError::Io(format!("Failed to create reports directory: {}", e)))?;

        Ok(())
    }

    /// Check if coa-ledger has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> LedgerResult<PathBuf> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                LedgerError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("coa-ledger"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> LedgerResult<PathBuf> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| LedgerError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("coa-ledger"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.reports_dir(), temp_dir.path().join("reports"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = LedgerPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.reports_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.accounts_file(),
            temp_dir.path().join("data").join("accounts.txt")
        );
        assert_eq!(
            paths.report_file(1100),
            temp_dir.path().join("reports").join("1100_report.txt")
        );
    }
}
