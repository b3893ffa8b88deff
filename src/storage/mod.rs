//! Storage layer for coa-ledger
//!
//! A ledger is two plain-text files: the account source and, next to it, the
//! posting log. Both are rewritten whole on every save, through a temp file
//! that is renamed into place.

pub mod file_io;
pub mod text;

pub use file_io::{
    read_json, stage_atomic, write_atomic, write_json_atomic, write_text_atomic, StagedFile,
};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::forest::{AccountForest, LoadSummary};

/// Posting log path for an account source: `accounts.txt` becomes
/// `accounts<suffix>.txt`
pub fn postings_path_for(accounts_path: &Path, suffix: &str) -> PathBuf {
    let stem = accounts_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match accounts_path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    accounts_path.with_file_name(name)
}

/// What a full load read from disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub accounts: LoadSummary,
    pub postings: LoadSummary,
}

/// The account source and posting log of one ledger
#[derive(Debug, Clone)]
pub struct LedgerStore {
    accounts_path: PathBuf,
    postings_path: PathBuf,
}

impl LedgerStore {
    /// Store for an account source, deriving the posting log name from `postings_suffix`
    pub fn new(accounts_path: impl Into<PathBuf>, postings_suffix: &str) -> Self {
        let accounts_path = accounts_path.into();
        let postings_path = postings_path_for(&accounts_path, postings_suffix);
        Self {
            accounts_path,
            postings_path,
        }
    }

    /// Store selected by settings, unless `explicit` names an account source
    pub fn from_settings(paths: &LedgerPaths, settings: &Settings, explicit: Option<&Path>) -> Self {
        Self::new(
            settings.resolve_accounts_file(paths, explicit),
            &settings.postings_suffix,
        )
    }

    pub fn accounts_path(&self) -> &Path {
        &self.accounts_path
    }

    pub fn postings_path(&self) -> &Path {
        &self.postings_path
    }

    /// Replace the forest's contents with what is on disk. Missing files
    /// read as empty.
    pub fn load(&self, forest: &mut AccountForest) -> LedgerResult<LoadReport> {
        forest.reset();
        let mut report = LoadReport::default();

        if let Some(reader) = file_io::open_text(&self.accounts_path)? {
            report.accounts = forest.load_from_source(reader)?;
        }
        if let Some(reader) = file_io::open_text(&self.postings_path)? {
            report.postings = forest.load_postings(reader)?;
        }

        debug!(
            path = %self.accounts_path.display(),
            accounts = report.accounts.loaded,
            postings = report.postings.loaded,
            "ledger loaded"
        );
        Ok(report)
    }

    /// Rewrite both files from the forest. Both are fully written to temp
    /// files before either one replaces its target.
    pub fn save(&self, forest: &AccountForest) -> LedgerResult<()> {
        let accounts = stage_atomic(&self.accounts_path, |writer| forest.save_to_source(writer))?;
        let postings = stage_atomic(&self.postings_path, |writer| forest.save_postings(writer))?;
        accounts.commit()?;
        postings.commit()?;
        debug!(path = %self.accounts_path.display(), accounts = forest.len(), "ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{FixedClock, SequentialIds};
    use crate::models::{AccountNumber, AccountRecord, Direction, Money};
    use tempfile::TempDir;

    fn forest() -> AccountForest {
        AccountForest::with_sources(
            Box::new(FixedClock::on(2024, 11, 20).unwrap()),
            Box::new(SequentialIds::default()),
        )
    }

    #[test]
    fn test_postings_path_for() {
        assert_eq!(
            postings_path_for(Path::new("/tmp/accounts.txt"), "_postings"),
            PathBuf::from("/tmp/accounts_postings.txt")
        );
        assert_eq!(
            postings_path_for(Path::new("chart"), "-log"),
            PathBuf::from("chart-log")
        );
    }

    #[test]
    fn test_missing_files_load_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("accounts.txt"), "_postings");

        let mut f = forest();
        let report = store.load(&mut f).unwrap();
        assert!(f.is_empty());
        assert_eq!(report, LoadReport::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("accounts.txt"), "_postings");

        let mut f = forest();
        f.add_account(AccountRecord::new(1000u64, "Assets", Money::zero()), None)
            .unwrap();
        f.add_account(
            AccountRecord::new(1100u64, "Cash", Money::zero()),
            Some(AccountNumber::new(1000)),
        )
        .unwrap();
        f.post_transaction(1100u64, Money::from_cents(5000), Direction::Debit)
            .unwrap();
        store.save(&f).unwrap();

        assert_eq!(
            std::fs::read_to_string(store.accounts_path()).unwrap(),
            "1000 Assets 50.00\n1100 Cash 50.00\n"
        );
        assert_eq!(
            std::fs::read_to_string(store.postings_path()).unwrap(),
            "1100|P0001|50.00|D|2024-11-20|\n"
        );

        let mut reloaded = forest();
        let report = store.load(&mut reloaded).unwrap();
        assert_eq!(report.accounts.loaded, 2);
        assert_eq!(report.postings.loaded, 1);
        assert_eq!(reloaded.account(1000u64).unwrap().balance.cents(), 5000);
    }

    #[test]
    fn test_failed_posting_log_write_keeps_account_source() {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("accounts.txt"), "_postings");

        let mut f = forest();
        f.add_account(AccountRecord::new(1u64, "A", Money::zero()), None)
            .unwrap();
        store.save(&f).unwrap();

        std::fs::remove_file(store.postings_path()).unwrap();
        std::fs::create_dir(store.postings_path()).unwrap();
        std::fs::write(store.postings_path().join("keep"), "x").unwrap();

        f.post_transaction(1u64, Money::from_cents(500), Direction::Debit)
            .unwrap();
        assert!(store.save(&f).is_err());

        assert_eq!(
            std::fs::read_to_string(store.accounts_path()).unwrap(),
            "1 A 0.00\n"
        );
        assert!(!temp_dir.path().join("accounts.txt.tmp").exists());
    }

    #[test]
    fn test_load_replaces_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("accounts.txt");
        std::fs::write(&path, "2000 Liabilities 0.00\n").unwrap();
        let store = LedgerStore::new(&path, "_postings");

        let mut f = forest();
        f.add_account(AccountRecord::new(1u64, "Old", Money::zero()), None)
            .unwrap();
        store.load(&mut f).unwrap();

        assert!(f.account(1u64).is_none());
        assert!(f.account(2000u64).is_some());
    }
}
