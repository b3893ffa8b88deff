//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> LedgerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| LedgerError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Open a text file for buffered reading; `None` if it doesn't exist
pub fn open_text<P: AsRef<Path>>(path: P) -> LedgerResult<Option<BufReader<File>>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    Ok(Some(BufReader::new(file)))
}

/// Temp file next to `path`, so the final rename stays on one filesystem
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A fully written and synced temp file waiting to replace its target.
/// Dropping it without [`StagedFile::commit`] removes the temp file.
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Rename the temp file over the target
    pub fn commit(mut self) -> LedgerResult<()> {
        fs::rename(&self.temp_path, &self.target).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to replace {}: {}",
                self.target.display(),
                e
            ))
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Write the new contents of `path` to a temp file without touching `path`
///
/// `fill` receives a buffered writer for the temp file. Fails up front when
/// `path` is a directory, so a later commit only has to rename.
pub fn stage_atomic<P, F>(path: P, fill: F) -> LedgerResult<StagedFile>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> LedgerResult<()>,
{
    let path = path.as_ref();

    if path.is_dir() {
        return Err(LedgerError::Storage(format!(
            "Cannot write {}: it is a directory",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let staged = StagedFile {
        temp_path,
        target: path.to_path_buf(),
        committed: false,
    };

    let mut writer = BufWriter::new(file);
    fill(&mut writer)?;

    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    Ok(staged)
}

/// Write a file atomically (write to temp, then rename)
///
/// The target is either completely replaced or not modified at all.
pub fn write_atomic<P, F>(path: P, fill: F) -> LedgerResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> LedgerResult<()>,
{
    stage_atomic(path, fill)?.commit()
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> LedgerResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| LedgerError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Write a text file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> LedgerResult<()> {
    write_atomic(path, |writer| {
        writer.write_all(contents.as_bytes())?;
        Ok(())
    })
}
