//! Append Log Module
//!
//! A single file holding an append-only sequence of fixed-size records.
//!
//! ## Responsibilities
//! - Create/open the backing file without losing existing records
//! - Append whole records only (a failed append is rolled back)
//! - Full sequential scan from offset 0
//! - Reset: unlink and recreate
//!
//! ## File Format
//! ```text
//! ┌─────────┬─────────┬─────────┬─────┬─────────┐
//! │ u32 LE  │ u32 LE  │ u32 LE  │ ... │ u32 LE  │
//! └─────────┴─────────┴─────────┴─────┴─────────┘
//!  no header, no footer, no checksum
//! ```
//!
//! The only corruption the format can signal is a file length that is not a
//! multiple of [`RECORD_SIZE`](crate::record::RECORD_SIZE).

mod reader;
mod recovery;
mod writer;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::SyncStrategy;
use crate::error::{Result, SeqLogError};
use crate::record::RECORD_SIZE;

pub use reader::LogScan;
pub use recovery::{LogRecovery, RecoveryResult};
pub use writer::{LogFile, LogWriter};

/// An append-only log bound to one file path
///
/// Constructing an `AppendLog` touches nothing on disk; call
/// [`initialize`](Self::initialize) before appending.
pub struct AppendLog {
    /// Backing file
    path: PathBuf,

    /// Sync strategy handed to every writer this log opens
    sync_strategy: SyncStrategy,

    /// Open writer, `None` until `initialize`
    writer: Option<LogWriter>,
}

impl AppendLog {
    /// Create a log handle for `path`
    pub fn new(path: impl Into<PathBuf>, sync_strategy: SyncStrategy) -> Self {
        Self {
            path: path.into(),
            sync_strategy,
            writer: None,
        }
    }

    /// Open the backing file, creating it and its parent directory if absent
    ///
    /// Idempotent: existing records are kept and a second call is a no-op.
    pub fn initialize(&mut self) -> Result<()> {
        if self.writer.is_some() && self.path.exists() {
            return Ok(());
        }

        self.writer = Some(LogWriter::open(&self.path, self.sync_strategy)?);
        Ok(())
    }

    /// Append one record to the end of the log
    pub fn append(&mut self, value: u32) -> Result<()> {
        self.writer_mut()?.append(value)?;
        tracing::debug!(path = %self.path.display(), value, "Appended record");
        Ok(())
    }

    /// Append several records as one all-or-nothing write
    pub fn append_all(&mut self, values: &[u32]) -> Result<()> {
        self.writer_mut()?.append_all(values)?;
        tracing::debug!(path = %self.path.display(), count = values.len(), "Appended records");
        Ok(())
    }

    /// Force pending appends to stable storage
    pub fn sync(&mut self) -> Result<()> {
        self.writer_mut()?.sync()
    }

    /// Start a fresh scan from the first record
    pub fn scan(&self) -> Result<LogScan> {
        LogScan::open(&self.path)
    }

    /// Scan the whole log into memory
    pub fn read_all(&self) -> Result<Vec<u32>> {
        self.scan()?.collect()
    }

    /// Delete the backing file and initialize an empty one
    pub fn reset(&mut self) -> Result<()> {
        // Close the current handle before unlinking
        self.writer = None;

        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        tracing::info!(path = %self.path.display(), "Reset log");
        self.initialize()
    }

    /// Current file length in bytes
    pub fn len_bytes(&self) -> Result<u64> {
        recovery::file_len(&self.path)
    }

    /// Number of complete records in the file
    pub fn record_count(&self) -> Result<u64> {
        Ok(self.len_bytes()? / RECORD_SIZE as u64)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `initialize` has opened the backing file
    pub fn is_initialized(&self) -> bool {
        self.writer.is_some()
    }

    fn writer_mut(&mut self) -> Result<&mut LogWriter> {
        match self.writer.as_mut() {
            Some(writer) => Ok(writer),
            None => Err(SeqLogError::NotInitialized(self.path.clone())),
        }
    }
}
