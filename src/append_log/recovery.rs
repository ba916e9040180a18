//! Log Recovery
//!
//! Offline inspection and repair of torn tails.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, SeqLogError};
use crate::record::RECORD_SIZE;

/// Inspects and repairs log files
pub struct LogRecovery;

/// Result of a verify or repair operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of complete records
    pub records: u64,

    /// Length of the file up to the last record boundary
    pub valid_len: u64,

    /// Bytes past the last record boundary (torn record)
    pub trailing_bytes: usize,

    /// Whether the file was truncated back to `valid_len`
    pub was_truncated: bool,
}

impl RecoveryResult {
    /// True when the file ends on a record boundary
    pub fn is_clean(&self) -> bool {
        self.trailing_bytes == 0
    }
}

impl LogRecovery {
    /// Check a log file without modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        let len = file_len(path)?;
        let trailing = (len % RECORD_SIZE as u64) as usize;
        let valid_len = len - trailing as u64;

        Ok(RecoveryResult {
            records: valid_len / RECORD_SIZE as u64,
            valid_len,
            trailing_bytes: trailing,
            was_truncated: false,
        })
    }

    /// Truncate a torn tail back to the last record boundary
    ///
    /// Complete records are never touched. A clean file is left as is.
    pub fn repair(path: &Path) -> Result<RecoveryResult> {
        let mut result = Self::verify(path)?;
        if result.is_clean() {
            return Ok(result);
        }

        let file = OpenOptions::new().write(true).open(path)?;
        file.set_len(result.valid_len)?;
        file.sync_all()?;

        tracing::warn!(
            path = %path.display(),
            trailing = result.trailing_bytes,
            valid_len = result.valid_len,
            "Truncated torn record"
        );

        result.was_truncated = true;
        Ok(result)
    }
}

pub(super) fn file_len(path: &Path) -> Result<u64> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(SeqLogError::NotInitialized(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}
