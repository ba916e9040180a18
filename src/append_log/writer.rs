//! Log Writer
//!
//! Handles appending records to the log file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::BytesMut;

use crate::config::SyncStrategy;
use crate::error::{Result, SeqLogError};
use crate::record::{self, RECORD_SIZE};

/// File operations the writer relies on
///
/// Implemented for [`File`]; the writer only ever appends, truncates back to a
/// known length, and syncs.
pub trait LogFile: Write {
    /// Current length in bytes
    fn byte_len(&self) -> io::Result<u64>;

    /// Truncate to `len` bytes
    fn set_len(&self, len: u64) -> io::Result<()>;

    /// Flush file data to stable storage
    fn sync_data(&self) -> io::Result<()>;
}

impl LogFile for File {
    fn byte_len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn set_len(&self, len: u64) -> io::Result<()> {
        File::set_len(self, len)
    }

    fn sync_data(&self) -> io::Result<()> {
        File::sync_data(self)
    }
}

/// Appends records to the log file
///
/// Every append is all-or-nothing with respect to record boundaries: if the
/// write or its sync fails, the file is cut back to the length it had before
/// the call.
pub struct LogWriter<F: LogFile = File> {
    /// Path of the log file (for error reporting and logging)
    path: PathBuf,

    /// File handle opened in append mode
    file: F,

    /// When to fsync
    sync_strategy: SyncStrategy,

    /// Records appended since the last sync
    uncommitted: usize,
}

impl LogWriter {
    /// Open or create a log file
    ///
    /// Creates missing parent directories. Existing content is never truncated.
    pub fn open(path: &Path, sync_strategy: SyncStrategy) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let created = !path.exists();
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(path)?;

        if created {
            // Make the new directory entry durable, not just the inode
            file.sync_all()?;
            sync_parent_dir(path)?;
            tracing::info!(path = %path.display(), "Created log file");
        } else {
            tracing::debug!(
                path = %path.display(),
                len = file.metadata()?.len(),
                "Opened existing log file"
            );
        }

        Ok(Self::from_file(path, file, sync_strategy))
    }
}

impl<F: LogFile> LogWriter<F> {
    fn from_file(path: &Path, file: F, sync_strategy: SyncStrategy) -> Self {
        Self {
            path: path.to_path_buf(),
            file,
            sync_strategy,
            uncommitted: 0,
        }
    }

    /// Append a single record
    pub fn append(&mut self, value: u32) -> Result<()> {
        self.write_records(&record::encode(value), 1)
    }

    /// Append several records with a single write
    pub fn append_all(&mut self, values: &[u32]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let mut buf = BytesMut::with_capacity(values.len() * RECORD_SIZE);
        for &value in values {
            record::encode_into(&mut buf, value);
        }

        self.write_records(&buf, values.len())
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_data().map_err(SeqLogError::WriteFailed)?;
        self.uncommitted = 0;
        Ok(())
    }

    /// Current length of the file in bytes
    pub fn len_bytes(&self) -> Result<u64> {
        Ok(self.file.byte_len()?)
    }

    /// Number of appended records not yet synced
    pub fn uncommitted_count(&self) -> usize {
        self.uncommitted
    }

    fn write_records(&mut self, bytes: &[u8], count: usize) -> Result<()> {
        let start_len = self.file.byte_len().map_err(SeqLogError::WriteFailed)?;

        // Appending after a torn tail would misalign every later record
        let trailing = (start_len % RECORD_SIZE as u64) as usize;
        if trailing != 0 {
            return Err(SeqLogError::TruncatedRecord {
                offset: start_len - trailing as u64,
                trailing,
            });
        }

        if let Err(e) = self.file.write_all(bytes) {
            self.rollback(start_len);
            return Err(SeqLogError::WriteFailed(e));
        }

        self.uncommitted += count;
        let should_sync = match self.sync_strategy {
            SyncStrategy::EveryWrite => true,
            SyncStrategy::EveryNEntries { count: threshold } => self.uncommitted >= threshold,
        };

        if should_sync {
            if let Err(e) = self.sync() {
                self.uncommitted = self.uncommitted.saturating_sub(count);
                self.rollback(start_len);
                return Err(e);
            }
        }

        tracing::trace!(
            path = %self.path.display(),
            records = count,
            offset = start_len,
            "Appended records"
        );

        Ok(())
    }

    /// Cut the file back to `len` after a failed append
    fn rollback(&mut self, len: u64) {
        match self.file.set_len(len) {
            Ok(()) => tracing::warn!(
                path = %self.path.display(),
                len,
                "Append failed, rolled log back to last record boundary"
            ),
            Err(e) => tracing::error!(
                path = %self.path.display(),
                len,
                error = %e,
                "Append failed and rollback failed"
            ),
        }
    }
}

impl<F: LogFile> Drop for LogWriter<F> {
    fn drop(&mut self) {
        if self.uncommitted > 0 {
            if let Err(e) = self.file.sync_data() {
                tracing::warn!(path = %self.path.display(), error = %e, "Final sync failed");
            }
        }
    }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}
