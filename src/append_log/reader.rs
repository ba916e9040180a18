//! Log Reader
//!
//! Sequential, lazy decoding of the log file from offset 0.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use crate::error::{Result, SeqLogError};
use crate::record::{self, RECORD_SIZE};

/// Lazy scan over every record in a log file
///
/// Each scan opens its own file handle, so a new scan always starts from the
/// beginning. A trailing fragment shorter than a record is reported as
/// `TruncatedRecord` and ends the scan.
pub struct LogScan {
    reader: BufReader<File>,

    /// Byte offset of the next record
    offset: u64,

    /// Set after EOF or the first error
    finished: bool,
}

impl LogScan {
    /// Open a log file for scanning
    pub fn open(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SeqLogError::NotInitialized(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            reader: BufReader::new(file),
            offset: 0,
            finished: false,
        })
    }

    /// Read the next record, `None` at a clean end-of-file
    pub fn next_record(&mut self) -> Result<Option<u32>> {
        let mut buf = [0u8; RECORD_SIZE];
        let filled = self.fill(&mut buf)?;

        match filled {
            0 => Ok(None),
            RECORD_SIZE => {
                self.offset += RECORD_SIZE as u64;
                record::decode(&buf).map(Some)
            }
            trailing => Err(SeqLogError::TruncatedRecord {
                offset: self.offset,
                trailing,
            }),
        }
    }

    /// Byte offset of the next record to be read
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read until `buf` is full or EOF, returning the number of bytes read
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl Iterator for LogScan {
    type Item = Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_record() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
