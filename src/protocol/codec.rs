//! Line codec
//!
//! Stream helpers for the text form of the command protocol: one command per
//! line in, one reply per line out.
//!
//! ```text
//! > init ./data/seq.log      < OK
//! > step                     < OK 1
//! > getData                  < [0, 1, 1]
//! > bogus                    < ERR Protocol error: unknown command: bogus
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::io::{BufRead, Write};

use crate::error::{Result, SeqLogError};
use super::{Command, Response};

/// Read the next command from a stream
///
/// Returns `Ok(None)` at end of input. A line that fails to parse is returned
/// as an error, as is a line that is not valid UTF-8; the stream stays usable
/// for the next call.
pub fn read_command<R: BufRead>(reader: &mut R) -> Result<Option<Command>> {
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let line = std::str::from_utf8(&raw)
            .map_err(|_| SeqLogError::Protocol("command line is not valid UTF-8".to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        return trimmed.parse().map(Some);
    }
}

/// Write the reply to one command
pub fn write_response<W: Write>(writer: &mut W, result: &Result<Response>) -> Result<()> {
    match result {
        Ok(response) => writeln!(writer, "{}", response)?,
        Err(e) => writeln!(writer, "ERR {}", e)?,
    }
    writer.flush()?;
    Ok(())
}
