//! Record codec
//!
//! Every record is a `u32` stored as exactly [`RECORD_SIZE`] bytes in
//! **little-endian** order. Tools reading the log file directly must use the
//! same byte order.
//!
//! ```text
//! offset:  0        4        8        12
//!          ┌────────┬────────┬────────┬─────
//!          │ rec 0  │ rec 1  │ rec 2  │ ...
//!          │ u32 LE │ u32 LE │ u32 LE │
//!          └────────┴────────┴────────┴─────
//! ```

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, SeqLogError};

/// Size of one encoded record in bytes
pub const RECORD_SIZE: usize = 4;

/// Encode a value into its on-disk form
pub fn encode(value: u32) -> [u8; RECORD_SIZE] {
    value.to_le_bytes()
}

/// Append the encoded form of `value` to `buf`
pub fn encode_into(buf: &mut BytesMut, value: u32) {
    buf.put_u32_le(value);
}

/// Decode exactly one record
///
/// Fails with `MalformedRecord` unless `bytes` is exactly [`RECORD_SIZE`] long.
pub fn decode(bytes: &[u8]) -> Result<u32> {
    if bytes.len() != RECORD_SIZE {
        return Err(SeqLogError::MalformedRecord {
            expected: RECORD_SIZE,
            actual: bytes.len(),
        });
    }

    let mut buf = bytes;
    Ok(buf.get_u32_le())
}
