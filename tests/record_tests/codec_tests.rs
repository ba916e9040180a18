//! Tests for the record codec
//!
//! These tests verify:
//! - Round-trip for boundary values
//! - Little-endian byte layout
//! - Rejection of wrongly sized input

use bytes::BytesMut;
use seqlog::record::{decode, encode, encode_into, RECORD_SIZE};
use seqlog::SeqLogError;

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_round_trip_boundary_values() {
    for value in [0, 1, 255, 256, 65_535, 65_536, 2_971_215_073, u32::MAX - 1, u32::MAX] {
        let bytes = encode(value);
        assert_eq!(decode(&bytes).unwrap(), value, "round trip failed for {}", value);
    }
}

#[test]
fn test_round_trip_strided_range() {
    // Coarse sweep over the full u32 range
    let mut value: u64 = 0;
    while value <= u32::MAX as u64 {
        let v = value as u32;
        assert_eq!(decode(&encode(v)).unwrap(), v);
        value += 7_919 * 104_729;
    }
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_encode_is_little_endian() {
    assert_eq!(encode(1), [0x01, 0x00, 0x00, 0x00]);
    assert_eq!(encode(0x0403_0201), [0x01, 0x02, 0x03, 0x04]);
    assert_eq!(encode(u32::MAX), [0xFF; 4]);
}

#[test]
fn test_encode_into_appends_records() {
    let mut buf = BytesMut::new();
    encode_into(&mut buf, 1);
    encode_into(&mut buf, 0x0403_0201);

    assert_eq!(buf.len(), 2 * RECORD_SIZE);
    assert_eq!(&buf[..RECORD_SIZE], &encode(1));
    assert_eq!(&buf[RECORD_SIZE..], &encode(0x0403_0201));
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_decode_rejects_short_buffer() {
    let err = decode(&[0x01, 0x02, 0x03]).unwrap_err();
    assert!(matches!(
        err,
        SeqLogError::MalformedRecord { expected: 4, actual: 3 }
    ));
}

#[test]
fn test_decode_rejects_long_buffer() {
    let err = decode(&[0u8; 5]).unwrap_err();
    assert!(matches!(
        err,
        SeqLogError::MalformedRecord { expected: 4, actual: 5 }
    ));
}

#[test]
fn test_decode_rejects_empty_buffer() {
    let err = decode(&[]).unwrap_err();
    assert!(matches!(
        err,
        SeqLogError::MalformedRecord { expected: 4, actual: 0 }
    ));
}
