//! Fixed-width text record layout.
//!
//! Each record is exactly [`RECORD_SIZE`] bytes:
//!
//! ```text
//! [0, 40)   SHA-1 digest as 40 uppercase hex characters
//! [40]      separator
//! [41, 61)  occurrence count, ASCII decimal, space padded
//! [61, 63)  line terminator
//! ```

use std::ops::Range;

use crate::entry::HashEntry;
use crate::error::FormatError;

/// The length of one text record in bytes.
pub const RECORD_SIZE: usize = 63;

/// Record size of the reserved binary layout (20-byte digest + 8-byte count).
pub const BINARY_RECORD_SIZE: usize = 28;

/// Length of a raw SHA-1 digest.
pub const DIGEST_LEN: usize = 20;

/// Length of the hex-encoded hash field.
pub const HASH_LEN: usize = DIGEST_LEN * 2;

pub const HASH_FIELD: Range<usize> = 0..HASH_LEN;
pub const COUNT_FIELD: Range<usize> = 41..61;

/// Width of the count field.
pub const COUNT_LEN: usize = 20;

pub const SEPARATOR: u8 = b':';
pub const TERMINATOR: &[u8; 2] = b"\r\n";

/// Hex lookup table. The database stores uppercase digits only.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Convert hex ASCII character to nibble value (0-15)
#[inline]
pub fn hex_to_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        b'a'..=b'f' => Some(c - b'a' + 10),
        _ => None,
    }
}

/// Renders a digest as 40 uppercase hex characters.
#[inline]
pub fn encode_hex(digest: &[u8; DIGEST_LEN]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    for (i, byte) in digest.iter().enumerate() {
        out[i * 2] = HEX_CHARS[(byte >> 4) as usize];
        out[i * 2 + 1] = HEX_CHARS[(byte & 0x0f) as usize];
    }
    out
}

/// Parses 40 hex characters (either case) back into a digest.
///
/// Returns `None` if the input is not exactly [`HASH_LEN`] hex characters.
pub fn decode_hex(hex: &[u8]) -> Option<[u8; DIGEST_LEN]> {
    if hex.len() != HASH_LEN {
        return None;
    }

    let mut out = [0u8; DIGEST_LEN];
    for (byte, pair) in out.iter_mut().zip(hex.chunks_exact(2)) {
        *byte = (hex_to_nibble(pair[0])? << 4) | hex_to_nibble(pair[1])?;
    }
    Some(out)
}

/// Parses a count field: surrounding whitespace is trimmed, the rest must be
/// ASCII digits only (no sign) and fit in an `i64`.
pub fn parse_count(field: &[u8]) -> Result<i64, FormatError> {
    let invalid = || FormatError::InvalidCount { field: String::from_utf8_lossy(field).into_owned() };

    let digits = field.trim_ascii();
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    // All ASCII digits, so valid UTF-8; parse only fails on overflow.
    std::str::from_utf8(digits)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or_else(invalid)
}

/// Decodes record `index` into a fresh entry.
///
/// `buf` must hold exactly one record; anything shorter is a truncated record.
/// The count field is only validated when [`HashEntry::count`] is called.
pub fn decode(buf: &[u8], index: u64) -> Result<HashEntry, FormatError> {
    let mut entry = HashEntry::default();
    decode_into(buf, index, &mut entry)?;
    Ok(entry)
}

/// Decodes record `index` in place, overwriting `entry`.
#[inline]
pub fn decode_into(buf: &[u8], index: u64, entry: &mut HashEntry) -> Result<(), FormatError> {
    if buf.len() != RECORD_SIZE {
        return Err(FormatError::ShortRecord { index, actual: buf.len() });
    }

    entry.hash.copy_from_slice(&buf[HASH_FIELD]);
    entry.count.copy_from_slice(&buf[COUNT_FIELD]);
    Ok(())
}

/// Builds one record from a hex hash and a count.
///
/// The count is right-aligned in its 20 columns, which is wide enough for any `u64`.
pub fn encode(hash_hex: &[u8; HASH_LEN], count: u64) -> [u8; RECORD_SIZE] {
    let mut out = [b' '; RECORD_SIZE];
    out[HASH_FIELD].copy_from_slice(hash_hex);
    out[HASH_LEN] = SEPARATOR;
    out[COUNT_FIELD.end..].copy_from_slice(TERMINATOR);

    let mut n = count;
    let mut pos = COUNT_FIELD.end;
    loop {
        pos -= 1;
        out[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    const PASSWORD_SHA1: &[u8; HASH_LEN] = b"5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8";

    #[test]
    fn test_hex_to_nibble() {
        assert_eq!(hex_to_nibble(b'0'), Some(0));
        assert_eq!(hex_to_nibble(b'9'), Some(9));
        assert_eq!(hex_to_nibble(b'A'), Some(10));
        assert_eq!(hex_to_nibble(b'F'), Some(15));
        assert_eq!(hex_to_nibble(b'a'), Some(10));
        assert_eq!(hex_to_nibble(b'f'), Some(15));
        assert_eq!(hex_to_nibble(b'g'), None);
        assert_eq!(hex_to_nibble(b' '), None);
    }

    #[test]
    fn test_encode_hex_is_uppercase() {
        let digest = hex!("5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
        assert_eq!(&encode_hex(&digest), PASSWORD_SHA1);
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex(PASSWORD_SHA1), Some(hex!("5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8")));
        assert_eq!(decode_hex(b"5BAA"), None);
        assert_eq!(decode_hex(b"ZBAA61E4C9B93F3F0682250B6CF8331B7EE68FD8"), None);
    }

    #[test]
    fn test_encode_layout() {
        let record = encode(PASSWORD_SHA1, 12345);
        assert_eq!(record.len(), RECORD_SIZE);
        assert_eq!(&record[HASH_FIELD], PASSWORD_SHA1);
        assert_eq!(record[HASH_LEN], b':');
        assert_eq!(&record[COUNT_FIELD], b"               12345");
        assert_eq!(&record[61..], b"\r\n");
    }

    #[test]
    fn test_encode_max_count() {
        let record = encode(PASSWORD_SHA1, u64::MAX);
        assert_eq!(&record[COUNT_FIELD], b"18446744073709551615");
    }

    #[test]
    fn test_decode_record() {
        let record = encode(PASSWORD_SHA1, 12345);
        let entry = decode(&record, 0).unwrap();
        assert_eq!(entry.as_bytes(), PASSWORD_SHA1);
        assert_eq!(entry.count().unwrap(), 12345);
    }

    #[test]
    fn test_decode_short_record() {
        let record = encode(PASSWORD_SHA1, 1);
        let err = decode(&record[..40], 7).unwrap_err();
        assert!(matches!(err, FormatError::ShortRecord { index: 7, actual: 40 }));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(b"                   0").unwrap(), 0);
        assert_eq!(parse_count(b"  3861493           ").unwrap(), 3861493);
        assert_eq!(parse_count(b" 9223372036854775807").unwrap(), i64::MAX);
    }

    #[test]
    fn test_parse_count_rejects_garbage() {
        assert!(matches!(parse_count(b"              12x345"), Err(FormatError::InvalidCount { .. })));
        assert!(matches!(parse_count(b"                    "), Err(FormatError::InvalidCount { .. })));
        assert!(matches!(parse_count(b"                  -1"), Err(FormatError::InvalidCount { .. })));
        assert!(matches!(parse_count(b"                  +5"), Err(FormatError::InvalidCount { .. })));
        assert!(matches!(parse_count(b"               1 234"), Err(FormatError::InvalidCount { .. })));
        // one past i64::MAX
        assert!(matches!(parse_count(b" 9223372036854775808"), Err(FormatError::InvalidCount { .. })));
    }

    #[test]
    fn test_count_is_lazy() {
        let mut record = encode(PASSWORD_SHA1, 7);
        record[COUNT_FIELD.end - 1] = b'?';

        // Decoding only copies the fields; the bad count surfaces on demand.
        let entry = decode(&record, 0).unwrap();
        assert_eq!(entry.as_bytes(), PASSWORD_SHA1);
        assert!(entry.count().is_err());
    }

    proptest! {
        #[test]
        fn record_round_trip(digest in any::<[u8; DIGEST_LEN]>(), count in 0..=i64::MAX) {
            let record = encode(&encode_hex(&digest), count as u64);
            let entry = decode(&record, 0).unwrap();
            prop_assert_eq!(entry.digest().unwrap(), digest);
            prop_assert_eq!(entry.count().unwrap(), count);
        }
    }
}
