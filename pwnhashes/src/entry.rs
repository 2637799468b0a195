use std::cmp::Ordering;
use std::fmt;

use crate::codec::{COUNT_LEN, DIGEST_LEN, HASH_LEN, decode_hex, parse_count};
use crate::error::{FormatError, Result};
use crate::holder::HashHolder;

/// One decoded record: the raw hash and count fields, copied out of the read buffer.
///
/// During [`HashDatabase::visit`](crate::HashDatabase::visit) a single entry is
/// reused for every record, so the visitor only ever sees a borrow that ends with
/// the call. Entries are `Copy`; copy one out to keep it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HashEntry {
    pub(crate) hash: [u8; HASH_LEN],
    pub(crate) count: [u8; COUNT_LEN],
}

impl Default for HashEntry {
    fn default() -> Self {
        Self { hash: [b'0'; HASH_LEN], count: [b' '; COUNT_LEN] }
    }
}

impl HashEntry {
    /// Ordered byte comparison of this entry's hash field against the holder.
    ///
    /// `Less` means the target is further along in the file, `Greater` means a
    /// sorted scan has already passed it.
    #[inline]
    pub fn compare(&self, holder: &HashHolder) -> Ordering {
        self.hash.as_slice().cmp(holder.as_bytes())
    }

    /// Number of times this hash appears in the breach corpus.
    ///
    /// The count field is parsed on every call.
    pub fn count(&self) -> Result<i64> {
        Ok(parse_count(&self.count)?)
    }

    /// The hash field exactly as stored.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    pub fn hash_str(&self) -> &str {
        // Non-ASCII in the hash field is rendered lossily by Display instead.
        std::str::from_utf8(&self.hash).unwrap_or("")
    }

    /// Raw digest bytes of the hash field.
    pub fn digest(&self) -> Result<[u8; DIGEST_LEN]> {
        decode_hex(&self.hash).ok_or_else(|| {
            FormatError::InvalidHash { field: String::from_utf8_lossy(&self.hash).into_owned() }
                .into()
        })
    }
}

impl fmt::Display for HashEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.hash))
    }
}

impl fmt::Debug for HashEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashEntry")
            .field("hash", &String::from_utf8_lossy(&self.hash))
            .field("count", &String::from_utf8_lossy(&self.count).trim())
            .finish()
    }
}
