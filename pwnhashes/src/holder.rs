use std::fmt;

use sha1::{Digest, Sha1};

use crate::codec::{DIGEST_LEN, decode_hex, encode_hex};

/// The hash being looked up, kept in the same hex form the database stores.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HashHolder {
    hash: String,
}

impl HashHolder {
    /// Wraps a hex hash verbatim.
    ///
    /// No case folding happens here: the database is uppercase, so a lowercase
    /// term never matches.
    pub fn from_hex(hex_hash: impl Into<String>) -> Self {
        Self { hash: hex_hash.into() }
    }

    /// Hashes the password's raw bytes with SHA-1 and wraps the uppercase hex digest.
    pub fn from_password(password: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(password.as_bytes());
        let digest: [u8; DIGEST_LEN] = hasher.finalize().into();

        Self { hash: encode_hex(&digest).iter().map(|&b| char::from(b)).collect() }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.hash.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Raw digest bytes, or `None` if the holder isn't 40 hex characters.
    pub fn digest(&self) -> Option<[u8; DIGEST_LEN]> {
        decode_hex(self.hash.as_bytes())
    }
}

impl fmt::Display for HashHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}

impl fmt::Debug for HashHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashHolder").field(&self.hash).finish()
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn test_password_holder() {
        // password -> SHA1: 5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8
        let holder = HashHolder::from_password("password");
        assert_eq!(holder.to_string(), "5BAA61E4C9B93F3F0682250B6CF8331B7EE68FD8");
        assert_eq!(holder.digest(), Some(hex!("5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8")));
    }

    #[test]
    fn test_password_holder_123() {
        // password123 -> SHA1: CBFDAC6008F9CAB4083784CBD1874F76618D2A97
        let holder = HashHolder::from_password("password123");
        assert_eq!(holder.as_str(), "CBFDAC6008F9CAB4083784CBD1874F76618D2A97");
    }

    #[test]
    fn test_hex_holder_is_verbatim() {
        let holder = HashHolder::from_hex("5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
        assert_eq!(holder.as_str(), "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
        assert_ne!(holder, HashHolder::from_password("password"));

        // Same digest either way; only the byte comparison is case sensitive.
        assert_eq!(holder.digest(), HashHolder::from_password("password").digest());
    }

    #[test]
    fn test_digest_of_malformed_holder() {
        assert_eq!(HashHolder::from_hex("not a hash").digest(), None);
    }
}
