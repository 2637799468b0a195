use std::io::Write;

use pwnhashes::codec::{encode, encode_hex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha1::{Digest, Sha1};
use tempfile::NamedTempFile;

const ALL_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generates a specified number of random passwords with uniform distribution.
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_random_passwords(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let length = rng.gen_range(8..=64);
            (0..length)
                .map(|_| ALL_CHARS[rng.gen_range(0..ALL_CHARS.len())] as char)
                .collect()
        })
        .collect()
}

/// Writes a sorted text database holding the SHA-1 of every password.
pub fn build_database(passwords: &[String]) -> NamedTempFile {
    let mut digests: Vec<[u8; 20]> = passwords
        .iter()
        .map(|p| {
            let mut hasher = Sha1::new();
            hasher.update(p.as_bytes());
            hasher.finalize().into()
        })
        .collect();
    digests.sort_unstable();
    digests.dedup();

    let mut file = NamedTempFile::new().expect("create temp database");
    let mut out = std::io::BufWriter::new(file.as_file_mut());
    for (i, digest) in digests.iter().enumerate() {
        out.write_all(&encode(&encode_hex(digest), i as u64 + 1)).expect("write record");
    }
    out.flush().expect("flush database");
    drop(out);
    file
}
