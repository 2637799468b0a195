use std::cmp::Ordering;
use std::io;
use std::path::PathBuf;

use clap::ValueEnum;
use indicatif::ProgressBar;
use pwnhashes::codec::decode_hex;
use pwnhashes::{HashDatabase, HashEntry, HashHolder};
use tracing::debug;

use crate::error::Error;

/// Linear scans report progress once every this many records.
pub const PROGRESS_INTERVAL: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchMode {
    /// Binary search with positioned reads
    Binsearch,
    /// Sequential scan from the first record
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TermType {
    /// Plaintext password, hashed with SHA-1
    Password,
    /// Uppercase hex SHA-1 hash, used as given
    Hash,
}

/// Result of one lookup.
#[derive(Debug)]
pub struct Outcome {
    pub entry: Option<HashEntry>,
    /// Records handed to the visitor, for linear scans only.
    pub scanned: Option<u64>,
}

/// Opens the database, reporting a missing file as [`Error::DatabaseNotFound`].
pub fn open_database(path: PathBuf) -> Result<HashDatabase, Error> {
    match HashDatabase::open(&path) {
        Ok(db) => Ok(db),
        Err(pwnhashes::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(Error::DatabaseNotFound { path })
        }
        Err(e) => Err(e.into()),
    }
}

/// Builds the search target for a command-line term.
///
/// Hash terms must be 40 hex characters but keep their case, so a lowercase
/// hash passes validation and then never matches the uppercase file.
pub fn holder_for(db: &HashDatabase, term_type: TermType, term: &str) -> Result<HashHolder, Error> {
    match term_type {
        TermType::Password => Ok(db.new_password_holder(term)),
        TermType::Hash => {
            if decode_hex(term.as_bytes()).is_none() {
                return Err(Error::InvalidHashTerm { term: term.to_string() });
            }
            Ok(db.new_hash_holder(term))
        }
    }
}

pub fn binsearch(db: &HashDatabase, holder: &HashHolder) -> Result<Outcome, Error> {
    let entry = db.search(holder)?;
    Ok(Outcome { entry, scanned: None })
}

/// Scans until the target is found or the sorted order has passed it.
pub fn linear(
    db: &mut HashDatabase,
    holder: &HashHolder,
    progress: Option<&ProgressBar>,
) -> Result<Outcome, Error> {
    let mut found = None;

    let scanned = db.visit(|entry, index| {
        if index % PROGRESS_INTERVAL == 0 {
            if let Some(pb) = progress {
                pb.set_position(index);
            }
        }

        match entry.compare(holder) {
            Ordering::Less => true,
            Ordering::Equal => {
                found = Some(*entry);
                false
            }
            Ordering::Greater => {
                debug!(stored = %entry, target = %holder, "passed target in sorted order");
                false
            }
        }
    })?;

    if let Some(pb) = progress {
        pb.set_position(scanned);
    }

    Ok(Outcome { entry: found, scanned: Some(scanned) })
}
