//! Lookup layer for the Pwned Passwords "ordered by hash" text file.
//!
//! The database is a flat file of fixed-width 63-byte records, each holding an
//! uppercase hex SHA-1 digest and an occurrence count, sorted ascending by hash.
//! Two ways in are provided:
//!
//! - [`HashDatabase::search`]: binary search with positioned reads, roughly
//!   log2(N) record reads per lookup.
//! - [`HashDatabase::visit`]: a buffered sequential scan with a caller-supplied
//!   stop condition.
//!
//! ```no_run
//! use pwnhashes::HashDatabase;
//!
//! let db = HashDatabase::open("pwned-passwords-ordered-2.0.txt")?;
//! let holder = db.new_password_holder("password");
//! if let Some(entry) = db.search(&holder)? {
//!     println!("{} seen {} times", entry, entry.count()?);
//! }
//! # Ok::<(), pwnhashes::Error>(())
//! ```
//!
//! The file is trusted to be sorted; nothing re-checks the order.

use std::path::PathBuf;

pub mod codec;
pub mod database;
pub mod entry;
pub mod error;
pub mod holder;

pub use codec::{BINARY_RECORD_SIZE, RECORD_SIZE};
pub use database::{HashDatabase, record_count, scan_records};
pub use entry::HashEntry;
pub use error::{Error, FormatError, Result};
pub use holder::HashHolder;

/// Environment variable name for specifying the hash database file.
pub const DATABASE_ENV: &str = "HASPWN_DB";

/// File name used when [`DATABASE_ENV`] is unset.
pub const DEFAULT_DATABASE: &str = "pwned-passwords-ordered-2.0.txt";

/// Returns the database path from the HASPWN_DB environment variable,
/// or falls back to [`DEFAULT_DATABASE`] in the working directory.
pub fn database_path_from_env() -> PathBuf {
    std::env::var_os(DATABASE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}
