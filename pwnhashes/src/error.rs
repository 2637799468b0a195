use crate::codec::{BINARY_RECORD_SIZE, RECORD_SIZE};

/// Ways a database file or one of its records can be malformed.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("file size {size} doesn't match any known database format")]
    UnrecognizedSize { size: u64 },

    #[error("short record at index {index}: read {actual} of {expected} bytes", expected = RECORD_SIZE)]
    ShortRecord { index: u64, actual: usize },

    #[error("invalid occurrence count {field:?}")]
    InvalidCount { field: String },

    #[error("invalid hex in hash field {field:?}")]
    InvalidHash { field: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed hash database: {0}")]
    Format(#[from] FormatError),

    /// The file size matches the reserved binary layout, which is recognized but not implemented.
    #[error(
        "file size {size} matches the {record}-byte binary layout, which is not implemented yet",
        record = BINARY_RECORD_SIZE
    )]
    UnsupportedFormat { size: u64 },

    #[error("hash database is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, Error>;
