use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] pwnhashes::Error),

    #[error("Hash database '{path}' not found. Pass --db or set HASPWN_DB.")]
    DatabaseNotFound { path: PathBuf },

    #[error("'{term}' is not a 40-character hex SHA-1 hash")]
    InvalidHashTerm { term: String },
}
