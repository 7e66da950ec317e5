//! Error types for the catalog's data-access layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Everything that can go wrong between the caller and the SQLite store.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Opening the database failed. The connection manager stays unopened.
    #[error("failed to open database at '{}': {source}", path.display())]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not locate home directory")]
    NoHomeDirectory,

    /// A statement failed. Inside a write sequence this forces a rollback.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("creating {table} row failed, no ID obtained")]
    NoGeneratedKey { table: &'static str },

    /// The title used as the update key no longer identifies a publication.
    #[error("no publication titled '{title}'")]
    PublicationNotFound { title: String },

    #[error("no book found with ID {id}")]
    BookNotFound { id: i64 },
}

impl CatalogError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
