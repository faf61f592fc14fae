use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File not found: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse catalog document {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Movie '{title}' was not found")]
    RecordNotFound { title: String },

    /// A statistic was requested on a catalog with no movies.
    #[error("Cannot compute {operation} of an empty catalog")]
    EmptyCatalog { operation: &'static str },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
