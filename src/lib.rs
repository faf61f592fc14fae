//! Movie Catalog Library
//!
//! A JSON-document backed movie catalog, exposed for the shell binary and tests.

pub mod catalog;
pub mod config;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, FsStorage, Movie, MovieCatalog, MovieUpdate};
pub use config::{AppConfig, CliConfig, FileConfig};
