mod catalog;
mod error;
mod movie;
mod queries;
mod storage;

pub use catalog::MovieCatalog;
pub use error::{CatalogError, Result};
pub use movie::{Movie, MovieUpdate};
pub use storage::{DocumentStorage, FsStorage};
