use super::error::{CatalogError, Result};
use super::movie::{Movie, MovieUpdate};
use super::storage::{DocumentStorage, FsStorage};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_FILE_NAME: &str = "movies.json";

/// An ordered, in-memory set of movies mirrored to a single JSON document.
///
/// Every mutation rewrites the whole document before returning. Queries only
/// look at memory.
pub struct MovieCatalog {
    path: PathBuf,
    storage: Box<dyn DocumentStorage>,
    pub(super) movies: Vec<Movie>,
}

impl MovieCatalog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<MovieCatalog> {
        Self::open_with_storage(path, Box::new(FsStorage))
    }

    pub fn open_with_storage<P: AsRef<Path>>(
        path: P,
        storage: Box<dyn DocumentStorage>,
    ) -> Result<MovieCatalog> {
        let path = path.as_ref().to_path_buf();
        let movies = Self::load_movies(&path, storage.as_ref())?;
        info!("Loaded {} movies from {}", movies.len(), path.display());
        Ok(MovieCatalog {
            path,
            storage,
            movies,
        })
    }

    /// Looks for a `movies.json` file in the current directory and its ancestors.
    pub fn infer_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        current_dir
            .ancestors()
            .map(|dir| dir.join(DEFAULT_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    fn load_movies(path: &Path, storage: &dyn DocumentStorage) -> Result<Vec<Movie>> {
        let bytes = storage.read(path).map_err(|source| CatalogError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Discards the in-memory set and loads the document again.
    pub fn reload(&mut self) -> Result<()> {
        self.movies = Self::load_movies(&self.path, self.storage.as_ref())?;
        info!(
            "Reloaded {} movies from {}",
            self.movies.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.movies.serialize(&mut serializer)?;

        self.storage.write(&self.path, &buf).map_err(|source| {
            warn!(
                "Failed to save catalog to {}, memory and disk are now out of sync: {}",
                self.path.display(),
                source
            );
            CatalogError::NotFound {
                path: self.path.clone(),
                source,
            }
        })
    }

    fn position_of(&self, title: &str) -> Result<usize> {
        self.movies
            .iter()
            .position(|m| m.has_title(title))
            .ok_or_else(|| CatalogError::RecordNotFound {
                title: title.to_owned(),
            })
    }

    pub fn list(&self) -> &[Movie] {
        &self.movies
    }

    pub fn add<T, D>(
        &mut self,
        title: T,
        director: D,
        year: i64,
        genres: Vec<String>,
    ) -> Result<Movie>
    where
        T: Into<String>,
        D: Into<String>,
    {
        let movie = Movie::new(title, director, year, genres);
        self.movies.push(movie.clone());
        self.persist()?;
        Ok(movie)
    }

    pub fn remove(&mut self, title: &str) -> Result<Movie> {
        let index = self.position_of(title)?;
        let removed = self.movies.remove(index);
        self.persist()?;
        info!("Movie '{}' removed successfully.", title);
        Ok(removed)
    }

    /// Overwrites the truthy fields of `update` on the first movie matching
    /// `title`. The document is rewritten even if nothing changed.
    pub fn update(&mut self, title: &str, update: MovieUpdate) -> Result<Movie> {
        let index = self.position_of(title)?;
        update.apply_to(&mut self.movies[index]);
        self.persist()?;
        info!("Movie '{}' updated successfully.", title);
        Ok(self.movies[index].clone())
    }

    pub fn get_by_title(&self, title: &str) -> Result<&Movie> {
        let index = self.position_of(title)?;
        Ok(&self.movies[index])
    }
}
