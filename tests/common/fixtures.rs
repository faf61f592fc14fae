use std::path::PathBuf;
use tempfile::TempDir;

pub const INCEPTION_TITLE: &str = "Inception";
pub const MATRIX_TITLE: &str = "The Matrix";
pub const SEVEN_SAMURAI_TITLE: &str = "Seven Samurai";
pub const SPIRITED_AWAY_TITLE: &str = "千と千尋の神隠し";

pub const SEED_DOCUMENT: &str = r#"[
    {"title": "Inception", "director": "Christopher Nolan", "year": 2010, "genres": ["Sci-Fi", "Thriller"]},
    {"title": "The Matrix", "director": "Lana Wachowski", "year": 1999, "genres": ["Sci-Fi", "Action"]},
    {"title": "Seven Samurai", "director": "Akira Kurosawa", "year": 1954, "genres": ["Action", "Drama"]},
    {"title": "千と千尋の神隠し", "director": "Hayao Miyazaki", "year": 2001, "genres": ["Animation", "Fantasy"]}
]"#;

/// A temporary directory holding a seeded catalog document.
/// The directory is deleted when this is dropped.
pub struct TestDocument {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestDocument {
    pub fn seeded() -> Self {
        Self::with_content(SEED_DOCUMENT)
    }

    pub fn with_content(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("movies.json");
        std::fs::write(&path, content).expect("Failed to write catalog document");
        TestDocument { _dir: dir, path }
    }

    pub fn read(&self) -> String {
        std::fs::read_to_string(&self.path).expect("Failed to read catalog document")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read()).expect("Catalog document is not valid JSON")
    }
}
