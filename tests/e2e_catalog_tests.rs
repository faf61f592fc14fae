//! End-to-end tests for the catalog against real documents on disk.

mod common;

use common::{
    TestDocument, INCEPTION_TITLE, MATRIX_TITLE, SEVEN_SAMURAI_TITLE, SPIRITED_AWAY_TITLE,
};
use movie_catalog::{CatalogError, MovieCatalog, MovieUpdate};

// =============================================================================
// Loading & Persistence
// =============================================================================

#[test]
fn test_open_then_reopen_after_persist_is_identical() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();
    catalog.update(MATRIX_TITLE, MovieUpdate::default()).unwrap();

    let reopened = MovieCatalog::open(&doc.path).unwrap();

    assert_eq!(reopened.list(), catalog.list());
    assert_eq!(
        reopened.titles(),
        vec![
            INCEPTION_TITLE,
            MATRIX_TITLE,
            SEVEN_SAMURAI_TITLE,
            SPIRITED_AWAY_TITLE
        ]
    );
}

#[test]
fn test_persisted_document_format() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();
    catalog.remove(MATRIX_TITLE).unwrap();
    catalog.remove(SEVEN_SAMURAI_TITLE).unwrap();
    catalog.remove(SPIRITED_AWAY_TITLE).unwrap();
    catalog
        .add("Amélie", "Jean-Pierre Jeunet", 2001, vec!["Comedy".to_string()])
        .unwrap();

    let expected = r#"[
    {
        "title": "Inception",
        "director": "Christopher Nolan",
        "year": 2010,
        "genres": [
            "Sci-Fi",
            "Thriller"
        ]
    },
    {
        "title": "Amélie",
        "director": "Jean-Pierre Jeunet",
        "year": 2001,
        "genres": [
            "Comedy"
        ]
    }
]"#;
    assert_eq!(doc.read(), expected);
}

#[test]
fn test_non_ascii_titles_are_written_literally() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();
    catalog.update(SPIRITED_AWAY_TITLE, MovieUpdate::default()).unwrap();

    let written = doc.read();
    assert!(written.contains(SPIRITED_AWAY_TITLE));
    assert!(!written.contains("\\u"));
}

#[test]
fn test_open_nonexistent_path_names_the_path() {
    let doc = TestDocument::seeded();
    let missing = doc.path.with_file_name("missing.json");

    let err = MovieCatalog::open(&missing).err().unwrap();

    assert!(matches!(err, CatalogError::NotFound { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_open_invalid_document_is_a_parse_error() {
    let doc = TestDocument::with_content("[{\"title\": \"Inception\",");

    let err = MovieCatalog::open(&doc.path).err().unwrap();

    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn test_reload_discards_external_changes_in_memory() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();
    std::fs::write(&doc.path, "[]").unwrap();

    catalog.reload().unwrap();

    assert_eq!(catalog.count(), 0);
}

// =============================================================================
// Mutations
// =============================================================================

#[test]
fn test_add_then_get_by_title_any_case() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();
    let before = catalog.count();

    let added = catalog
        .add("Dune", "Denis Villeneuve", 2021, vec!["Sci-Fi".to_string()])
        .unwrap();

    assert_eq!(catalog.count(), before + 1);
    assert_eq!(catalog.get_by_title("dUnE").unwrap(), &added);
    let json = doc.json();
    assert_eq!(json.as_array().unwrap().len(), before + 1);
    assert_eq!(json[before]["title"], "Dune");
    assert_eq!(json[before]["year"], 2021);
}

#[test]
fn test_remove_missing_title_leaves_catalog_and_file_unchanged() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();
    let before = doc.read();

    let err = catalog.remove("Tenet").unwrap_err();

    assert!(matches!(err, CatalogError::RecordNotFound { .. }));
    assert_eq!(catalog.count(), 4);
    assert_eq!(doc.read(), before);
}

#[test]
fn test_remove_is_case_insensitive() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();

    let removed = catalog.remove("SEVEN samurai").unwrap();

    assert_eq!(removed.title, SEVEN_SAMURAI_TITLE);
    assert!(catalog.get_by_title(SEVEN_SAMURAI_TITLE).is_err());
    assert_eq!(doc.json().as_array().unwrap().len(), 3);
}

#[test]
fn test_update_without_changes_still_rewrites_document() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();
    let before = catalog.get_by_title(INCEPTION_TITLE).unwrap().clone();

    let updated = catalog
        .update(
            INCEPTION_TITLE,
            MovieUpdate {
                director: Some(String::new()),
                year: Some(0),
                genres: Some(vec![]),
            },
        )
        .unwrap();

    assert_eq!(updated, before);
    // The seed document is compact, so a rewrite shows up as pretty-printed output.
    assert!(doc.read().starts_with("[\n    {\n        \"title\""));
}

#[test]
fn test_update_keeps_position() {
    let doc = TestDocument::seeded();
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();

    catalog
        .update(
            "the matrix",
            MovieUpdate {
                director: Some("The Wachowskis".to_string()),
                year: Some(1998),
                genres: None,
            },
        )
        .unwrap();

    let json = doc.json();
    assert_eq!(json[1]["title"], MATRIX_TITLE);
    assert_eq!(json[1]["director"], "The Wachowskis");
    assert_eq!(json[1]["year"], 1998);
    assert_eq!(json[1]["genres"], serde_json::json!(["Sci-Fi", "Action"]));
}

#[test]
fn test_unknown_fields_survive_update() {
    let doc = TestDocument::with_content(
        r#"[{"title": "Heat", "director": "Michael Mann", "year": 1995.0, "genres": ["Crime"], "rating": 9, "watched": true}]"#,
    );
    let mut catalog = MovieCatalog::open(&doc.path).unwrap();

    catalog.update("heat", MovieUpdate::default()).unwrap();

    let json = doc.json();
    assert_eq!(json[0]["year"], 1995);
    assert_eq!(json[0]["rating"], 9);
    assert_eq!(json[0]["watched"], true);
    let keys: Vec<&String> = json[0].as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["title", "director", "year", "genres", "rating", "watched"]
    );
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_statistics_over_seed() {
    let doc = TestDocument::seeded();
    let catalog = MovieCatalog::open(&doc.path).unwrap();

    assert_eq!(catalog.oldest_title().unwrap(), SEVEN_SAMURAI_TITLE);
    assert_eq!(catalog.longest_title().unwrap(), SEVEN_SAMURAI_TITLE);
    assert!((catalog.average_year().unwrap() - 1991.0).abs() < 1e-9);
    assert_eq!(catalog.most_common_year().unwrap(), 2010);
    assert_eq!(
        catalog.titles_between_years(1999, 2001),
        vec![MATRIX_TITLE, SPIRITED_AWAY_TITLE]
    );
}

#[test]
fn test_filters_over_seed() {
    let doc = TestDocument::seeded();
    let catalog = MovieCatalog::open(&doc.path).unwrap();

    let sci_fi: Vec<&str> = catalog
        .find_by_genre("sci-fi")
        .iter()
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(sci_fi, vec![INCEPTION_TITLE, MATRIX_TITLE]);

    assert_eq!(catalog.find_by_title_substring("The").len(), 1);
    assert!(catalog.find_by_title_substring("the").is_empty());
    assert_eq!(catalog.find_by_year(2001)[0].title, SPIRITED_AWAY_TITLE);
    assert_eq!(catalog.count_by_director("AKIRA KUROSAWA"), 1);
}

#[test]
fn test_statistics_on_empty_document() {
    let doc = TestDocument::with_content("[]");
    let catalog = MovieCatalog::open(&doc.path).unwrap();

    let err = catalog.average_year().unwrap_err();

    assert!(matches!(err, CatalogError::EmptyCatalog { .. }));
    assert!(catalog.titles().is_empty());
}
