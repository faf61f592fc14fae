use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single catalog entry. Field order here is the field order on disk.
///
/// Fields the catalog does not know about are kept in `extra` and written
/// back after `genres`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Movie {
    pub title: String,
    pub director: String,
    #[serde(deserialize_with = "deserialize_year")]
    pub year: i64,
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

struct YearVisitor;

impl<'de> Visitor<'de> for YearVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a whole number year")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
        Ok(value)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
        i64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    // 2000.0 is the same year as 2000.
    fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Ok(value as i64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }
}

fn deserialize_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    deserializer.deserialize_any(YearVisitor)
}

impl Movie {
    pub fn new<T, D>(title: T, director: D, year: i64, genres: Vec<String>) -> Movie
    where
        T: Into<String>,
        D: Into<String>,
    {
        Movie {
            title: title.into(),
            director: director.into(),
            year,
            genres,
            extra: Map::new(),
        }
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    pub fn has_director(&self, director: &str) -> bool {
        self.director.to_lowercase() == director.to_lowercase()
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        let genre = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == genre)
    }
}

/// Fields to overwrite on an existing movie.
///
/// Only "truthy" values are applied: an empty director, a year of `0` or an
/// empty genre list count as not supplied, same as `None`.
#[derive(Clone, Default, Debug)]
pub struct MovieUpdate {
    pub director: Option<String>,
    pub year: Option<i64>,
    pub genres: Option<Vec<String>>,
}

impl MovieUpdate {
    pub(crate) fn apply_to(self, movie: &mut Movie) {
        if let Some(director) = self.director.filter(|d| !d.is_empty()) {
            movie.director = director;
        }
        if let Some(year) = self.year.filter(|y| *y != 0) {
            movie.year = year;
        }
        if let Some(genres) = self.genres.filter(|g| !g.is_empty()) {
            movie.genres = genres;
        }
    }
}
