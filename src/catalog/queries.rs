//! Read-only lookups and statistics over the in-memory catalog.

use super::catalog::MovieCatalog;
use super::error::{CatalogError, Result};
use super::movie::Movie;

impl MovieCatalog {
    pub fn titles(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.title.as_str()).collect()
    }

    pub fn count(&self) -> usize {
        self.movies.len()
    }

    /// Case-sensitive, unlike title lookups.
    pub fn find_by_title_substring(&self, substring: &str) -> Vec<&Movie> {
        self.movies
            .iter()
            .filter(|m| m.title.contains(substring))
            .collect()
    }

    pub fn find_by_year(&self, year: i64) -> Vec<&Movie> {
        self.movies.iter().filter(|m| m.year == year).collect()
    }

    pub fn count_by_director(&self, director: &str) -> usize {
        self.movies.iter().filter(|m| m.has_director(director)).count()
    }

    pub fn find_by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.movies.iter().filter(|m| m.has_genre(genre)).collect()
    }

    fn non_empty(&self, operation: &'static str) -> Result<&[Movie]> {
        if self.movies.is_empty() {
            return Err(CatalogError::EmptyCatalog { operation });
        }
        Ok(&self.movies)
    }

    /// Title of the earliest movie, the first one wins on equal years.
    pub fn oldest_title(&self) -> Result<&str> {
        let movies = self.non_empty("oldest title")?;
        let mut oldest = &movies[0];
        for movie in &movies[1..] {
            if movie.year < oldest.year {
                oldest = movie;
            }
        }
        Ok(&oldest.title)
    }

    pub fn average_year(&self) -> Result<f64> {
        let movies = self.non_empty("average year")?;
        let total: i128 = movies.iter().map(|m| m.year as i128).sum();
        Ok(total as f64 / movies.len() as f64)
    }

    /// Longest title by character count, the first one wins on equal lengths.
    pub fn longest_title(&self) -> Result<&str> {
        let movies = self.non_empty("longest title")?;
        let mut longest = &movies[0];
        for movie in &movies[1..] {
            if movie.title.chars().count() > longest.title.chars().count() {
                longest = movie;
            }
        }
        Ok(&longest.title)
    }

    /// Titles with `start <= year <= end`, in catalog order.
    pub fn titles_between_years(&self, start: i64, end: i64) -> Vec<&str> {
        self.movies
            .iter()
            .filter(|m| (start..=end).contains(&m.year))
            .map(|m| m.title.as_str())
            .collect()
    }

    /// Most frequent year. Ties go to the year that appeared first in the catalog.
    pub fn most_common_year(&self) -> Result<i64> {
        let movies = self.non_empty("most common year")?;

        // Tally in first-seen order.
        let mut tally: Vec<(i64, usize)> = Vec::new();
        for movie in movies {
            match tally.iter_mut().find(|(year, _)| *year == movie.year) {
                Some((_, count)) => *count += 1,
                None => tally.push((movie.year, 1)),
            }
        }

        let mut best = tally[0];
        for &(year, count) in &tally[1..] {
            if count > best.1 {
                best = (year, count);
            }
        }
        Ok(best.0)
    }
}
