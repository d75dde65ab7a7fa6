use std::collections::BTreeSet;

use sea_orm::Set;
use tracing::warn;

use crate::{
    catalog::{Catalog, InsertOutcome},
    entities::film,
    error::ImportResult,
    importers::optional,
    pipeline::{RecordMapper, RowOutcome},
};

const SYNOPSIS_MAX_CHARS: usize = 255;

/// films.csv: imdb_id; title; release_year; rating; profile_url;
/// filming_location; genres (comma-separated); language; synopsis; country
///
/// Film rows are the messiest of the datasets, so unlike the actor and
/// director stages this mapper keeps short rows: anything past imdb_id and
/// title defaults to NULL when the column is absent.
pub struct FilmMapper;

impl RecordMapper for FilmMapper {
    fn label(&self) -> &'static str {
        "films"
    }

    fn min_fields(&self) -> usize {
        2
    }

    fn dedup_key(&self, fields: &[&str]) -> String {
        fields[0].trim().to_string()
    }

    async fn persist(&self, catalog: &Catalog, fields: &[&str]) -> ImportResult<RowOutcome> {
        let mut genre_ids = Vec::new();
        if let Some(genres) = fields.get(6) {
            for label in split_genres(genres) {
                let genre = catalog.find_or_create_genre(&label).await?;
                genre_ids.push(genre.id);
            }
        }

        let model = film::ActiveModel {
            id: Default::default(),
            imdb_id: Set(fields[0].trim().to_string()),
            title: Set(fields[1].to_string()),
            release_year: Set(fields.get(2).copied().and_then(parse_release_year)),
            rating: Set(fields.get(3).copied().and_then(optional)),
            profile_url: Set(fields.get(4).copied().and_then(optional)),
            filming_location: Set(fields.get(5).copied().and_then(optional)),
            language: Set(fields.get(7).copied().and_then(optional)),
            synopsis: Set(fields.get(8).copied().and_then(truncate_synopsis)),
            country: Set(fields.get(9).copied().and_then(optional)),
        };

        Ok(match catalog.create_film(model, &genre_ids).await? {
            InsertOutcome::Created => RowOutcome::Created,
            InsertOutcome::Conflict => RowOutcome::Conflict,
        })
    }
}

/// Comma-separated genre labels, trimmed and deduplicated.
fn split_genres(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_release_year(raw: &str) -> Option<i32> {
    match raw.trim().parse::<i32>() {
        Ok(year) => Some(year),
        Err(err) => {
            warn!(raw, error = %err, "unparseable release year, leaving unset");
            None
        },
    }
}

fn truncate_synopsis(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.chars().take(SYNOPSIS_MAX_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_are_trimmed_and_deduplicated() {
        let genres = split_genres("Drama, Comedy , Drama,,  ");
        assert_eq!(genres.len(), 2);
        assert!(genres.contains("Drama"));
        assert!(genres.contains("Comedy"));
    }

    #[test]
    fn release_year_defaults_on_garbage() {
        assert_eq!(parse_release_year("1994"), Some(1994));
        assert_eq!(parse_release_year(" 2001 "), Some(2001));
        assert_eq!(parse_release_year("TBA"), None);
        assert_eq!(parse_release_year(""), None);
    }

    #[test]
    fn synopsis_is_capped_at_255_chars() {
        let long = "x".repeat(400);
        assert_eq!(truncate_synopsis(&long).unwrap().chars().count(), 255);
        assert_eq!(truncate_synopsis("short"), Some("short".to_string()));
        assert_eq!(truncate_synopsis(""), None);
    }
}
