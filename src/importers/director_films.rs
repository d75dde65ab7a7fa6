use sea_orm::Set;

use crate::{
    catalog::{Catalog, InsertOutcome},
    entities::director_film,
    error::ImportResult,
    pipeline::{RecordMapper, RowOutcome},
};

/// film_directors.csv: film imdb_id; director imdb_id
///
/// Both referenced entities must already be in storage; rows pointing at
/// anything else are skipped.
pub struct DirectorFilmMapper;

impl RecordMapper for DirectorFilmMapper {
    fn label(&self) -> &'static str {
        "director-films"
    }

    fn min_fields(&self) -> usize {
        2
    }

    fn dedup_key(&self, fields: &[&str]) -> String {
        format!("{}_{}", fields[1].trim(), fields[0].trim())
    }

    async fn persist(&self, catalog: &Catalog, fields: &[&str]) -> ImportResult<RowOutcome> {
        let film_imdb = fields[0].trim();
        let director_imdb = fields[1].trim();

        let director = catalog.find_director(director_imdb).await?;
        let film = catalog.find_film(film_imdb).await?;
        let (Some(director), Some(film)) = (director, film) else {
            return Ok(RowOutcome::MissingReference);
        };

        let model = director_film::ActiveModel {
            id: Default::default(),
            director_id: Set(director.id),
            film_id: Set(film.id),
        };

        Ok(match catalog.create_director_film(model).await? {
            InsertOutcome::Created => RowOutcome::Created,
            InsertOutcome::Conflict => RowOutcome::Conflict,
        })
    }
}
