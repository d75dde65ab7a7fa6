use sea_orm::Set;

use crate::{
    catalog::{Catalog, InsertOutcome},
    entities::role_film,
    error::ImportResult,
    pipeline::{RecordMapper, RowOutcome},
};

/// roles.csv: film imdb_id; actor imdb_id; character name
///
/// Deduplicated on (actor, film), so an actor keeps only the first recorded
/// role per film even when the source lists more.
pub struct RoleFilmMapper;

impl RecordMapper for RoleFilmMapper {
    fn label(&self) -> &'static str {
        "role-films"
    }

    fn min_fields(&self) -> usize {
        3
    }

    fn dedup_key(&self, fields: &[&str]) -> String {
        format!("{}_{}", fields[1].trim(), fields[0].trim())
    }

    async fn persist(&self, catalog: &Catalog, fields: &[&str]) -> ImportResult<RowOutcome> {
        let film_imdb = fields[0].trim();
        let actor_imdb = fields[1].trim();

        let actor = catalog.find_actor(actor_imdb).await?;
        let film = catalog.find_film(film_imdb).await?;
        let (Some(actor), Some(film)) = (actor, film) else {
            return Ok(RowOutcome::MissingReference);
        };

        let model = role_film::ActiveModel {
            id: Default::default(),
            actor_id: Set(actor.id),
            film_id: Set(film.id),
            character_name: Set(fields[2].to_string()),
        };

        Ok(match catalog.create_role_film(model).await? {
            InsertOutcome::Created => RowOutcome::Created,
            InsertOutcome::Conflict => RowOutcome::Conflict,
        })
    }
}
