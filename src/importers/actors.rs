use sea_orm::Set;

use crate::{
    catalog::{Catalog, InsertOutcome},
    entities::actor,
    error::ImportResult,
    importers::{optional, parse_birth_date},
    pipeline::{RecordMapper, RowOutcome},
};

/// actors.csv: imdb_id; name; birth_date; birth_place; (unused); profile_url
pub struct ActorMapper;

impl RecordMapper for ActorMapper {
    fn label(&self) -> &'static str {
        "actors"
    }

    fn min_fields(&self) -> usize {
        6
    }

    fn dedup_key(&self, fields: &[&str]) -> String {
        fields[0].trim().to_string()
    }

    async fn persist(&self, catalog: &Catalog, fields: &[&str]) -> ImportResult<RowOutcome> {
        let model = actor::ActiveModel {
            id: Default::default(),
            imdb_id: Set(fields[0].trim().to_string()),
            name: Set(fields[1].to_string()),
            birth_date: Set(parse_birth_date(fields[2])),
            birth_place: Set(optional(fields[3])),
            profile_url: Set(optional(fields[5])),
        };

        Ok(match catalog.create_actor(model).await? {
            InsertOutcome::Created => RowOutcome::Created,
            InsertOutcome::Conflict => RowOutcome::Conflict,
        })
    }
}
