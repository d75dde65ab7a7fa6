use sea_orm::Set;

use crate::{
    catalog::{Catalog, InsertOutcome},
    entities::director,
    error::ImportResult,
    importers::{optional, parse_birth_date},
    pipeline::{RecordMapper, RowOutcome},
};

/// directors.csv: imdb_id; name; birth_date; birth_place; profile_url
pub struct DirectorMapper;

impl RecordMapper for DirectorMapper {
    fn label(&self) -> &'static str {
        "directors"
    }

    fn min_fields(&self) -> usize {
        5
    }

    fn dedup_key(&self, fields: &[&str]) -> String {
        fields[0].trim().to_string()
    }

    async fn persist(&self, catalog: &Catalog, fields: &[&str]) -> ImportResult<RowOutcome> {
        let model = director::ActiveModel {
            id: Default::default(),
            imdb_id: Set(fields[0].trim().to_string()),
            name: Set(fields[1].to_string()),
            birth_date: Set(parse_birth_date(fields[2])),
            birth_place: Set(optional(fields[3])),
            profile_url: Set(optional(fields[4])),
        };

        Ok(match catalog.create_director(model).await? {
            InsertOutcome::Created => RowOutcome::Created,
            InsertOutcome::Conflict => RowOutcome::Conflict,
        })
    }
}
