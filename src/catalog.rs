use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

use crate::{
    entities::{actor, director, director_film, film, film_genre, genre, role_film},
    error::ImportResult,
};

/// Result of a create call. Importers skip `Conflict` rows without knowing
/// anything about the storage layer's error types.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    Created,
    Conflict,
}

/// CRUD surface over the relational catalog, one method per operation the
/// importers need. All lookups key on the external (IMDB-style) identifier.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn create_actor(&self, model: actor::ActiveModel) -> ImportResult<InsertOutcome> {
        insert_outcome(model.insert(&self.db).await)
    }

    pub async fn create_director(
        &self,
        model: director::ActiveModel,
    ) -> ImportResult<InsertOutcome> {
        insert_outcome(model.insert(&self.db).await)
    }

    /// Inserts the film, then its genre links. Genre links are only written
    /// when the film itself was created.
    pub async fn create_film(
        &self,
        model: film::ActiveModel,
        genre_ids: &[i32],
    ) -> ImportResult<InsertOutcome> {
        let film = match model.insert(&self.db).await {
            Ok(film) => film,
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => return Ok(InsertOutcome::Conflict),
                _ => return Err(err.into()),
            },
        };

        for &genre_id in genre_ids {
            let link = film_genre::ActiveModel {
                film_id: Set(film.id),
                genre_id: Set(genre_id),
            };
            film_genre::Entity::insert(link).exec_without_returning(&self.db).await?;
        }

        Ok(InsertOutcome::Created)
    }

    pub async fn create_director_film(
        &self,
        model: director_film::ActiveModel,
    ) -> ImportResult<InsertOutcome> {
        insert_outcome(model.insert(&self.db).await)
    }

    pub async fn create_role_film(
        &self,
        model: role_film::ActiveModel,
    ) -> ImportResult<InsertOutcome> {
        insert_outcome(model.insert(&self.db).await)
    }

    pub async fn find_actor(&self, imdb_id: &str) -> ImportResult<Option<actor::Model>> {
        Ok(actor::Entity::find()
            .filter(actor::Column::ImdbId.eq(imdb_id))
            .one(&self.db)
            .await?)
    }

    pub async fn find_director(&self, imdb_id: &str) -> ImportResult<Option<director::Model>> {
        Ok(director::Entity::find()
            .filter(director::Column::ImdbId.eq(imdb_id))
            .one(&self.db)
            .await?)
    }

    pub async fn find_film(&self, imdb_id: &str) -> ImportResult<Option<film::Model>> {
        Ok(film::Entity::find()
            .filter(film::Column::ImdbId.eq(imdb_id))
            .one(&self.db)
            .await?)
    }

    /// Looks a genre up by label, creating it if absent. Idempotent: a lost
    /// insert race falls back to re-reading the winner's row.
    pub async fn find_or_create_genre(&self, label: &str) -> ImportResult<genre::Model> {
        if let Some(existing) = genre::Entity::find()
            .filter(genre::Column::Label.eq(label))
            .one(&self.db)
            .await?
        {
            return Ok(existing);
        }

        let model = genre::ActiveModel {
            id: Default::default(),
            label: Set(label.to_string()),
        };
        match model.insert(&self.db).await {
            Ok(created) => Ok(created),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(genre::Entity::find()
                    .filter(genre::Column::Label.eq(label))
                    .one(&self.db)
                    .await?
                    .ok_or_else(|| {
                        sea_orm::DbErr::RecordNotFound(format!("genre {label} vanished"))
                    })?)
            },
            Err(err) => Err(err.into()),
        }
    }
}

fn insert_outcome<T>(result: Result<T, sea_orm::DbErr>) -> ImportResult<InsertOutcome> {
    match result {
        Ok(_) => Ok(InsertOutcome::Created),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Ok(InsertOutcome::Conflict),
            _ => Err(err.into()),
        },
    }
}
