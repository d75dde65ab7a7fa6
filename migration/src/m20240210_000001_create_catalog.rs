use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(pk_auto(Actor::Id))
                    .col(string(Actor::ImdbId))
                    .col(string(Actor::Name))
                    .col(string_null(Actor::BirthDate))
                    .col(string_null(Actor::BirthPlace))
                    .col(string_null(Actor::ProfileUrl))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actor_imdb_id")
                    .table(Actor::Table)
                    .col(Actor::ImdbId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Director::Table)
                    .if_not_exists()
                    .col(pk_auto(Director::Id))
                    .col(string(Director::ImdbId))
                    .col(string(Director::Name))
                    .col(string_null(Director::BirthDate))
                    .col(string_null(Director::BirthPlace))
                    .col(string_null(Director::ProfileUrl))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_director_imdb_id")
                    .table(Director::Table)
                    .col(Director::ImdbId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::Id))
                    .col(string(Film::ImdbId))
                    .col(string(Film::Title))
                    .col(integer_null(Film::ReleaseYear))
                    .col(string_null(Film::Rating))
                    .col(string_null(Film::ProfileUrl))
                    .col(string_null(Film::FilmingLocation))
                    .col(string_null(Film::Language))
                    .col(string_null(Film::Synopsis))
                    .col(string_null(Film::Country))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_imdb_id")
                    .table(Film::Table)
                    .col(Film::ImdbId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string(Genre::Label))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_genre_label")
                    .table(Genre::Table)
                    .col(Genre::Label)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmGenre::Table)
                    .if_not_exists()
                    .col(integer(FilmGenre::FilmId))
                    .col(integer(FilmGenre::GenreId))
                    .primary_key(
                        Index::create().col(FilmGenre::FilmId).col(FilmGenre::GenreId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DirectorFilm::Table)
                    .if_not_exists()
                    .col(pk_auto(DirectorFilm::Id))
                    .col(integer(DirectorFilm::DirectorId))
                    .col(integer(DirectorFilm::FilmId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_director_film_unique")
                    .table(DirectorFilm::Table)
                    .col(DirectorFilm::DirectorId)
                    .col(DirectorFilm::FilmId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoleFilm::Table)
                    .if_not_exists()
                    .col(pk_auto(RoleFilm::Id))
                    .col(integer(RoleFilm::ActorId))
                    .col(integer(RoleFilm::FilmId))
                    .col(string(RoleFilm::CharacterName))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_role_film_unique")
                    .table(RoleFilm::Table)
                    .col(RoleFilm::ActorId)
                    .col(RoleFilm::FilmId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RoleFilm::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(DirectorFilm::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(FilmGenre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Director::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Actor::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Actor {
    Table,
    Id,
    ImdbId,
    Name,
    BirthDate,
    BirthPlace,
    ProfileUrl,
}

#[derive(DeriveIden)]
enum Director {
    Table,
    Id,
    ImdbId,
    Name,
    BirthDate,
    BirthPlace,
    ProfileUrl,
}

#[derive(DeriveIden)]
enum Film {
    Table,
    Id,
    ImdbId,
    Title,
    ReleaseYear,
    Rating,
    ProfileUrl,
    FilmingLocation,
    Language,
    Synopsis,
    Country,
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Label,
}

#[derive(DeriveIden)]
enum FilmGenre {
    Table,
    FilmId,
    GenreId,
}

#[derive(DeriveIden)]
enum DirectorFilm {
    Table,
    Id,
    DirectorId,
    FilmId,
}

#[derive(DeriveIden)]
enum RoleFilm {
    Table,
    Id,
    ActorId,
    FilmId,
    CharacterName,
}
