use std::{collections::HashSet, path::PathBuf};

use filmvault::{
    catalog::Catalog,
    entities::{actor, director_film, film, film_genre, genre, role_film},
    error::ImportError,
    importers::{
        self, ActorMapper, DirectorFilmMapper, DirectorMapper, FilmMapper, RoleFilmMapper, Stage,
    },
    pipeline,
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, EntityTrait, PaginatorTrait};
use tempfile::TempDir;

async fn catalog() -> Catalog {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");
    Catalog::new(db)
}

fn write_source(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

const ACTOR_HEADER: &str = "idImdb;name;birthDate;birthPlace;unused;profileUrl\n";
const FILM_HEADER: &str =
    "idImdb;title;year;rating;profileUrl;location;genres;language;synopsis;country\n";

#[tokio::test]
async fn actor_row_maps_every_field() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let src = write_source(
        &dir,
        "actors.csv",
        &format!("{ACTOR_HEADER}tt001;Doe;January 1 1980;Paris;;http://x\n"),
    );

    let mut seen = HashSet::new();
    let report = pipeline::run(&ActorMapper, &catalog, &src, &mut seen).await.unwrap();

    assert_eq!(report.created, 1);
    assert!(seen.contains("tt001"));

    let actor = catalog.find_actor("tt001").await.unwrap().expect("actor persisted");
    assert_eq!(actor.name, "Doe");
    assert_eq!(actor.birth_date.as_deref(), Some("1980-01-01"));
    assert_eq!(actor.birth_place.as_deref(), Some("Paris"));
    assert_eq!(actor.profile_url.as_deref(), Some("http://x"));
}

#[tokio::test]
async fn unparseable_birth_date_leaves_field_unset() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let src = write_source(
        &dir,
        "actors.csv",
        &format!("{ACTOR_HEADER}tt002;Smith;sometime in spring;London;;http://y\n"),
    );

    let mut seen = HashSet::new();
    let report = pipeline::run(&ActorMapper, &catalog, &src, &mut seen).await.unwrap();

    assert_eq!(report.created, 1);
    let actor = catalog.find_actor("tt002").await.unwrap().unwrap();
    assert_eq!(actor.birth_date, None);
    assert_eq!(actor.name, "Smith");
}

#[tokio::test]
async fn short_actor_row_is_skipped_without_aborting() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let src = write_source(
        &dir,
        "actors.csv",
        &format!("{ACTOR_HEADER}tt003;OnlyAName\ntt004;Full;March 2 1970;Rome;;http://z\n"),
    );

    let mut seen = HashSet::new();
    let report = pipeline::run(&ActorMapper, &catalog, &src, &mut seen).await.unwrap();

    assert_eq!(report.malformed, 1);
    assert_eq!(report.created, 1);
    assert!(catalog.find_actor("tt003").await.unwrap().is_none());
    assert!(catalog.find_actor("tt004").await.unwrap().is_some());
}

#[tokio::test]
async fn duplicate_film_id_in_source_is_persisted_once() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let src = write_source(
        &dir,
        "films.csv",
        &format!(
            "{FILM_HEADER}\
             tt100;First Title;1994;R;http://p;LA;Drama;English;plot;USA\n\
             tt100;Second Title;1995;R;http://q;NY;Comedy;English;plot;USA\n"
        ),
    );

    let mut seen = HashSet::new();
    let report = pipeline::run(&FilmMapper, &catalog, &src, &mut seen).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.duplicates, 1);

    let count = film::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(count, 1);
    let film = catalog.find_film("tt100").await.unwrap().unwrap();
    assert_eq!(film.title, "First Title");
}

#[tokio::test]
async fn second_run_hits_conflict_path_and_stays_idempotent() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let src = write_source(
        &dir,
        "actors.csv",
        &format!(
            "{ACTOR_HEADER}\
             tt010;One;April 4 1960;Oslo;;http://a\n\
             tt011;Two;May 5 1961;Bergen;;http://b\n"
        ),
    );

    let mut first_seen = HashSet::new();
    let first = pipeline::run(&ActorMapper, &catalog, &src, &mut first_seen).await.unwrap();
    assert_eq!(first.created, 2);

    let mut second_seen = HashSet::new();
    let second = pipeline::run(&ActorMapper, &catalog, &src, &mut second_seen).await.unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.conflicts, 2);
    // Conflicting keys are skipped, not recorded as imported.
    assert!(second_seen.is_empty());

    let count = actor::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn short_film_row_keeps_row_with_defaults() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "films.csv", &format!("{FILM_HEADER}tt101;Sparse Film\n"));

    let mut seen = HashSet::new();
    let report = pipeline::run(&FilmMapper, &catalog, &src, &mut seen).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.malformed, 0);

    let film = catalog.find_film("tt101").await.unwrap().unwrap();
    assert_eq!(film.title, "Sparse Film");
    assert_eq!(film.release_year, None);
    assert_eq!(film.rating, None);
    assert_eq!(film.synopsis, None);
    assert_eq!(film.country, None);
}

#[tokio::test]
async fn film_genres_are_resolved_with_find_or_create() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let src = write_source(
        &dir,
        "films.csv",
        &format!(
            "{FILM_HEADER}\
             tt102;Alpha;2000;PG;http://p;LA;Drama, Thriller, Drama;English;plot;USA\n\
             tt103;Beta;2001;PG;http://q;NY;Drama, Comedy;English;plot;USA\n"
        ),
    );

    let mut seen = HashSet::new();
    let report = pipeline::run(&FilmMapper, &catalog, &src, &mut seen).await.unwrap();
    assert_eq!(report.created, 2);

    // Drama is shared, not duplicated.
    let genre_count = genre::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(genre_count, 3);

    let link_count = film_genre::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(link_count, 4);
}

#[tokio::test]
async fn synopsis_longer_than_255_chars_is_truncated() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let synopsis = "a".repeat(400);
    let src = write_source(
        &dir,
        "films.csv",
        &format!("{FILM_HEADER}tt104;Longwinded;2002;PG;;;Drama;English;{synopsis};USA\n"),
    );

    let mut seen = HashSet::new();
    pipeline::run(&FilmMapper, &catalog, &src, &mut seen).await.unwrap();

    let film = catalog.find_film("tt104").await.unwrap().unwrap();
    assert_eq!(film.synopsis.unwrap().chars().count(), 255);
}

#[tokio::test]
async fn role_row_with_unknown_actor_is_skipped() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();

    let films = write_source(
        &dir,
        "films.csv",
        &format!("{FILM_HEADER}tt200;Known Film;2003;PG;;;Drama;English;plot;USA\n"),
    );
    let mut seen = HashSet::new();
    pipeline::run(&FilmMapper, &catalog, &films, &mut seen).await.unwrap();

    // Actor tt300 was never imported.
    let roles = write_source(&dir, "roles.csv", "filmId;actorId;character\ntt200;tt300;Hero\n");
    let mut seen = HashSet::new();
    let report = pipeline::run(&RoleFilmMapper, &catalog, &roles, &mut seen).await.unwrap();

    assert_eq!(report.missing_references, 1);
    assert_eq!(report.created, 0);
    let count = role_film::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn role_rows_keep_one_role_per_actor_film_pair() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();

    let actors = write_source(
        &dir,
        "actors.csv",
        &format!("{ACTOR_HEADER}tt301;Lee;June 6 1970;Hong Kong;;http://a\n"),
    );
    let films = write_source(
        &dir,
        "films.csv",
        &format!("{FILM_HEADER}tt201;Double Role;2004;PG;;;Action;English;plot;USA\n"),
    );
    let mut seen = HashSet::new();
    pipeline::run(&ActorMapper, &catalog, &actors, &mut seen).await.unwrap();
    let mut seen = HashSet::new();
    pipeline::run(&FilmMapper, &catalog, &films, &mut seen).await.unwrap();

    let roles = write_source(
        &dir,
        "roles.csv",
        "filmId;actorId;character\ntt201;tt301;Hero\ntt201;tt301;Villain\n",
    );
    let mut seen = HashSet::new();
    let report = pipeline::run(&RoleFilmMapper, &catalog, &roles, &mut seen).await.unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.duplicates, 1);

    let persisted = role_film::Entity::find().all(catalog.db()).await.unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].character_name, "Hero");
}

#[tokio::test]
async fn director_film_link_resolves_both_sides() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();

    let directors = write_source(
        &dir,
        "directors.csv",
        "idImdb;name;birthDate;birthPlace;profileUrl\n\
         tt400;Kurosawa;March 23 1910;Tokyo;http://d\n",
    );
    let films = write_source(
        &dir,
        "films.csv",
        &format!("{FILM_HEADER}tt202;Masterpiece;1954;PG;;;Drama;Japanese;plot;Japan\n"),
    );
    let mut seen = HashSet::new();
    pipeline::run(&DirectorMapper, &catalog, &directors, &mut seen).await.unwrap();
    let mut seen = HashSet::new();
    pipeline::run(&FilmMapper, &catalog, &films, &mut seen).await.unwrap();

    let links = write_source(&dir, "film_directors.csv", "filmId;directorId\ntt202;tt400\n");
    let mut seen = HashSet::new();
    let report = pipeline::run(&DirectorFilmMapper, &catalog, &links, &mut seen).await.unwrap();
    assert_eq!(report.created, 1);
    assert!(seen.contains("tt400_tt202"));

    let link = director_film::Entity::find().one(catalog.db()).await.unwrap().unwrap();
    let director = catalog.find_director("tt400").await.unwrap().unwrap();
    let film = catalog.find_film("tt202").await.unwrap().unwrap();
    assert_eq!(link.director_id, director.id);
    assert_eq!(link.film_id, film.id);

    // Replaying the link source hits the unique pair constraint.
    let mut seen = HashSet::new();
    let replay = pipeline::run(&DirectorFilmMapper, &catalog, &links, &mut seen).await.unwrap();
    assert_eq!(replay.created, 0);
    assert_eq!(replay.conflicts, 1);
}

#[tokio::test]
async fn unreadable_source_is_an_error() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");

    let mut seen = HashSet::new();
    let err = pipeline::run(&ActorMapper, &catalog, &missing, &mut seen).await.unwrap_err();
    assert!(matches!(err, ImportError::SourceUnreadable { .. }));
}

#[tokio::test]
async fn run_all_isolates_unreadable_sources() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();

    // Only the actor dataset exists; every other stage fails to open its
    // source but the run still completes.
    write_source(
        &dir,
        "actors.csv",
        &format!("{ACTOR_HEADER}tt500;Solo;July 7 1977;Berlin;;http://s\n"),
    );

    let summary = importers::run_all(&catalog, dir.path()).await;

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].0, Stage::Actors);
    assert_eq!(summary.reports[0].1.created, 1);
    assert_eq!(summary.failed.len(), 4);
    assert!(catalog.find_actor("tt500").await.unwrap().is_some());
}

#[tokio::test]
async fn run_all_imports_a_full_dataset_in_order() {
    let catalog = catalog().await;
    let dir = TempDir::new().unwrap();

    write_source(
        &dir,
        "actors.csv",
        &format!("{ACTOR_HEADER}tt600;Hepburn;May 4 1929;Brussels;;http://a\n"),
    );
    write_source(
        &dir,
        "films.csv",
        &format!("{FILM_HEADER}tt601;Roman Holiday;1953;PG;;Rome;Romance, Comedy;English;plot;USA\n"),
    );
    write_source(
        &dir,
        "directors.csv",
        "idImdb;name;birthDate;birthPlace;profileUrl\n\
         tt602;Wyler;July 1 1902;Mulhouse;http://d\n",
    );
    write_source(&dir, "film_directors.csv", "filmId;directorId\ntt601;tt602\n");
    write_source(&dir, "roles.csv", "filmId;actorId;character\ntt601;tt600;Princess Ann\n");

    let summary = importers::run_all(&catalog, dir.path()).await;

    assert!(summary.failed.is_empty());
    assert_eq!(summary.reports.len(), 5);
    for (_, report) in &summary.reports {
        assert_eq!(report.created, 1);
    }

    let role = role_film::Entity::find().one(catalog.db()).await.unwrap().unwrap();
    assert_eq!(role.character_name, "Princess Ann");
    let link_count = director_film::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(link_count, 1);
}
