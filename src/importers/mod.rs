mod actors;
mod director_films;
mod directors;
mod films;
mod role_films;

use std::{collections::HashSet, path::Path};

use jiff::civil::Date;
use tracing::{error, info, warn};

pub use crate::importers::{
    actors::ActorMapper, director_films::DirectorFilmMapper, directors::DirectorMapper,
    films::FilmMapper, role_films::RoleFilmMapper,
};
use crate::{catalog::Catalog, pipeline, pipeline::ImportReport};

/// The five import stages. Link stages can only resolve their references
/// once the entity stages have run, hence the fixed order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Actors,
    Films,
    Directors,
    DirectorFilms,
    RoleFilms,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::Actors,
        Stage::Films,
        Stage::Directors,
        Stage::DirectorFilms,
        Stage::RoleFilms,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Actors => "actors",
            Stage::Films => "films",
            Stage::Directors => "directors",
            Stage::DirectorFilms => "director-films",
            Stage::RoleFilms => "role-films",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Stage::Actors => "actors.csv",
            Stage::Films => "films.csv",
            Stage::Directors => "directors.csv",
            Stage::DirectorFilms => "film_directors.csv",
            Stage::RoleFilms => "roles.csv",
        }
    }

    /// Stages whose entities must already be in storage when this one runs.
    pub fn depends_on(self) -> &'static [Stage] {
        match self {
            Stage::Actors | Stage::Films | Stage::Directors => &[],
            Stage::DirectorFilms => &[Stage::Directors, Stage::Films],
            Stage::RoleFilms => &[Stage::Actors, Stage::Films],
        }
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<(Stage, ImportReport)>,
    pub failed: Vec<Stage>,
}

/// Runs every stage in `Stage::ORDER` with a fresh seen set. A stage whose
/// source cannot be read (or whose storage errors out) is logged and the
/// remaining stages still run; link rows that depended on it resolve to
/// nothing and are skipped by their own stage.
pub async fn run_all(catalog: &Catalog, dataset_dir: &Path) -> RunSummary {
    let mut summary = RunSummary::default();

    for stage in Stage::ORDER {
        let path = dataset_dir.join(stage.file_name());
        let mut seen = HashSet::new();
        info!(stage = stage.label(), path = %path.display(), "importing");

        let result = match stage {
            Stage::Actors => pipeline::run(&ActorMapper, catalog, &path, &mut seen).await,
            Stage::Films => pipeline::run(&FilmMapper, catalog, &path, &mut seen).await,
            Stage::Directors => pipeline::run(&DirectorMapper, catalog, &path, &mut seen).await,
            Stage::DirectorFilms => {
                pipeline::run(&DirectorFilmMapper, catalog, &path, &mut seen).await
            },
            Stage::RoleFilms => pipeline::run(&RoleFilmMapper, catalog, &path, &mut seen).await,
        };

        match result {
            Ok(report) => {
                info!(
                    stage = stage.label(),
                    created = report.created,
                    duplicates = report.duplicates,
                    conflicts = report.conflicts,
                    malformed = report.malformed,
                    missing_references = report.missing_references,
                    "stage finished"
                );
                summary.reports.push((stage, report));
            },
            Err(err) => {
                error!(stage = stage.label(), error = %err, "stage failed, continuing");
                summary.failed.push(stage);
            },
        }
    }

    summary
}

/// Source birth dates look like "January 1 1980". A value that does not
/// parse is logged and left unset; the row is still imported.
pub(crate) fn parse_birth_date(raw: &str) -> Option<String> {
    match Date::strptime("%B %d %Y", raw.trim()) {
        Ok(date) => Some(date.to_string()),
        Err(err) => {
            warn!(raw, error = %err, "unparseable birth date, leaving unset");
            None
        },
    }
}

/// Empty source fields become NULL rather than empty strings.
pub(crate) fn optional(field: &str) -> Option<String> {
    if field.is_empty() { None } else { Some(field.to_string()) }
}
