use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a single import stage. Everything milder (short rows,
/// unparseable fields, uniqueness conflicts, dangling references) is logged
/// and counted in the stage report instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read source {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid csv record: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

pub type ImportResult<T> = Result<T, ImportError>;
