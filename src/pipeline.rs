use std::{collections::HashSet, future::Future, path::Path};

use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    error::{ImportError, ImportResult},
};

/// How a single well-formed row ended up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowOutcome {
    Created,
    /// Storage already holds a record with this key (earlier run or
    /// concurrent writer); the row is skipped, never retried.
    Conflict,
    /// An association row whose referenced entities are not all in storage.
    MissingReference,
}

/// One importer configuration: where the dedup key lives in the row and how
/// the row maps to a persisted entity.
pub trait RecordMapper {
    /// Stage name used in log output.
    fn label(&self) -> &'static str;

    /// Rows with fewer fields are rejected as malformed.
    fn min_fields(&self) -> usize;

    /// Only called once the row has at least `min_fields` fields.
    fn dedup_key(&self, fields: &[&str]) -> String;

    fn persist(
        &self,
        catalog: &Catalog,
        fields: &[&str],
    ) -> impl Future<Output = ImportResult<RowOutcome>>;
}

/// Counters for one pipeline run over one source file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImportReport {
    pub created: usize,
    pub duplicates: usize,
    pub conflicts: usize,
    pub malformed: usize,
    pub missing_references: usize,
}

/// Reads the whole source once: header discarded, each row split on `;`,
/// deduplicated against `seen`, then mapped and persisted. The seen set is
/// owned by the caller so a run (or a test) can inspect it afterwards.
pub async fn run<M: RecordMapper>(
    mapper: &M,
    catalog: &Catalog,
    path: &Path,
    seen: &mut HashSet<String>,
) -> ImportResult<ImportReport> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|source| {
        ImportError::SourceUnreadable { path: path.to_path_buf(), source }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .has_headers(true)
        .from_reader(raw.as_bytes());

    let mut report = ImportReport::default();

    for record in reader.records() {
        let record = record?;
        let fields: Vec<&str> = record.iter().collect();

        if fields.len() < mapper.min_fields() {
            warn!(
                stage = mapper.label(),
                fields = fields.len(),
                required = mapper.min_fields(),
                "row has too few fields, skipping"
            );
            report.malformed += 1;
            continue;
        }

        let key = mapper.dedup_key(&fields);
        if seen.contains(&key) {
            debug!(stage = mapper.label(), key = %key, "duplicate key in source, skipping");
            report.duplicates += 1;
            continue;
        }

        match mapper.persist(catalog, &fields).await? {
            RowOutcome::Created => {
                seen.insert(key);
                report.created += 1;
            },
            RowOutcome::Conflict => {
                warn!(stage = mapper.label(), key = %key, "already persisted, skipping");
                report.conflicts += 1;
            },
            RowOutcome::MissingReference => {
                warn!(
                    stage = mapper.label(),
                    key = %key,
                    "referenced entity not found, skipping"
                );
                report.missing_references += 1;
            },
        }
    }

    Ok(report)
}
