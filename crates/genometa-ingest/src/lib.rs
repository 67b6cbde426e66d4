//! Genomics metadata ingestion.
//!
//! Reads the three raw input files of a run directory into [`RawTables`]:
//!
//! | Entity    | File             | Delimiter |
//! |-----------|------------------|-----------|
//! | samples   | `samples.csv`    | comma     |
//! | runs      | `runs.csv`       | comma     |
//! | qc        | `qc_metrics.tsv` | tab       |
//!
//! Every row gets the audit fields `ingested_at`, `source_file` and
//! `row_hash`. Cell text is never interpreted here.

pub mod audit;
pub mod error;
pub mod reader;

use std::path::{Path, PathBuf};

use tracing::info;

use genometa_model::{EntityKind, RawQcMetric, RawRun, RawSample, RawTables};

pub use audit::{Audited, ingestion_timestamp, row_hash};
pub use error::{IngestError, Result};
pub use reader::{delimiter_for, read_records};

/// File name expected for `entity` inside a raw directory.
pub fn file_name(entity: EntityKind) -> &'static str {
    match entity {
        EntityKind::Sample => "samples.csv",
        EntityKind::Run => "runs.csv",
        EntityKind::QcMetric => "qc_metrics.tsv",
    }
}

/// Rows read from one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestedTable {
    Samples(Vec<RawSample>),
    Runs(Vec<RawRun>),
    QcMetrics(Vec<RawQcMetric>),
}

impl IngestedTable {
    pub fn entity(&self) -> EntityKind {
        match self {
            IngestedTable::Samples(_) => EntityKind::Sample,
            IngestedTable::Runs(_) => EntityKind::Run,
            IngestedTable::QcMetrics(_) => EntityKind::QcMetric,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IngestedTable::Samples(rows) => rows.len(),
            IngestedTable::Runs(rows) => rows.len(),
            IngestedTable::QcMetrics(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_entity(path: &Path, entity: EntityKind, ingested_at: &str) -> Result<IngestedTable> {
    let table = match entity {
        EntityKind::Sample => IngestedTable::Samples(read_records(path, ingested_at)?),
        EntityKind::Run => IngestedTable::Runs(read_records(path, ingested_at)?),
        EntityKind::QcMetric => IngestedTable::QcMetrics(read_records(path, ingested_at)?),
    };
    info!(
        entity = %entity,
        rows = table.len(),
        path = %path.display(),
        "ingested"
    );
    Ok(table)
}

/// Read a single file as the given entity.
pub fn ingest_file(path: &Path, entity: EntityKind) -> Result<IngestedTable> {
    read_entity(path, entity, &ingestion_timestamp())
}

/// Read all three input files from `raw_dir`. Every row shares one
/// `ingested_at` timestamp.
pub fn ingest_all(raw_dir: &Path) -> Result<RawTables> {
    if !raw_dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: raw_dir.to_path_buf(),
        });
    }
    let ingested_at = ingestion_timestamp();
    let mut tables = RawTables::default();
    for entity in EntityKind::ALL {
        let path: PathBuf = raw_dir.join(file_name(entity));
        match read_entity(&path, entity, &ingested_at)? {
            IngestedTable::Samples(rows) => tables.samples = rows,
            IngestedTable::Runs(rows) => tables.runs = rows,
            IngestedTable::QcMetrics(rows) => tables.qc_metrics = rows,
        }
    }
    Ok(tables)
}
