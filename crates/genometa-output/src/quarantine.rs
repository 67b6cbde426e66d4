//! Quarantine side files.
//!
//! One JSON Lines file per entity, each line a rejected raw row with its
//! input index and full violation list, plus `violations.json` holding the
//! complete ordered violation list of the invocation.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use genometa_model::{EntityKind, QuarantineSet, QuarantinedRow, Violation};

use crate::error::{OutputError, Result};

pub const VIOLATIONS_FILE: &str = "violations.json";

/// File name of the JSON Lines side file for `entity`.
pub fn jsonl_file_name(entity: EntityKind) -> String {
    format!("{}.jsonl", entity.table_name())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_jsonl<T: Serialize>(path: &Path, rows: &[QuarantinedRow<T>]) -> Result<()> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        serde_json::to_writer(&mut writer, row).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.write_all(b"\n").map_err(io_error(path))?;
    }
    writer.flush().map_err(io_error(path))
}

/// Persist quarantined rows and the violation list under `dir`.
pub fn write_quarantine(
    set: &QuarantineSet,
    violations: &[Violation],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let samples = dir.join(jsonl_file_name(EntityKind::Sample));
    write_jsonl(&samples, &set.samples)?;
    let runs = dir.join(jsonl_file_name(EntityKind::Run));
    write_jsonl(&runs, &set.runs)?;
    let qc_metrics = dir.join(jsonl_file_name(EntityKind::QcMetric));
    write_jsonl(&qc_metrics, &set.qc_metrics)?;

    let violations_path = dir.join(VIOLATIONS_FILE);
    let file = File::create(&violations_path).map_err(io_error(&violations_path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, violations).map_err(|source| {
        OutputError::Json {
            path: violations_path.clone(),
            source,
        }
    })?;
    writer.flush().map_err(io_error(&violations_path))?;

    info!(
        rows = set.total_rows(),
        violations = violations.len(),
        dir = %dir.display(),
        "quarantine written"
    );
    Ok(vec![samples, runs, qc_metrics, violations_path])
}
