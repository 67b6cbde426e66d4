//! Curated table writer.
//!
//! Layout under the output directory:
//!
//! ```text
//! dim_samples.parquet
//! fact_runs/project_id=<p>/platform=<pl>/part-0.parquet
//! fact_qc_metrics/project_id=<p>/part-0.parquet
//! ```
//!
//! Runs take `project_id` and `platform` from their sample; QC records take
//! `project_id` through run and sample. Missing partition values go to
//! [`HIVE_DEFAULT_PARTITION`].
//!
//! Every write replaces the previous one: the dimension file and both fact
//! directories are removed first, so no partition outlives the run that
//! produced it.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, ParquetCompression, ParquetWriter, PolarsResult};
use serde::Serialize;
use tracing::{debug, info};

use genometa_model::{CuratedTables, QcMetric, Run, Sample};

use crate::error::{OutputError, Result};
use crate::frames::{qc_metrics_frame, runs_frame, samples_frame};

pub const HIVE_DEFAULT_PARTITION: &str = "__HIVE_DEFAULT_PARTITION__";
pub const SAMPLES_FILE: &str = "dim_samples.parquet";
pub const RUNS_DIR: &str = "fact_runs";
pub const QC_METRICS_DIR: &str = "fact_qc_metrics";
const PART_FILE: &str = "part-0.parquet";

/// One Parquet file written by [`write_curated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub rows: usize,
}

/// Escape a partition value for use in a `key=value` directory name.
pub fn hive_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '/' | '\\' | '=' | '%' | ':' | '#' | '?' | '*' | '"' | '\'' | '[' | ']' | '{'
            | '}' | '^' => escaped.push_str(&format!("%{:02X}", ch as u32)),
            ch if ch.is_control() => escaped.push_str(&format!("%{:02X}", ch as u32)),
            ch => escaped.push(ch),
        }
    }
    escaped
}

fn partition_segment(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => format!("{key}={}", hive_escape(value)),
        _ => format!("{key}={HIVE_DEFAULT_PARTITION}"),
    }
}

fn write_frame(
    table: &'static str,
    path: &Path,
    frame: PolarsResult<DataFrame>,
) -> Result<WrittenFile> {
    let mut frame = frame.map_err(|source| OutputError::Frame { table, source })?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .finish(&mut frame)
        .map_err(|source| OutputError::Parquet {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(table, rows = frame.height(), path = %path.display(), "parquet written");
    Ok(WrittenFile {
        path: path.to_path_buf(),
        rows: frame.height(),
    })
}

fn remove_if_present(path: &Path) -> Result<()> {
    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match removed {
        Ok(()) => {
            debug!(path = %path.display(), "previous output removed");
            Ok(())
        }
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(OutputError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Remove the files a previous [`write_curated`] left under `out_dir`.
/// Anything else in the directory is left alone.
pub fn clear_curated(out_dir: &Path) -> Result<()> {
    remove_if_present(&out_dir.join(SAMPLES_FILE))?;
    remove_if_present(&out_dir.join(RUNS_DIR))?;
    remove_if_present(&out_dir.join(QC_METRICS_DIR))
}

/// Write curated tables as Parquet under `out_dir`, replacing any earlier
/// output there.
pub fn write_curated(tables: &CuratedTables, out_dir: &Path) -> Result<Vec<WrittenFile>> {
    clear_curated(out_dir)?;

    let samples_by_id: HashMap<&str, &Sample> = tables
        .samples
        .iter()
        .map(|sample| (sample.sample_id.as_str(), sample))
        .collect();
    let sample_of_run: HashMap<&str, &Sample> = tables
        .runs
        .iter()
        .filter_map(|run| {
            let sample = samples_by_id.get(run.sample_id.as_deref()?)?;
            Some((run.run_id.as_str(), *sample))
        })
        .collect();

    let mut written = Vec::new();

    let samples: Vec<&Sample> = tables.samples.iter().collect();
    written.push(write_frame(
        "dim_samples",
        &out_dir.join(SAMPLES_FILE),
        samples_frame(&samples),
    )?);

    let mut runs_by_partition: BTreeMap<(Option<&str>, Option<&str>), Vec<&Run>> =
        BTreeMap::new();
    for run in &tables.runs {
        let sample = run
            .sample_id
            .as_deref()
            .and_then(|id| samples_by_id.get(id));
        let project = sample.and_then(|s| s.project_id.as_deref());
        let platform = sample.and_then(|s| s.platform.map(|p| p.as_str()));
        runs_by_partition
            .entry((project, platform))
            .or_default()
            .push(run);
    }
    for ((project, platform), runs) in &runs_by_partition {
        let path = out_dir
            .join(RUNS_DIR)
            .join(partition_segment("project_id", *project))
            .join(partition_segment("platform", *platform))
            .join(PART_FILE);
        written.push(write_frame("fact_runs", &path, runs_frame(runs))?);
    }

    let mut qc_by_partition: BTreeMap<Option<&str>, Vec<&QcMetric>> = BTreeMap::new();
    for qc in &tables.qc_metrics {
        let project = sample_of_run
            .get(qc.run_id.as_str())
            .and_then(|sample| sample.project_id.as_deref());
        qc_by_partition.entry(project).or_default().push(qc);
    }
    for (project, qc_metrics) in &qc_by_partition {
        let path = out_dir
            .join(QC_METRICS_DIR)
            .join(partition_segment("project_id", *project))
            .join(PART_FILE);
        written.push(write_frame(
            "fact_qc_metrics",
            &path,
            qc_metrics_frame(qc_metrics),
        )?);
    }

    info!(
        files = written.len(),
        rows = tables.total_rows(),
        out_dir = %out_dir.display(),
        "curated tables written"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_values_are_escaped() {
        assert_eq!(hive_escape("P1"), "P1");
        assert_eq!(hive_escape("a/b=c"), "a%2Fb%3Dc");
        assert_eq!(
            partition_segment("project_id", None),
            "project_id=__HIVE_DEFAULT_PARTITION__"
        );
        assert_eq!(
            partition_segment("platform", Some("ILLUMINA")),
            "platform=ILLUMINA"
        );
    }
}
