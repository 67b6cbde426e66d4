//! Columnar frames for curated records.
//!
//! Partition columns are not stored inside partition files; they are
//! encoded in the directory path instead.

use chrono::{Datelike, NaiveDate};
use polars::prelude::{Column, DataFrame, DataType, PolarsResult};

use genometa_model::{AuditFields, QcMetric, Run, Sample};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn text<T, F>(name: &str, rows: &[&T], get: F) -> Column
where
    F: Fn(&T) -> Option<&str>,
{
    let values: Vec<Option<&str>> = rows.iter().map(|row| get(*row)).collect();
    Column::new(name.into(), values)
}

fn audit_columns<T, F>(rows: &[&T], audit: F) -> Vec<Column>
where
    F: Fn(&T) -> &AuditFields,
{
    vec![
        text(
            "ingested_at",
            rows,
            |row| Some(audit(row).ingested_at.as_str()),
        ),
        text(
            "source_file",
            rows,
            |row| Some(audit(row).source_file.as_str()),
        ),
        text("row_hash", rows, |row| Some(audit(row).row_hash.as_str())),
    ]
}

/// `dim_samples`: every sample column plus audit fields.
pub fn samples_frame(samples: &[&Sample]) -> PolarsResult<DataFrame> {
    let dates: Vec<Option<i32>> = samples
        .iter()
        .map(|sample| sample.collection_date.map(epoch_days))
        .collect();
    let mut columns = vec![
        text("sample_id", samples, |s| Some(s.sample_id.as_str())),
        text("project_id", samples, |s| s.project_id.as_deref()),
        text("organism", samples, |s| s.organism.as_deref()),
        Column::new("collection_date".into(), dates).cast(&DataType::Date)?,
        text("tissue", samples, |s| s.tissue.as_deref()),
        text("platform", samples, |s| s.platform.map(|p| p.as_str())),
    ];
    columns.extend(audit_columns(samples, |s| &s.audit));
    DataFrame::new(columns)
}

/// `fact_runs` partition file: run columns without `project_id`/`platform`.
pub fn runs_frame(runs: &[&Run]) -> PolarsResult<DataFrame> {
    let read_length: Vec<Option<i64>> = runs.iter().map(|run| run.read_length).collect();
    let fastq_gb: Vec<Option<f64>> = runs.iter().map(|run| run.fastq_gb).collect();
    let mut columns = vec![
        text("run_id", runs, |r| Some(r.run_id.as_str())),
        text("sample_id", runs, |r| r.sample_id.as_deref()),
        text("library_layout", runs, |r| r.library_layout.map(|l| l.as_str())),
        Column::new("read_length".into(), read_length),
        Column::new("fastq_gb".into(), fastq_gb),
        text("md5_1", runs, |r| r.md5_1.as_deref()),
        text("md5_2", runs, |r| r.md5_2.as_deref()),
    ];
    columns.extend(audit_columns(runs, |r| &r.audit));
    DataFrame::new(columns)
}

/// `fact_qc_metrics` partition file: QC columns without `project_id`.
pub fn qc_metrics_frame(qc_metrics: &[&QcMetric]) -> PolarsResult<DataFrame> {
    let total_reads: Vec<Option<i64>> = qc_metrics.iter().map(|qc| qc.total_reads).collect();
    let q30_rate: Vec<Option<f64>> = qc_metrics.iter().map(|qc| qc.q30_rate).collect();
    let gc_percent: Vec<Option<f64>> = qc_metrics.iter().map(|qc| qc.gc_percent).collect();
    let duplication_rate: Vec<Option<f64>> =
        qc_metrics.iter().map(|qc| qc.duplication_rate).collect();
    let adapter_flag: Vec<bool> = qc_metrics
        .iter()
        .map(|qc| qc.adapter_content_flag)
        .collect();
    let mut columns = vec![
        text("run_id", qc_metrics, |q| Some(q.run_id.as_str())),
        Column::new("total_reads".into(), total_reads),
        Column::new("q30_rate".into(), q30_rate),
        Column::new("gc_percent".into(), gc_percent),
        Column::new("duplication_rate".into(), duplication_rate),
        Column::new("adapter_content_flag".into(), adapter_flag),
    ];
    columns.extend(audit_columns(qc_metrics, |q| &q.audit));
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_days_matches_unix_epoch() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(epoch_days(epoch), 0);
        let later = NaiveDate::from_ymd_opt(1970, 1, 31).unwrap();
        assert_eq!(epoch_days(later), 30);
    }
}
