//! Tests for Parquet and quarantine writers.

use std::fs::{self, File};
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use tempfile::TempDir;

use genometa_model::{
    AuditFields, CuratedTables, EntityKind, LibraryLayout, Platform, QcMetric, QuarantineSet,
    QuarantinedRow, RawRun, RowRef, Run, RuleId, Sample, Severity, Violation, ViolationKind,
};
use genometa_output::{
    HIVE_DEFAULT_PARTITION, VIOLATIONS_FILE, jsonl_file_name, write_curated, write_quarantine,
};

fn audit() -> AuditFields {
    AuditFields {
        ingested_at: "2025-01-01T00:00:00.000000Z".to_string(),
        source_file: "samples.csv".to_string(),
        row_hash: "ab".repeat(32),
    }
}

fn sample(id: &str, project: Option<&str>, platform: Option<Platform>) -> Sample {
    Sample {
        sample_id: id.to_string(),
        project_id: project.map(str::to_string),
        organism: Some("Homo sapiens".to_string()),
        collection_date: NaiveDate::from_ymd_opt(2024, 2, 1),
        tissue: None,
        platform,
        audit: audit(),
    }
}

fn run(id: &str, sample_id: &str) -> Run {
    Run {
        run_id: id.to_string(),
        sample_id: Some(sample_id.to_string()),
        library_layout: Some(LibraryLayout::Paired),
        read_length: Some(150),
        fastq_gb: Some(2.5),
        md5_1: None,
        md5_2: None,
        audit: audit(),
    }
}

fn qc(run_id: &str) -> QcMetric {
    QcMetric {
        run_id: run_id.to_string(),
        total_reads: Some(1_000),
        q30_rate: Some(0.9),
        gc_percent: Some(40.0),
        duplication_rate: None,
        adapter_content_flag: true,
        audit: audit(),
    }
}

fn read_parquet(path: &Path) -> DataFrame {
    let file = File::open(path).expect("open parquet");
    ParquetReader::new(file).finish().expect("read parquet")
}

fn curated() -> CuratedTables {
    CuratedTables {
        samples: vec![
            sample("S1", Some("P1"), Some(Platform::Illumina)),
            sample("S2", Some("P1"), Some(Platform::Nanopore)),
            sample("S3", None, Some(Platform::Illumina)),
        ],
        runs: vec![run("R1", "S1"), run("R2", "S1"), run("R3", "S2"), run("R4", "S3")],
        qc_metrics: vec![qc("R1"), qc("R3"), qc("R4")],
    }
}

#[test]
fn samples_dimension_is_unpartitioned() {
    let dir = TempDir::new().expect("temp dir");
    write_curated(&curated(), dir.path()).expect("write");

    let df = read_parquet(&dir.path().join("dim_samples.parquet"));
    assert_eq!(df.height(), 3);
    assert_eq!(
        df.column("collection_date").expect("column").dtype(),
        &DataType::Date
    );
    let platform = df.column("platform").expect("column");
    assert_eq!(platform.str().expect("str").get(1), Some("NANOPORE"));
    assert!(df.column("row_hash").is_ok());
}

#[test]
fn runs_are_partitioned_by_project_and_platform() {
    let dir = TempDir::new().expect("temp dir");
    let written = write_curated(&curated(), dir.path()).expect("write");

    let runs_root = dir.path().join("fact_runs");
    let p1_illumina = runs_root.join("project_id=P1/platform=ILLUMINA/part-0.parquet");
    let p1_nanopore = runs_root.join("project_id=P1/platform=NANOPORE/part-0.parquet");
    let default = runs_root
        .join(format!("project_id={HIVE_DEFAULT_PARTITION}"))
        .join("platform=ILLUMINA/part-0.parquet");

    let df = read_parquet(&p1_illumina);
    assert_eq!(df.height(), 2);
    assert!(df.column("project_id").is_err());
    assert!(df.column("platform").is_err());
    assert_eq!(read_parquet(&p1_nanopore).height(), 1);
    assert_eq!(read_parquet(&default).height(), 1);

    let total: usize = written.iter().map(|file| file.rows).sum();
    assert_eq!(total, 3 + 4 + 3);
}

#[test]
fn qc_metrics_take_project_through_run_and_sample() {
    let dir = TempDir::new().expect("temp dir");
    write_curated(&curated(), dir.path()).expect("write");

    let qc_root = dir.path().join("fact_qc_metrics");
    let p1 = read_parquet(&qc_root.join("project_id=P1/part-0.parquet"));
    assert_eq!(p1.height(), 2);
    let flags = p1.column("adapter_content_flag").expect("column");
    assert_eq!(flags.bool().expect("bool").get(0), Some(true));
    let orphan = qc_root
        .join(format!("project_id={HIVE_DEFAULT_PARTITION}"))
        .join("part-0.parquet");
    assert_eq!(read_parquet(&orphan).height(), 1);
}

fn partition_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn rewrite_drops_partitions_of_the_previous_write() {
    let dir = TempDir::new().expect("temp dir");
    let mut first = curated();
    for sample in &mut first.samples {
        sample.project_id = Some("P_OLD".to_string());
    }
    write_curated(&first, dir.path()).expect("first write");

    let mut second = curated();
    second.samples.truncate(1);
    second.samples[0].project_id = Some("P_NEW".to_string());
    second.runs.truncate(1);
    second.qc_metrics.truncate(1);
    let written = write_curated(&second, dir.path()).expect("second write");

    assert_eq!(
        partition_names(&dir.path().join("fact_runs")),
        vec!["project_id=P_NEW".to_string()]
    );
    assert_eq!(
        partition_names(&dir.path().join("fact_qc_metrics")),
        vec!["project_id=P_NEW".to_string()]
    );
    assert_eq!(read_parquet(&dir.path().join("dim_samples.parquet")).height(), 1);
    let total: usize = written.iter().map(|file| file.rows).sum();
    assert_eq!(total, 3);
}

#[test]
fn empty_tables_still_write_the_dimension() {
    let dir = TempDir::new().expect("temp dir");
    let written = write_curated(&CuratedTables::default(), dir.path()).expect("write");
    assert_eq!(written.len(), 1);
    assert_eq!(read_parquet(&written[0].path).height(), 0);
}

#[test]
fn quarantine_writes_jsonl_and_violation_list() {
    let dir = TempDir::new().expect("temp dir");
    let violation = Violation {
        entity: EntityKind::Run,
        row: RowRef::new(1, Some("R9".to_string())),
        column: "read_length".to_string(),
        value: Some("-1".to_string()),
        kind: ViolationKind::OutOfRange,
        rule: RuleId::RunReadLength,
        severity: Severity::Hard,
        message: "read_length must be > 0".to_string(),
        cascaded_from: None,
    };
    let set = QuarantineSet {
        runs: vec![QuarantinedRow {
            index: 1,
            row: RawRun {
                run_id: "R9".to_string(),
                read_length: "-1".to_string(),
                ..RawRun::default()
            },
            violations: vec![violation.clone()],
        }],
        ..QuarantineSet::default()
    };

    let out = dir.path().join("quarantine");
    let files = write_quarantine(&set, std::slice::from_ref(&violation), &out).expect("write");
    assert_eq!(files.len(), 4);

    let runs = fs::read_to_string(out.join(jsonl_file_name(EntityKind::Run))).expect("read");
    let lines: Vec<&str> = runs.lines().collect();
    assert_eq!(lines.len(), 1);
    let line: serde_json::Value = serde_json::from_str(lines[0]).expect("json");
    assert_eq!(line["index"], 1);
    assert_eq!(line["row"]["run_id"], "R9");
    assert_eq!(line["violations"][0]["kind"], "OUT_OF_RANGE");

    let samples = fs::read_to_string(out.join("samples.jsonl")).expect("read");
    assert!(samples.is_empty());

    let all: Vec<Violation> =
        serde_json::from_str(&fs::read_to_string(out.join(VIOLATIONS_FILE)).expect("read"))
            .expect("json");
    assert_eq!(all, vec![violation]);
}
