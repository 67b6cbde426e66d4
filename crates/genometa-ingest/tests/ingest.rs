//! Tests for file ingestion.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use genometa_ingest::{IngestError, IngestedTable, delimiter_for, ingest_all, ingest_file};
use genometa_model::EntityKind;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write fixture");
}

fn raw_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "samples.csv",
        "Sample_ID, Project_ID ,organism,collection_date,tissue,PLATFORM\n\
         S1,P1,Homo sapiens,2024-01-02,blood,illumina\n\
         S2,P1, Mus musculus ,NA,liver,NANOPORE\n",
    );
    write(
        dir.path(),
        "runs.csv",
        "run_id,sample_id,library_layout,read_length,fastq_gb,md5_1,md5_2\n\
         R1,S1,PAIRED,150,2.5,abc,def\n",
    );
    write(
        dir.path(),
        "qc_metrics.tsv",
        "run_id\ttotal_reads\tq30_rate\tgc_percent\tduplication_rate\tadapter_content_flag\n\
         R1\t1000\t0.9\t41\t0.1\tyes\n",
    );
    dir
}

#[test]
fn ingest_all_reads_three_tables() {
    let dir = raw_dir();
    let tables = ingest_all(dir.path()).expect("ingest");
    assert_eq!(tables.samples.len(), 2);
    assert_eq!(tables.runs.len(), 1);
    assert_eq!(tables.qc_metrics.len(), 1);

    // Headers are normalized, cells are not.
    assert_eq!(tables.samples[0].project_id, "P1");
    assert_eq!(tables.samples[0].platform, "illumina");
    assert_eq!(tables.samples[1].organism, " Mus musculus ");
    assert_eq!(tables.samples[1].collection_date, "NA");
    assert_eq!(tables.qc_metrics[0].adapter_content_flag, "yes");
}

#[test]
fn audit_fields_are_attached() {
    let dir = raw_dir();
    let tables = ingest_all(dir.path()).expect("ingest");
    let first = &tables.samples[0].audit;
    let second = &tables.samples[1].audit;

    assert_eq!(first.source_file, "samples.csv");
    assert_eq!(tables.qc_metrics[0].audit.source_file, "qc_metrics.tsv");
    assert_eq!(first.row_hash.len(), 64);
    assert_ne!(first.row_hash, second.row_hash);
    assert!(!first.ingested_at.is_empty());
    assert_eq!(first.ingested_at, tables.runs[0].audit.ingested_at);
}

#[test]
fn row_hash_is_stable_across_invocations() {
    let dir = raw_dir();
    let first = ingest_all(dir.path()).expect("ingest");
    let second = ingest_all(dir.path()).expect("ingest");
    assert_eq!(
        first.runs[0].audit.row_hash,
        second.runs[0].audit.row_hash
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = raw_dir();
    fs::remove_file(dir.path().join("runs.csv")).expect("remove");
    let err = ingest_all(dir.path()).expect_err("missing runs");
    assert!(matches!(err, IngestError::FileNotFound { ref path } if path.ends_with("runs.csv")));
}

#[test]
fn missing_directory_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = ingest_all(&dir.path().join("absent")).expect_err("no dir");
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn missing_key_column_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "runs.csv", "sample_id,read_length\nS1,150\n");
    let err = ingest_file(&dir.path().join("runs.csv"), EntityKind::Run).expect_err("no key");
    assert!(matches!(
        err,
        IngestError::MissingColumn {
            column: "run_id",
            ..
        }
    ));
}

#[test]
fn absent_columns_read_as_empty() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "runs.csv", "run_id,extra\nR1,ignored\nR2\n");
    let table = ingest_file(&dir.path().join("runs.csv"), EntityKind::Run).expect("ingest");
    let IngestedTable::Runs(rows) = table else {
        panic!("expected runs");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].read_length, "");
    assert_eq!(rows[1].run_id, "R2");
}

#[test]
fn delimiter_follows_extension() {
    assert_eq!(delimiter_for(Path::new("qc_metrics.tsv")), b'\t');
    assert_eq!(delimiter_for(Path::new("QC.TSV")), b'\t');
    assert_eq!(delimiter_for(Path::new("samples.csv")), b',');
    assert_eq!(delimiter_for(Path::new("noext")), b',');
}
