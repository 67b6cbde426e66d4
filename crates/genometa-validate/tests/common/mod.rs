#![allow(dead_code)]

use chrono::NaiveDate;

use genometa_model::{RawQcMetric, RawRun, RawSample, RawTables};
use genometa_validate::RuleCatalog;

pub fn catalog() -> RuleCatalog {
    RuleCatalog::standard_as_of(reference_date())
}

pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

pub fn sample(sample_id: &str) -> RawSample {
    RawSample {
        sample_id: sample_id.to_string(),
        project_id: "P1".to_string(),
        organism: "Homo sapiens".to_string(),
        collection_date: "2024-06-01".to_string(),
        tissue: "blood".to_string(),
        platform: "ILLUMINA".to_string(),
        ..RawSample::default()
    }
}

pub fn run(run_id: &str, sample_id: &str) -> RawRun {
    RawRun {
        run_id: run_id.to_string(),
        sample_id: sample_id.to_string(),
        library_layout: "PAIRED".to_string(),
        read_length: "150".to_string(),
        fastq_gb: "2.5".to_string(),
        md5_1: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        md5_2: "d41d8cd98f00b204e9800998ecf8427f".to_string(),
        ..RawRun::default()
    }
}

pub fn qc(run_id: &str) -> RawQcMetric {
    RawQcMetric {
        run_id: run_id.to_string(),
        total_reads: "1000000".to_string(),
        q30_rate: "0.92".to_string(),
        gc_percent: "41.5".to_string(),
        duplication_rate: "0.1".to_string(),
        adapter_content_flag: "no".to_string(),
        ..RawQcMetric::default()
    }
}

/// Two samples, each with one run and one QC record, all valid.
pub fn valid_tables() -> RawTables {
    RawTables::new(
        vec![sample("S1"), sample("S2")],
        vec![run("R1", "S1"), run("R2", "S2")],
        vec![qc("R1"), qc("R2")],
    )
}
