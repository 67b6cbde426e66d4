//! Per-record curation: trim, null tokens, enum canonicalization, coercion.
//!
//! Rows reaching this stage have passed validation, so a value that still
//! fails to coerce is curated as missing rather than reported.

use std::str::FromStr;

use genometa_model::{
    Conventions, LibraryLayout, Platform, QcMetric, RawQcMetric, RawRun, RawSample, Run, Sample,
};

fn canonical_enum<T: FromStr>(conventions: &Conventions, raw: &str) -> Option<T> {
    conventions
        .canonical_upper(raw)
        .and_then(|value| value.parse().ok())
}

/// Curate a sample. `None` when the primary key is missing.
pub fn curate_sample(raw: RawSample, conventions: &Conventions) -> Option<Sample> {
    let sample_id = conventions.text(&raw.sample_id)?;
    Some(Sample {
        sample_id,
        project_id: conventions.text(&raw.project_id),
        organism: conventions.text(&raw.organism),
        collection_date: conventions.parse_date(&raw.collection_date).value(),
        tissue: conventions.text(&raw.tissue),
        platform: canonical_enum::<Platform>(conventions, &raw.platform),
        audit: raw.audit,
    })
}

/// Curate a run. `None` when the primary key is missing.
pub fn curate_run(raw: RawRun, conventions: &Conventions) -> Option<Run> {
    let run_id = conventions.text(&raw.run_id)?;
    Some(Run {
        run_id,
        sample_id: conventions.text(&raw.sample_id),
        library_layout: canonical_enum::<LibraryLayout>(conventions, &raw.library_layout),
        read_length: conventions.parse_integer(&raw.read_length).value(),
        fastq_gb: conventions.parse_float(&raw.fastq_gb).value(),
        md5_1: conventions.text(&raw.md5_1),
        md5_2: conventions.text(&raw.md5_2),
        audit: raw.audit,
    })
}

/// Curate a QC record. `None` when the run reference is missing, since it
/// is the deduplication key.
pub fn curate_qc_metric(raw: RawQcMetric, conventions: &Conventions) -> Option<QcMetric> {
    let run_id = conventions.text(&raw.run_id)?;
    Some(QcMetric {
        run_id,
        total_reads: conventions.parse_integer(&raw.total_reads).value(),
        q30_rate: conventions.parse_float(&raw.q30_rate).value(),
        gc_percent: conventions.parse_float(&raw.gc_percent).value(),
        duplication_rate: conventions.parse_float(&raw.duplication_rate).value(),
        adapter_content_flag: conventions.parse_flag(&raw.adapter_content_flag),
        audit: raw.audit,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn sample_fields_are_trimmed_and_nulled() {
        let raw = RawSample {
            sample_id: " S1 ".to_string(),
            project_id: "NA".to_string(),
            organism: "  Homo sapiens".to_string(),
            collection_date: "2024/02/29".to_string(),
            tissue: "null".to_string(),
            platform: " pacbio ".to_string(),
            ..RawSample::default()
        };
        let sample = curate_sample(raw, &Conventions::default()).unwrap();
        assert_eq!(sample.sample_id, "S1");
        assert_eq!(sample.project_id, None);
        assert_eq!(sample.organism.as_deref(), Some("Homo sapiens"));
        assert_eq!(sample.collection_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(sample.tissue, None);
        assert_eq!(sample.platform, Some(Platform::Pacbio));
    }

    #[test]
    fn keyless_rows_are_not_curated() {
        let raw = RawRun {
            run_id: "NULL".to_string(),
            ..RawRun::default()
        };
        assert!(curate_run(raw, &Conventions::default()).is_none());
    }

    #[test]
    fn qc_flag_and_numbers_are_coerced() {
        let raw = RawQcMetric {
            run_id: "R1".to_string(),
            total_reads: "1200.0".to_string(),
            q30_rate: "0.91".to_string(),
            gc_percent: "NA".to_string(),
            duplication_rate: "0.2".to_string(),
            adapter_content_flag: "Yes".to_string(),
            ..RawQcMetric::default()
        };
        let qc = curate_qc_metric(raw, &Conventions::default()).unwrap();
        assert_eq!(qc.total_reads, Some(1200));
        assert_eq!(qc.q30_rate, Some(0.91));
        assert_eq!(qc.gc_percent, None);
        assert!(qc.adapter_content_flag);
    }
}
