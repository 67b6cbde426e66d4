//! Rule evaluation and strict-mode behaviour.

mod common;

use genometa_model::{EntityKind, EtlMode, RawTables, RuleId, Severity, ViolationKind};
use genometa_validate::{RuleEngine, ValidationOutcome, validate};

use common::{catalog, qc, run, sample, valid_tables};

fn kinds(outcome: &ValidationOutcome) -> Vec<(EntityKind, usize, ViolationKind)> {
    outcome
        .violations()
        .iter()
        .map(|v| (v.entity, v.row.index, v.kind))
        .collect()
}

#[test]
fn empty_tables_pass() {
    let outcome = validate(RawTables::default(), EtlMode::Strict, &catalog());
    assert_eq!(outcome, ValidationOutcome::Passed(RawTables::default()));
}

#[test]
fn valid_tables_pass_untouched() {
    let tables = valid_tables();
    let outcome = validate(tables.clone(), EtlMode::Strict, &catalog());
    assert_eq!(outcome, ValidationOutcome::Passed(tables));
}

#[test]
fn sample_without_runs_and_run_without_qc_are_valid() {
    let tables = RawTables::new(
        vec![sample("S1"), sample("S2")],
        vec![run("R1", "S1")],
        Vec::new(),
    );
    assert!(!validate(tables, EtlMode::Strict, &catalog()).is_failure());
}

#[test]
fn platform_check_is_case_insensitive() {
    let mut lower = sample("S1");
    lower.platform = "illumina".to_string();
    let mut padded = sample("S2");
    padded.platform = " Nanopore ".to_string();
    let tables = RawTables::new(vec![lower, padded], vec![run("R1", "S1")], Vec::new());
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    assert!(!outcome.is_failure(), "{:?}", outcome.violations());
}

#[test]
fn duplicate_run_ids_flag_every_occurrence() {
    let tables = RawTables::new(
        vec![sample("S1")],
        vec![run("R1", "S1"), run("R1", "S1")],
        Vec::new(),
    );
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    assert!(outcome.is_failure());
    assert_eq!(
        kinds(&outcome),
        vec![
            (EntityKind::Run, 0, ViolationKind::DuplicateKey),
            (EntityKind::Run, 1, ViolationKind::DuplicateKey),
        ]
    );
}

#[test]
fn keys_are_compared_after_trimming() {
    let tables = RawTables::new(
        vec![sample("S1"), sample(" S1 ")],
        Vec::new(),
        Vec::new(),
    );
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    assert_eq!(outcome.violations().len(), 2);
    assert!(
        outcome
            .violations()
            .iter()
            .all(|v| v.rule == RuleId::SampleIdUnique && v.row.key.as_deref() == Some("S1"))
    );
}

#[test]
fn missing_key_tokens_are_missing_keys() {
    let tables = RawTables::new(
        vec![sample("NA"), sample("   ")],
        Vec::new(),
        Vec::new(),
    );
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    assert_eq!(
        kinds(&outcome),
        vec![
            (EntityKind::Sample, 0, ViolationKind::MissingKey),
            (EntityKind::Sample, 1, ViolationKind::MissingKey),
        ]
    );
    assert!(outcome.violations().iter().all(|v| v.row.key.is_none()));
}

#[test]
fn missing_sample_reference_is_single_fk_violation() {
    let tables = RawTables::new(
        vec![sample("S1")],
        vec![run("R2", "S_MISSING")],
        Vec::new(),
    );
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    let violations = outcome.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::FkViolation);
    assert_eq!(violations[0].rule, RuleId::RunSampleExists);
    assert_eq!(violations[0].value.as_deref(), Some("S_MISSING"));
    assert_eq!(
        violations[0].message,
        "sample_id 'S_MISSING' not found in samples"
    );
}

#[test]
fn gc_percent_out_of_range_fails_strict() {
    let mut tables = valid_tables();
    tables.qc_metrics[1].gc_percent = "105".to_string();
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    assert!(matches!(outcome, ValidationOutcome::Failed { .. }));
    assert_eq!(
        kinds(&outcome),
        vec![(EntityKind::QcMetric, 1, ViolationKind::OutOfRange)]
    );
    assert_eq!(outcome.violations()[0].message, "gc_percent must be in [0, 100]");
}

#[test]
fn future_collection_date_is_invalid_date() {
    let mut tables = valid_tables();
    tables.samples[0].collection_date = "2099-01-01".to_string();
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    assert_eq!(
        kinds(&outcome),
        vec![(EntityKind::Sample, 0, ViolationKind::InvalidDate)]
    );
}

#[test]
fn collection_date_is_optional_but_must_parse() {
    let mut tables = valid_tables();
    tables.samples[0].collection_date = "NA".to_string();
    tables.samples[1].collection_date = "last tuesday".to_string();
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    assert_eq!(
        kinds(&outcome),
        vec![(EntityKind::Sample, 1, ViolationKind::InvalidDate)]
    );
    assert_eq!(outcome.violations()[0].value.as_deref(), Some("last tuesday"));
}

#[test]
fn reference_date_itself_is_not_in_the_future() {
    let mut tables = valid_tables();
    tables.samples[0].collection_date = "2025-01-01".to_string();
    assert!(!validate(tables, EtlMode::Strict, &catalog()).is_failure());
}

#[test]
fn q30_rate_bounds_are_inclusive() {
    let catalog = catalog();
    for (raw, ok) in [("0.0", true), ("1.0", true), ("-0.0001", false), ("1.0001", false)] {
        let mut record = qc("R1");
        record.q30_rate = raw.to_string();
        let tables = RawTables::new(vec![sample("S1")], vec![run("R1", "S1")], vec![record]);
        let violations = RuleEngine::new(&catalog).evaluate(&tables);
        assert_eq!(violations.is_empty(), ok, "q30_rate={raw}");
        if !ok {
            assert_eq!(violations[0].kind, ViolationKind::OutOfRange);
        }
    }
}

#[test]
fn unparseable_numbers_keep_raw_value() {
    let mut tables = valid_tables();
    tables.runs[0].read_length = "one hundred".to_string();
    tables.runs[1].read_length = "0".to_string();
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    let violations = outcome.violations();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].value.as_deref(), Some("one hundred"));
    assert_eq!(violations[0].message, "read_length is not an integer");
    assert_eq!(violations[1].message, "read_length must be > 0");
}

#[test]
fn required_numeric_field_missing_is_out_of_range() {
    let mut tables = valid_tables();
    tables.runs[0].fastq_gb = "null".to_string();
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    let violations = outcome.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ViolationKind::OutOfRange);
    assert_eq!(violations[0].value.as_deref(), Some("null"));
}

#[test]
fn missing_tokens_are_reported_as_written() {
    let mut tables = valid_tables();
    tables.runs[0].fastq_gb = "NA".to_string();
    tables.runs[1].fastq_gb = String::new();
    tables.samples[1].platform = " null ".to_string();
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    let values: Vec<(&str, Option<&str>)> = outcome
        .violations()
        .iter()
        .map(|violation| (violation.column.as_str(), violation.value.as_deref()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("platform", Some(" null ")),
            ("fastq_gb", Some("NA")),
            ("fastq_gb", None),
        ]
    );
}

#[test]
fn total_reads_is_optional_but_non_negative() {
    let mut tables = valid_tables();
    tables.qc_metrics[0].total_reads = String::new();
    tables.qc_metrics[1].total_reads = "-5".to_string();
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    let rules: Vec<(usize, RuleId)> = outcome
        .violations()
        .iter()
        .map(|v| (v.row.index, v.rule))
        .collect();
    assert_eq!(rules, vec![(1, RuleId::QcTotalReads)]);
}

#[test]
fn advisory_qc_reference_still_fails_strict() {
    let mut tables = valid_tables();
    tables.qc_metrics.push(qc("R_GHOST"));
    let outcome = validate(tables, EtlMode::Strict, &catalog());
    let violations = outcome.violations();
    assert!(outcome.is_failure());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, RuleId::QcRunExists);
    assert_eq!(violations[0].severity, Severity::Advisory);
}

#[test]
fn evaluation_collects_every_violation_in_canonical_order() {
    let mut bad_sample = sample("S2");
    bad_sample.platform = "SANGER".to_string();
    bad_sample.collection_date = "2099-12-31".to_string();
    let mut bad_run = run("R1", "S1");
    bad_run.library_layout = "TRIPLE".to_string();
    bad_run.fastq_gb = "-1".to_string();
    let tables = RawTables::new(
        vec![sample("S1"), bad_sample],
        vec![bad_run],
        vec![qc("R9")],
    );

    let violations = RuleEngine::new(&catalog()).evaluate(&tables);
    let rules: Vec<RuleId> = violations.iter().map(|v| v.rule).collect();
    assert_eq!(
        rules,
        vec![
            RuleId::SamplePlatform,
            RuleId::SampleCollectionDate,
            RuleId::RunLibraryLayout,
            RuleId::RunFastqGb,
            RuleId::QcRunExists,
        ]
    );
}

#[test]
fn evaluate_entity_limits_rules() {
    let mut tables = valid_tables();
    tables.samples[0].platform = "SANGER".to_string();
    tables.runs[0].read_length = "-1".to_string();
    let catalog = catalog();
    let engine = RuleEngine::new(&catalog);
    let runs_only = engine.evaluate_entity(EntityKind::Run, &tables);
    assert_eq!(runs_only.len(), 1);
    assert_eq!(runs_only[0].rule, RuleId::RunReadLength);
}

#[test]
fn violation_renders_for_reports() {
    let mut tables = valid_tables();
    tables.samples[1].platform = "sanger".to_string();
    let violations = RuleEngine::new(&catalog()).evaluate(&tables);
    insta::assert_snapshot!(
        violations[0].to_string(),
        @"samples[row 1 (S2)] platform: Invalid platform 'sanger' (expected one of ILLUMINA, NANOPORE, PACBIO, ION_TORRENT) (INVALID_ENUM)"
    );
}
