//! `etl` and `validate` command bodies.
//!
//! Both return an [`EtlReport`] rather than printing, so the binary decides
//! how to render it and tests can inspect it.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use genometa_core::{Pipeline, PipelineError, PipelineRun};
use genometa_ingest::ingest_all;
use genometa_model::{CuratedTables, EntityKind, QuarantineSet, RawTables, Violation};
use genometa_output::{write_curated, write_quarantine};
use genometa_validate::{RuleCatalog, ValidationOutcome, validate};

use crate::types::{EntitySummary, EtlReport, EtlRequest};

/// Ingest, validate, transform and load.
///
/// A strict-mode failure is not an error: it comes back as a report with
/// `failed` set, carrying every violation, and nothing is written.
///
/// A successful run replaces both the curated tables and the quarantine
/// files. A strict pass leaves the quarantine files empty.
pub fn run_etl(request: &EtlRequest) -> Result<EtlReport> {
    let mode = request.options.mode;
    let span = info_span!("etl", mode = mode.as_str());
    let _guard = span.enter();
    let started = Instant::now();

    let tables = ingest(request)?;
    let input = input_counts(&tables);

    let pipeline = Pipeline::from_options(&request.options);
    let run = match pipeline.run(tables, mode) {
        Ok(run) => run,
        Err(PipelineError::ValidationFailed { violations }) => {
            warn!(
                violations = violations.len(),
                "strict validation failed, nothing written"
            );
            return Ok(EtlReport {
                mode,
                raw_dir: request.raw_dir.clone(),
                entities: summarize(&input, None, None, &violations),
                violations,
                written: Vec::new(),
                quarantine_files: Vec::new(),
                failed: true,
            });
        }
    };

    let PipelineRun {
        curated,
        quarantined,
        violations,
        ..
    } = run;

    let (written, quarantine_files) = {
        let _load = info_span!("load").entered();
        let written = write_curated(&curated, &request.out_dir)
            .with_context(|| format!("write curated tables to {}", request.out_dir.display()))?;
        let none_quarantined = QuarantineSet::default();
        let set = quarantined.as_ref().unwrap_or(&none_quarantined);
        let quarantine_files = write_quarantine(set, &violations, &request.quarantine_dir)
            .with_context(|| {
                format!("write quarantine to {}", request.quarantine_dir.display())
            })?;
        (written, quarantine_files)
    };

    info!(
        files = written.len(),
        curated_rows = curated.total_rows(),
        quarantined_rows = quarantined.as_ref().map_or(0, QuarantineSet::total_rows),
        duration_ms = started.elapsed().as_millis() as u64,
        "etl complete"
    );
    Ok(EtlReport {
        mode,
        raw_dir: request.raw_dir.clone(),
        entities: summarize(&input, Some(&curated), quarantined.as_ref(), &violations),
        violations,
        written,
        quarantine_files,
        failed: false,
    })
}

/// Ingest and validate only. Fails whenever any violation is found, in
/// either mode; the mode decides only which rows would be quarantined.
pub fn run_validate(request: &EtlRequest) -> Result<EtlReport> {
    let mode = request.options.mode;
    let span = info_span!("validate_only", mode = mode.as_str());
    let _guard = span.enter();

    let tables = ingest(request)?;
    let input = input_counts(&tables);

    let catalog = RuleCatalog::from_options(&request.options);
    let (quarantined, violations) = match validate(tables, mode, &catalog) {
        ValidationOutcome::Passed(_) => (None, Vec::new()),
        ValidationOutcome::Failed { violations } => (None, violations),
        ValidationOutcome::Partitioned(partition) => {
            (Some(partition.quarantined), partition.violations)
        }
    };
    info!(violations = violations.len(), "validation complete");

    Ok(EtlReport {
        mode,
        raw_dir: request.raw_dir.clone(),
        entities: summarize(&input, None, quarantined.as_ref(), &violations),
        failed: !violations.is_empty(),
        violations,
        written: Vec::new(),
        quarantine_files: Vec::new(),
    })
}

fn ingest(request: &EtlRequest) -> Result<RawTables> {
    let _span = info_span!("ingest").entered();
    ingest_all(&request.raw_dir)
        .with_context(|| format!("ingest raw tables from {}", request.raw_dir.display()))
}

fn input_counts(tables: &RawTables) -> [(EntityKind, usize); 3] {
    EntityKind::ALL.map(|entity| (entity, tables.row_count(entity)))
}

fn curated_count(curated: &CuratedTables, entity: EntityKind) -> usize {
    match entity {
        EntityKind::Sample => curated.samples.len(),
        EntityKind::Run => curated.runs.len(),
        EntityKind::QcMetric => curated.qc_metrics.len(),
    }
}

fn summarize(
    input: &[(EntityKind, usize)],
    curated: Option<&CuratedTables>,
    quarantined: Option<&QuarantineSet>,
    violations: &[Violation],
) -> Vec<EntitySummary> {
    input
        .iter()
        .map(|&(entity, input_rows)| EntitySummary {
            entity,
            input_rows,
            curated_rows: curated.map(|tables| curated_count(tables, entity)),
            quarantined_rows: quarantined.map_or(0, |set| set.row_count(entity)),
            violations: violations
                .iter()
                .filter(|violation| violation.entity == entity)
                .count(),
        })
        .collect()
}
