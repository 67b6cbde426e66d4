//! Validate-then-transform orchestration.
//!
//! # Mode contract
//!
//! - **Strict**: any violation returns [`PipelineError::ValidationFailed`]
//!   carrying the full violation list. The transform stage is never invoked
//!   and no curated output exists.
//! - **Quarantine**: only the clean subset is transformed. Rejected rows and
//!   every violation are returned alongside the curated tables.

use std::time::Instant;

use tracing::{debug, info, info_span, warn};

use genometa_model::{CuratedTables, EtlMode, EtlOptions, QuarantineSet, RawTables, Violation};
use genometa_validate::{RuleCatalog, ValidationOutcome, validate};

use crate::error::{PipelineError, Result};
use crate::stage::{StandardTransform, TransformStage};

/// Output of a successful pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub mode: EtlMode,
    pub curated: CuratedTables,
    /// Rejected rows; `None` in strict mode.
    pub quarantined: Option<QuarantineSet>,
    /// Every violation, in canonical order. Empty after a strict pass.
    pub violations: Vec<Violation>,
}

impl PipelineRun {
    pub fn quarantined_rows(&self) -> usize {
        self.quarantined
            .as_ref()
            .map_or(0, QuarantineSet::total_rows)
    }
}

/// Orchestrates validation and transformation over one rule catalog.
#[derive(Debug, Clone)]
pub struct Pipeline<T = StandardTransform> {
    catalog: RuleCatalog,
    transformer: T,
}

impl Pipeline<StandardTransform> {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self::with_transformer(catalog, StandardTransform)
    }

    pub fn from_options(options: &EtlOptions) -> Self {
        Self::new(RuleCatalog::from_options(options))
    }
}

impl<T: TransformStage> Pipeline<T> {
    pub fn with_transformer(catalog: RuleCatalog, transformer: T) -> Self {
        Self {
            catalog,
            transformer,
        }
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Validate `tables` under `mode`, then transform what may proceed.
    pub fn run(&self, tables: RawTables, mode: EtlMode) -> Result<PipelineRun> {
        let started = Instant::now();
        let input_rows = tables.total_rows();

        let outcome = {
            let _span = info_span!("validate", mode = mode.as_str()).entered();
            validate(tables, mode, &self.catalog)
        };
        let (clean, quarantined, violations) = match outcome {
            ValidationOutcome::Failed { violations } => {
                warn!(
                    violations = violations.len(),
                    "strict validation failed, transform skipped"
                );
                return Err(PipelineError::ValidationFailed { violations });
            }
            ValidationOutcome::Passed(tables) => (tables, None, Vec::new()),
            ValidationOutcome::Partitioned(partition) => {
                info!(
                    clean = partition.clean.total_rows(),
                    quarantined = partition.quarantined.total_rows(),
                    violations = partition.violations.len(),
                    "rows partitioned"
                );
                (
                    partition.clean,
                    Some(partition.quarantined),
                    partition.violations,
                )
            }
        };

        let curated = {
            let _span = info_span!("transform", stage = self.transformer.stage_name()).entered();
            debug!(rows = clean.total_rows(), "transforming");
            self.transformer
                .transform(clean, self.catalog.conventions())
        };

        info!(
            mode = mode.as_str(),
            input_rows,
            curated_rows = curated.total_rows(),
            duration_ms = started.elapsed().as_millis() as u64,
            "pipeline complete"
        );
        Ok(PipelineRun {
            mode,
            curated,
            quarantined,
            violations,
        })
    }
}
