use std::path::PathBuf;

use genometa_model::{EntityKind, EtlMode, EtlOptions, Violation};
use genometa_output::WrittenFile;

/// Inputs of one `etl` or `validate` invocation.
#[derive(Debug, Clone)]
pub struct EtlRequest {
    pub raw_dir: PathBuf,
    pub out_dir: PathBuf,
    pub quarantine_dir: PathBuf,
    pub options: EtlOptions,
}

/// Row counts for one entity across the stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySummary {
    pub entity: EntityKind,
    pub input_rows: usize,
    /// Rows in the curated table; `None` when transform did not run.
    pub curated_rows: Option<usize>,
    pub quarantined_rows: usize,
    pub violations: usize,
}

#[derive(Debug)]
pub struct EtlReport {
    pub mode: EtlMode,
    pub raw_dir: PathBuf,
    pub entities: Vec<EntitySummary>,
    /// Every violation, in canonical order.
    pub violations: Vec<Violation>,
    pub written: Vec<WrittenFile>,
    pub quarantine_files: Vec<PathBuf>,
    /// Strict mode found violations; nothing was written.
    pub failed: bool,
}

impl EtlReport {
    pub fn exit_code(&self) -> i32 {
        i32::from(self.failed)
    }

    pub fn entity(&self, entity: EntityKind) -> Option<&EntitySummary> {
        self.entities.iter().find(|summary| summary.entity == entity)
    }
}
