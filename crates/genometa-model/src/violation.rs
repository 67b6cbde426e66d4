//! Violation taxonomy.
//!
//! Violations are plain data. Validation collects them; it never aborts
//! mid-scan because of one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// Kind tag carried by every violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationKind {
    MissingKey,
    DuplicateKey,
    InvalidEnum,
    InvalidDate,
    OutOfRange,
    FkViolation,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingKey => "MISSING_KEY",
            ViolationKind::DuplicateKey => "DUPLICATE_KEY",
            ViolationKind::InvalidEnum => "INVALID_ENUM",
            ViolationKind::InvalidDate => "INVALID_DATE",
            ViolationKind::OutOfRange => "OUT_OF_RANGE",
            ViolationKind::FkViolation => "FK_VIOLATION",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a catalog rule.
///
/// Declaration order is catalog order and the tie-breaker when sorting
/// violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    SampleIdPresent,
    SampleIdUnique,
    SamplePlatform,
    SampleCollectionDate,
    RunIdPresent,
    RunIdUnique,
    RunSampleExists,
    RunLibraryLayout,
    RunReadLength,
    RunFastqGb,
    QcRunExists,
    QcTotalReads,
    QcQ30Rate,
    QcGcPercent,
    QcDuplicationRate,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::SampleIdPresent => "sample_id_present",
            RuleId::SampleIdUnique => "sample_id_unique",
            RuleId::SamplePlatform => "sample_platform",
            RuleId::SampleCollectionDate => "sample_collection_date",
            RuleId::RunIdPresent => "run_id_present",
            RuleId::RunIdUnique => "run_id_unique",
            RuleId::RunSampleExists => "run_sample_exists",
            RuleId::RunLibraryLayout => "run_library_layout",
            RuleId::RunReadLength => "run_read_length",
            RuleId::RunFastqGb => "run_fastq_gb",
            RuleId::QcRunExists => "qc_run_exists",
            RuleId::QcTotalReads => "qc_total_reads",
            RuleId::QcQ30Rate => "qc_q30_rate",
            RuleId::QcGcPercent => "qc_gc_percent",
            RuleId::QcDuplicationRate => "qc_duplication_rate",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule's violations propagate across tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reference violations cascade to dependent rows in quarantine mode.
    #[default]
    Hard,
    /// Recorded like any other violation, but never cascades.
    Advisory,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hard => "hard",
            Severity::Advisory => "advisory",
        }
    }

    pub fn cascades(&self) -> bool {
        matches!(self, Severity::Hard)
    }
}

/// Location of a row: its position in the input table and, when one could
/// be determined, its primary key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowRef {
    pub index: usize,
    pub key: Option<String>,
}

impl RowRef {
    pub fn new(index: usize, key: Option<String>) -> Self {
        Self { index, key }
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "row {} ({key})", self.index),
            None => write!(f, "row {}", self.index),
        }
    }
}

/// A single rule violation against a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub entity: EntityKind,
    pub row: RowRef,
    pub column: String,
    /// The offending cell exactly as captured; `None` when it was missing.
    pub value: Option<String>,
    pub kind: ViolationKind,
    pub rule: RuleId,
    pub severity: Severity,
    pub message: String,
    /// Parent row whose exclusion caused this row to be excluded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cascaded_from: Option<RowRef>,
}

impl Violation {
    /// Canonical ordering: entity, primary key, row position, rule.
    pub fn sort_key(&self) -> (EntityKind, Option<&str>, usize, RuleId) {
        (self.entity, self.row.key.as_deref(), self.row.index, self.rule)
    }

    pub fn is_cascade(&self) -> bool {
        self.cascaded_from.is_some()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {} ({})",
            self.entity, self.row, self.column, self.message, self.kind
        )
    }
}

/// Sort violations into canonical order. The sort is stable, so violations
/// sharing a key keep their evaluation order.
pub fn sort_canonical(violations: &mut [Violation]) {
    violations.sort_by(|left, right| left.sort_key().cmp(&right.sort_key()));
}
