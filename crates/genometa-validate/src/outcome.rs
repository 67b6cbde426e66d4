use genometa_model::{RawTables, Violation};

use crate::quarantine::Partition;

/// What validation hands back to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Strict mode, no violations: the input tables, untouched.
    Passed(RawTables),
    /// Strict mode with at least one violation. Nothing may proceed.
    Failed { violations: Vec<Violation> },
    /// Quarantine mode: clean subset, rejected rows and every violation.
    Partitioned(Partition),
}

impl ValidationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ValidationOutcome::Failed { .. })
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationOutcome::Passed(_) => &[],
            ValidationOutcome::Failed { violations } => violations,
            ValidationOutcome::Partitioned(partition) => &partition.violations,
        }
    }

    /// Tables allowed to proceed to transform, if any.
    pub fn into_clean(self) -> Option<RawTables> {
        match self {
            ValidationOutcome::Passed(tables) => Some(tables),
            ValidationOutcome::Failed { .. } => None,
            ValidationOutcome::Partitioned(partition) => Some(partition.clean),
        }
    }
}
