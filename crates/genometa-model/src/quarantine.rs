use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::record::{RawQcMetric, RawRun, RawSample};
use crate::violation::Violation;

/// A rejected raw row with every violation that touched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarantinedRow<T> {
    pub index: usize,
    pub row: T,
    pub violations: Vec<Violation>,
}

/// Rows set aside in quarantine mode, per entity, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarantineSet {
    pub samples: Vec<QuarantinedRow<RawSample>>,
    pub runs: Vec<QuarantinedRow<RawRun>>,
    pub qc_metrics: Vec<QuarantinedRow<RawQcMetric>>,
}

impl QuarantineSet {
    pub fn row_count(&self, entity: EntityKind) -> usize {
        match entity {
            EntityKind::Sample => self.samples.len(),
            EntityKind::Run => self.runs.len(),
            EntityKind::QcMetric => self.qc_metrics.len(),
        }
    }

    pub fn total_rows(&self) -> usize {
        self.samples.len() + self.runs.len() + self.qc_metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_rows() == 0
    }

    /// Input positions of the quarantined rows of one entity.
    pub fn indices(&self, entity: EntityKind) -> Vec<usize> {
        match entity {
            EntityKind::Sample => self.samples.iter().map(|row| row.index).collect(),
            EntityKind::Run => self.runs.iter().map(|row| row.index).collect(),
            EntityKind::QcMetric => self.qc_metrics.iter().map(|row| row.index).collect(),
        }
    }
}
