use std::fmt;

use serde::{Deserialize, Serialize};

/// The three record types handled by the pipeline.
///
/// Variant order is the canonical ordering used when sorting violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sample,
    Run,
    QcMetric,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Sample, EntityKind::Run, EntityKind::QcMetric];

    /// Table name as used for file names and log fields.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Sample => "samples",
            EntityKind::Run => "runs",
            EntityKind::QcMetric => "qc_metrics",
        }
    }

    /// Column holding the primary key, if the entity has one.
    pub fn primary_key(&self) -> Option<&'static str> {
        match self {
            EntityKind::Sample => Some("sample_id"),
            EntityKind::Run => Some("run_id"),
            EntityKind::QcMetric => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
