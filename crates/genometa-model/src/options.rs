//! Configuration options for an ETL invocation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conventions::Conventions;
use crate::enums::EtlMode;
use crate::violation::Severity;

/// Options controlling one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtlOptions {
    /// Abort on any violation, or quarantine and continue.
    pub mode: EtlMode,

    /// Severity of the QcMetric -> Run reference rule.
    ///
    /// Run -> Sample is always hard; QC -> Run defaults to advisory.
    #[serde(default = "default_qc_run_reference")]
    pub qc_run_reference: Severity,

    /// Date used by the "collection date not in the future" rule.
    /// Defaults to today (UTC) when unset.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    #[serde(default)]
    pub conventions: Conventions,
}

fn default_qc_run_reference() -> Severity {
    Severity::Advisory
}

impl Default for EtlOptions {
    fn default() -> Self {
        Self::new(EtlMode::default())
    }
}

impl EtlOptions {
    pub fn new(mode: EtlMode) -> Self {
        Self {
            mode,
            qc_run_reference: default_qc_run_reference(),
            reference_date: None,
            conventions: Conventions::default(),
        }
    }

    pub fn with_qc_run_reference(mut self, severity: Severity) -> Self {
        self.qc_run_reference = severity;
        self
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}
