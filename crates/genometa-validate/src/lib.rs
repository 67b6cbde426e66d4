//! Validation for genomics metadata tables.
//!
//! One evaluation pass ([`RuleEngine`]) produces a neutral violation list.
//! Two thin adapters interpret it: [`strict::gate`] fails on any violation,
//! [`quarantine::partition`] splits rows into clean and quarantined subsets
//! with reference cascading.

pub mod catalog;
pub mod checks;
pub mod engine;
pub mod outcome;
pub mod quarantine;
pub mod strict;

use tracing::info;

use genometa_model::{EtlMode, RawTables};

pub use catalog::{Bound, Check, Numeric, NumericRange, RuleCatalog, RuleSpec};
pub use engine::RuleEngine;
pub use outcome::ValidationOutcome;
pub use quarantine::Partition;

/// Validate the raw tables under `mode`.
pub fn validate(tables: RawTables, mode: EtlMode, catalog: &RuleCatalog) -> ValidationOutcome {
    let violations = RuleEngine::new(catalog).evaluate(&tables);
    info!(
        mode = mode.as_str(),
        rows = tables.total_rows(),
        violations = violations.len(),
        "validation evaluated"
    );
    match mode {
        EtlMode::Strict => strict::gate(tables, violations),
        EtlMode::Quarantine => {
            ValidationOutcome::Partitioned(quarantine::partition(tables, violations, catalog))
        }
    }
}
