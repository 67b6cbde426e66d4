//! Fail-fast adapter.

use genometa_model::{RawTables, Violation};

use crate::outcome::ValidationOutcome;

/// Any violation, advisory ones included, fails the whole invocation.
pub fn gate(tables: RawTables, violations: Vec<Violation>) -> ValidationOutcome {
    if violations.is_empty() {
        ValidationOutcome::Passed(tables)
    } else {
        ValidationOutcome::Failed { violations }
    }
}
