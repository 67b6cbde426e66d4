//! Rule checks.
//!
//! Each check is a pure function of one rule, the rows of the table it
//! applies to, and (for reference checks) the rows of the referenced table.
//! Checks return violations; they never short-circuit.

mod dates;
mod keys;
mod ranges;
mod references;
mod vocab;

pub use dates::check_not_future;
pub use keys::{check_key_present, check_key_unique, normalized_key};
pub use ranges::check_range;
pub use references::{check_reference, key_set};
pub use vocab::check_one_of;

use genometa_model::{Conventions, RawRecord, RowRef, Violation};

use crate::catalog::RuleSpec;

/// Identify a row by position and, when present, its normalized primary key.
pub(crate) fn row_ref<R: RawRecord>(index: usize, row: &R, conventions: &Conventions) -> RowRef {
    RowRef::new(index, normalized_key(row, conventions))
}

/// Build a violation for `row` against `rule`, capturing the raw cell. Missing
/// tokens such as `NA` are kept as written; only an empty cell has no value.
pub(crate) fn violation<R: RawRecord>(
    rule: &RuleSpec,
    index: usize,
    row: &R,
    conventions: &Conventions,
    message: String,
) -> Violation {
    let raw = row.cell(rule.column).unwrap_or_default();
    let value = (!raw.is_empty()).then(|| raw.to_string());
    Violation {
        entity: rule.entity,
        row: row_ref(index, row, conventions),
        column: rule.column.to_string(),
        value,
        kind: rule.kind,
        rule: rule.id,
        severity: rule.severity,
        message,
        cascaded_from: None,
    }
}
