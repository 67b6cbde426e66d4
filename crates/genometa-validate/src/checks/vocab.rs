use genometa_model::{Conventions, RawRecord, Violation};

use super::violation;
use crate::catalog::RuleSpec;

/// Closed-vocabulary membership, case-insensitive after trimming.
/// A missing value is not a member.
pub fn check_one_of<R: RawRecord>(
    rule: &RuleSpec,
    rows: &[R],
    vocabulary: &[&str],
    conventions: &Conventions,
) -> Vec<Violation> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let raw = row.cell(rule.column).unwrap_or_default();
            let message = match conventions.normalize_text(raw) {
                None => format!("{} is missing", rule.column),
                Some(value) if vocabulary.iter().any(|v| v.eq_ignore_ascii_case(value)) => {
                    return None;
                }
                Some(value) => format!(
                    "Invalid {} '{value}' (expected one of {})",
                    rule.column,
                    vocabulary.join(", ")
                ),
            };
            Some(violation(rule, index, row, conventions, message))
        })
        .collect()
}
