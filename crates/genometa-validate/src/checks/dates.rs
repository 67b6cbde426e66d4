use chrono::NaiveDate;

use genometa_model::{Coerced, Conventions, RawRecord, Violation};

use super::violation;
use crate::catalog::RuleSpec;

/// Optional date column: when present it must parse and not be later than
/// `reference_date`.
pub fn check_not_future<R: RawRecord>(
    rule: &RuleSpec,
    rows: &[R],
    reference_date: NaiveDate,
    conventions: &Conventions,
) -> Vec<Violation> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let raw = row.cell(rule.column).unwrap_or_default();
            let message = match conventions.parse_date(raw) {
                Coerced::Missing => return None,
                Coerced::Value(date) if date <= reference_date => return None,
                Coerced::Value(date) => {
                    format!("{} {date} is in the future", rule.column)
                }
                Coerced::Invalid => format!("{} is not a valid date", rule.column),
            };
            Some(violation(rule, index, row, conventions, message))
        })
        .collect()
}
