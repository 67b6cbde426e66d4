use genometa_model::{Coerced, Conventions, RawRecord, Violation};

use super::violation;
use crate::catalog::{Numeric, NumericRange, RuleSpec};

/// Numeric domain check. Unparseable text fails the rule with the raw cell
/// preserved on the violation.
pub fn check_range<R: RawRecord>(
    rule: &RuleSpec,
    rows: &[R],
    range: &NumericRange,
    conventions: &Conventions,
) -> Vec<Violation> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let raw = row.cell(rule.column).unwrap_or_default();
            let coerced = match range.numeric {
                Numeric::Integer => match conventions.parse_integer(raw) {
                    Coerced::Value(value) => Coerced::Value(value as f64),
                    Coerced::Missing => Coerced::Missing,
                    Coerced::Invalid => Coerced::Invalid,
                },
                Numeric::Float => conventions.parse_float(raw),
            };
            let message = match coerced {
                Coerced::Missing if !range.required => return None,
                Coerced::Value(value) if range.contains(value) => return None,
                Coerced::Missing => format!("{} is missing", rule.column),
                Coerced::Invalid => format!(
                    "{} is not {}",
                    rule.column,
                    match range.numeric {
                        Numeric::Integer => "an integer",
                        Numeric::Float => "a number",
                    }
                ),
                Coerced::Value(_) => format!("{} must {range}", rule.column),
            };
            Some(violation(rule, index, row, conventions, message))
        })
        .collect()
}
