use std::collections::HashMap;

use genometa_model::{Conventions, RawRecord, Violation};

use super::violation;
use crate::catalog::RuleSpec;

/// Trimmed primary key, or `None` when absent or a missing-value token.
pub fn normalized_key<R: RawRecord>(row: &R, conventions: &Conventions) -> Option<String> {
    row.primary_key()
        .and_then(|key| conventions.normalize_text(key))
        .map(str::to_string)
}

pub fn check_key_present<R: RawRecord>(
    rule: &RuleSpec,
    rows: &[R],
    conventions: &Conventions,
) -> Vec<Violation> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| normalized_key(*row, conventions).is_none())
        .map(|(index, row)| {
            violation(
                rule,
                index,
                row,
                conventions,
                format!("{} is missing", rule.column),
            )
        })
        .collect()
}

/// Every row sharing a key is flagged, the first occurrence included.
pub fn check_key_unique<R: RawRecord>(
    rule: &RuleSpec,
    rows: &[R],
    conventions: &Conventions,
) -> Vec<Violation> {
    let keys: Vec<Option<String>> = rows
        .iter()
        .map(|row| normalized_key(row, conventions))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys.iter().flatten() {
        *counts.entry(key.as_str()).or_default() += 1;
    }

    rows.iter()
        .zip(&keys)
        .enumerate()
        .filter_map(|(index, (row, key))| {
            let key = key.as_deref()?;
            (counts.get(key).copied().unwrap_or_default() > 1).then(|| {
                violation(
                    rule,
                    index,
                    row,
                    conventions,
                    format!("Duplicate {} '{key}'", rule.column),
                )
            })
        })
        .collect()
}
