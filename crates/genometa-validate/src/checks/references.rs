use std::collections::HashSet;

use genometa_model::{Conventions, EntityKind, RawRecord, Violation};

use super::{normalized_key, violation};
use crate::catalog::RuleSpec;

/// Normalized primary keys of a parent table.
pub fn key_set<P: RawRecord>(parents: &[P], conventions: &Conventions) -> HashSet<String> {
    parents
        .iter()
        .filter_map(|parent| normalized_key(parent, conventions))
        .collect()
}

/// Foreign-key existence. A missing reference is itself a violation.
pub fn check_reference<R: RawRecord>(
    rule: &RuleSpec,
    rows: &[R],
    target: EntityKind,
    parent_keys: &HashSet<String>,
    conventions: &Conventions,
) -> Vec<Violation> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let raw = row.cell(rule.column).unwrap_or_default();
            let message = match conventions.normalize_text(raw) {
                Some(key) if parent_keys.contains(key) => return None,
                Some(key) => format!("{} '{key}' not found in {target}", rule.column),
                None => format!("{} is missing", rule.column),
            };
            Some(violation(rule, index, row, conventions, message))
        })
        .collect()
}
