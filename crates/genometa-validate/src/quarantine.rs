//! Partitioning adapter.
//!
//! Splits each table into rows touched by no violation and rows touched by
//! at least one, then excludes dependents of excluded parents for every
//! reference rule whose severity cascades. Cascading repeats until nothing
//! changes, so exclusion is transitive across tables.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use genometa_model::{
    Conventions, EntityKind, QuarantineSet, QuarantinedRow, RawRecord, RawTables, RowRef,
    Violation, ViolationKind, sort_canonical,
};

use crate::catalog::{RuleCatalog, RuleSpec};

/// Result of partitioning the raw tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub clean: RawTables,
    pub quarantined: QuarantineSet,
    /// Every violation, cascade exclusions included, in canonical order.
    pub violations: Vec<Violation>,
}

type Flagged = BTreeMap<(EntityKind, usize), Vec<Violation>>;

pub fn partition(tables: RawTables, violations: Vec<Violation>, catalog: &RuleCatalog) -> Partition {
    let mut flagged: Flagged = BTreeMap::new();
    for violation in &violations {
        flagged
            .entry((violation.entity, violation.row.index))
            .or_default()
            .push(violation.clone());
    }

    let cascaded = cascade(&tables, &mut flagged, catalog);
    debug!(cascaded = cascaded.len(), "cascade exclusions applied");

    let mut all = violations;
    all.extend(cascaded);
    sort_canonical(&mut all);

    let RawTables {
        samples,
        runs,
        qc_metrics,
    } = tables;
    let (samples, quarantined_samples) = split(samples, &mut flagged);
    let (runs, quarantined_runs) = split(runs, &mut flagged);
    let (qc_metrics, quarantined_qc) = split(qc_metrics, &mut flagged);

    Partition {
        clean: RawTables::new(samples, runs, qc_metrics),
        quarantined: QuarantineSet {
            samples: quarantined_samples,
            runs: quarantined_runs,
            qc_metrics: quarantined_qc,
        },
        violations: all,
    }
}

fn cascade(tables: &RawTables, flagged: &mut Flagged, catalog: &RuleCatalog) -> Vec<Violation> {
    let rules: Vec<&RuleSpec> = catalog.cascading_references().collect();
    let conventions = catalog.conventions();
    let mut added = Vec::new();

    loop {
        let mut changed = false;
        for rule in &rules {
            let Some(target) = rule.referenced_entity() else {
                continue;
            };
            for violation in cascade_rule(rule, target, tables, flagged, conventions) {
                flagged
                    .entry((violation.entity, violation.row.index))
                    .or_default()
                    .push(violation.clone());
                added.push(violation);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    added
}

/// Cascade violations for unflagged children whose parent key exists but
/// only on excluded parent rows.
fn cascade_rule(
    rule: &RuleSpec,
    target: EntityKind,
    tables: &RawTables,
    flagged: &Flagged,
    conventions: &Conventions,
) -> Vec<Violation> {
    let Some(parent_key_column) = target.primary_key() else {
        return Vec::new();
    };

    let mut excluded_parents: HashMap<&str, RowRef> = HashMap::new();
    let mut clean_parents: HashSet<&str> = HashSet::new();
    for (index, cell) in tables.column(target, parent_key_column).into_iter().enumerate() {
        let Some(key) = conventions.normalize_text(cell) else {
            continue;
        };
        if flagged.contains_key(&(target, index)) {
            excluded_parents
                .entry(key)
                .or_insert_with(|| RowRef::new(index, Some(key.to_string())));
        } else {
            clean_parents.insert(key);
        }
    }
    if excluded_parents.is_empty() {
        return Vec::new();
    }

    let child_keys = rule
        .entity
        .primary_key()
        .map(|column| tables.column(rule.entity, column));
    let references = tables.column(rule.entity, rule.column);

    references
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !flagged.contains_key(&(rule.entity, *index)))
        .filter_map(|(index, cell)| {
            let key = conventions.normalize_text(cell)?;
            if clean_parents.contains(key) {
                return None;
            }
            let parent = excluded_parents.get(key)?;
            let child_key = child_keys
                .as_ref()
                .and_then(|keys| keys.get(index))
                .and_then(|cell| conventions.text(cell));
            Some(Violation {
                entity: rule.entity,
                row: RowRef::new(index, child_key),
                column: rule.column.to_string(),
                value: Some(cell.to_string()),
                kind: ViolationKind::FkViolation,
                rule: rule.id,
                severity: rule.severity,
                message: format!(
                    "{} '{key}' refers to quarantined {target} {parent}",
                    rule.column
                ),
                cascaded_from: Some(parent.clone()),
            })
        })
        .collect()
}

fn split<R: RawRecord>(rows: Vec<R>, flagged: &mut Flagged) -> (Vec<R>, Vec<QuarantinedRow<R>>) {
    let mut clean = Vec::new();
    let mut quarantined = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        match flagged.remove(&(R::ENTITY, index)) {
            Some(mut violations) => {
                sort_canonical(&mut violations);
                quarantined.push(QuarantinedRow {
                    index,
                    row,
                    violations,
                });
            }
            None => clean.push(row),
        }
    }
    (clean, quarantined)
}
