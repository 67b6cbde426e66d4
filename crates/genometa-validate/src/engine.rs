//! Rule engine.
//!
//! Runs every catalog rule against the raw tables and produces one neutral,
//! canonically ordered violation list. Mode-specific interpretation lives in
//! the [`strict`](crate::strict) and [`quarantine`](crate::quarantine)
//! adapters.

use tracing::debug;

use genometa_model::{EntityKind, RawRecord, RawTables, Violation, sort_canonical};

use crate::catalog::{Check, RuleCatalog, RuleSpec};
use crate::checks;

/// Evaluates a [`RuleCatalog`] against raw tables.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> RuleEngine<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    /// Evaluate every rule and return all violations in canonical order.
    pub fn evaluate(&self, tables: &RawTables) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in self.catalog.rules() {
            let found = self.execute_rule(rule, tables);
            debug!(
                rule = rule.id.as_str(),
                entity = %rule.entity,
                violations = found.len(),
                "rule evaluated"
            );
            violations.extend(found);
        }
        sort_canonical(&mut violations);
        violations
    }

    /// Evaluate the rules of one entity only.
    pub fn evaluate_entity(&self, entity: EntityKind, tables: &RawTables) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .catalog
            .rules_for(entity)
            .flat_map(|rule| self.execute_rule(rule, tables))
            .collect();
        sort_canonical(&mut violations);
        violations
    }

    fn execute_rule(&self, rule: &RuleSpec, tables: &RawTables) -> Vec<Violation> {
        match rule.entity {
            EntityKind::Sample => self.execute_on(rule, &tables.samples, tables),
            EntityKind::Run => self.execute_on(rule, &tables.runs, tables),
            EntityKind::QcMetric => self.execute_on(rule, &tables.qc_metrics, tables),
        }
    }

    fn execute_on<R: RawRecord>(
        &self,
        rule: &RuleSpec,
        rows: &[R],
        tables: &RawTables,
    ) -> Vec<Violation> {
        let conventions = self.catalog.conventions();
        match &rule.check {
            Check::KeyPresent => checks::check_key_present(rule, rows, conventions),
            Check::KeyUnique => checks::check_key_unique(rule, rows, conventions),
            Check::OneOf(vocabulary) => checks::check_one_of(rule, rows, vocabulary, conventions),
            Check::NotFutureDate => checks::check_not_future(
                rule,
                rows,
                self.catalog.reference_date(),
                conventions,
            ),
            Check::Range(range) => checks::check_range(rule, rows, range, conventions),
            Check::References(target) => {
                let parent_keys = match target {
                    EntityKind::Sample => checks::key_set(&tables.samples, conventions),
                    EntityKind::Run => checks::key_set(&tables.runs, conventions),
                    EntityKind::QcMetric => checks::key_set(&tables.qc_metrics, conventions),
                };
                checks::check_reference(rule, rows, *target, &parent_keys, conventions)
            }
        }
    }
}
