//! The rule catalog.
//!
//! A fixed, ordered list of independent checks per entity. The catalog is
//! built once and passed by reference into every validation call; it is the
//! single source of truth for vocabularies, numeric bounds, rule severities,
//! the reference date and the value conventions.

use std::fmt;

use chrono::{NaiveDate, Utc};

use genometa_model::{
    Conventions, EntityKind, EtlOptions, LibraryLayout, Platform, RuleId, Severity, ViolationKind,
};

/// One side of a numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

/// Declared numeric type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    Integer,
    Float,
}

/// Numeric domain of a range-constrained column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub numeric: Numeric,
    pub min: Bound,
    pub max: Bound,
    /// Whether a missing value is itself a violation.
    pub required: bool,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        let above_min = match self.min {
            Bound::Unbounded => true,
            Bound::Inclusive(min) => value >= min,
            Bound::Exclusive(min) => value > min,
        };
        let below_max = match self.max {
            Bound::Unbounded => true,
            Bound::Inclusive(max) => value <= max,
            Bound::Exclusive(max) => value < max,
        };
        above_min && below_max
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Bound::Unbounded, Bound::Unbounded) => f.write_str("be numeric"),
            (Bound::Inclusive(min), Bound::Unbounded) => write!(f, "be >= {min}"),
            (Bound::Exclusive(min), Bound::Unbounded) => write!(f, "be > {min}"),
            (Bound::Unbounded, Bound::Inclusive(max)) => write!(f, "be <= {max}"),
            (Bound::Unbounded, Bound::Exclusive(max)) => write!(f, "be < {max}"),
            (min, max) => {
                let (open, low) = match min {
                    Bound::Exclusive(v) => ('(', v),
                    Bound::Inclusive(v) => ('[', v),
                    Bound::Unbounded => ('(', f64::NEG_INFINITY),
                };
                let (close, high) = match max {
                    Bound::Exclusive(v) => (')', v),
                    Bound::Inclusive(v) => (']', v),
                    Bound::Unbounded => (')', f64::INFINITY),
                };
                write!(f, "be in {open}{low}, {high}{close}")
            }
        }
    }
}

/// What a rule checks.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Primary key is present.
    KeyPresent,
    /// Primary key is unique within its table.
    KeyUnique,
    /// Value belongs to a closed vocabulary (case-insensitive).
    OneOf(&'static [&'static str]),
    /// Value, when present, is a date on or before the reference date.
    NotFutureDate,
    /// Value coerces to a number inside the range.
    Range(NumericRange),
    /// Value exists as a primary key of the target entity.
    References(EntityKind),
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    pub id: RuleId,
    pub entity: EntityKind,
    pub column: &'static str,
    pub kind: ViolationKind,
    pub severity: Severity,
    pub check: Check,
}

impl RuleSpec {
    fn new(
        id: RuleId,
        entity: EntityKind,
        column: &'static str,
        kind: ViolationKind,
        check: Check,
    ) -> Self {
        Self {
            id,
            entity,
            column,
            kind,
            severity: Severity::Hard,
            check,
        }
    }

    fn advisory(mut self) -> Self {
        self.severity = Severity::Advisory;
        self
    }

    /// Target entity of a reference rule.
    pub fn referenced_entity(&self) -> Option<EntityKind> {
        match self.check {
            Check::References(target) => Some(target),
            _ => None,
        }
    }
}

const fn range(numeric: Numeric, min: Bound, max: Bound, required: bool) -> NumericRange {
    NumericRange {
        numeric,
        min,
        max,
        required,
    }
}

/// Ordered rule registry plus the settings every rule reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCatalog {
    rules: Vec<RuleSpec>,
    reference_date: NaiveDate,
    conventions: Conventions,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleCatalog {
    /// The standard rule set, with today (UTC) as the reference date.
    pub fn standard() -> Self {
        Self::standard_as_of(Utc::now().date_naive())
    }

    pub fn standard_as_of(reference_date: NaiveDate) -> Self {
        use Check::{KeyPresent, KeyUnique, NotFutureDate, OneOf, Range, References};
        use EntityKind::{QcMetric, Run, Sample};
        use ViolationKind::{
            DuplicateKey, FkViolation, InvalidDate, InvalidEnum, MissingKey, OutOfRange,
        };

        let unit = range(Numeric::Float, Bound::Inclusive(0.0), Bound::Inclusive(1.0), true);
        let rules = vec![
            RuleSpec::new(RuleId::SampleIdPresent, Sample, "sample_id", MissingKey, KeyPresent),
            RuleSpec::new(RuleId::SampleIdUnique, Sample, "sample_id", DuplicateKey, KeyUnique),
            RuleSpec::new(
                RuleId::SamplePlatform,
                Sample,
                "platform",
                InvalidEnum,
                OneOf(Platform::VALUES),
            ),
            RuleSpec::new(
                RuleId::SampleCollectionDate,
                Sample,
                "collection_date",
                InvalidDate,
                NotFutureDate,
            ),
            RuleSpec::new(RuleId::RunIdPresent, Run, "run_id", MissingKey, KeyPresent),
            RuleSpec::new(RuleId::RunIdUnique, Run, "run_id", DuplicateKey, KeyUnique),
            RuleSpec::new(
                RuleId::RunSampleExists,
                Run,
                "sample_id",
                FkViolation,
                References(Sample),
            ),
            RuleSpec::new(
                RuleId::RunLibraryLayout,
                Run,
                "library_layout",
                InvalidEnum,
                OneOf(LibraryLayout::VALUES),
            ),
            RuleSpec::new(
                RuleId::RunReadLength,
                Run,
                "read_length",
                OutOfRange,
                Range(range(
                    Numeric::Integer,
                    Bound::Exclusive(0.0),
                    Bound::Unbounded,
                    true,
                )),
            ),
            RuleSpec::new(
                RuleId::RunFastqGb,
                Run,
                "fastq_gb",
                OutOfRange,
                Range(range(
                    Numeric::Float,
                    Bound::Inclusive(0.0),
                    Bound::Unbounded,
                    true,
                )),
            ),
            RuleSpec::new(
                RuleId::QcRunExists,
                QcMetric,
                "run_id",
                FkViolation,
                References(Run),
            )
            .advisory(),
            RuleSpec::new(
                RuleId::QcTotalReads,
                QcMetric,
                "total_reads",
                OutOfRange,
                Range(range(
                    Numeric::Integer,
                    Bound::Inclusive(0.0),
                    Bound::Unbounded,
                    false,
                )),
            ),
            RuleSpec::new(RuleId::QcQ30Rate, QcMetric, "q30_rate", OutOfRange, Range(unit)),
            RuleSpec::new(
                RuleId::QcGcPercent,
                QcMetric,
                "gc_percent",
                OutOfRange,
                Range(range(
                    Numeric::Float,
                    Bound::Inclusive(0.0),
                    Bound::Inclusive(100.0),
                    true,
                )),
            ),
            RuleSpec::new(
                RuleId::QcDuplicationRate,
                QcMetric,
                "duplication_rate",
                OutOfRange,
                Range(unit),
            ),
        ];

        Self {
            rules,
            reference_date,
            conventions: Conventions::default(),
        }
    }

    /// Catalog configured from run options.
    pub fn from_options(options: &EtlOptions) -> Self {
        let reference_date = options
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());
        Self::standard_as_of(reference_date)
            .with_severity(RuleId::QcRunExists, options.qc_run_reference)
            .with_conventions(options.conventions.clone())
    }

    /// Override the severity of one rule.
    pub fn with_severity(mut self, id: RuleId, severity: Severity) -> Self {
        for rule in self.rules.iter_mut().filter(|rule| rule.id == id) {
            rule.severity = severity;
        }
        self
    }

    pub fn with_conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    pub fn rules_for(&self, entity: EntityKind) -> impl Iterator<Item = &RuleSpec> {
        self.rules.iter().filter(move |rule| rule.entity == entity)
    }

    pub fn get(&self, id: RuleId) -> Option<&RuleSpec> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Reference rules whose violations cascade, in catalog order.
    pub fn cascading_references(&self) -> impl Iterator<Item = &RuleSpec> {
        self.rules
            .iter()
            .filter(|rule| rule.referenced_entity().is_some() && rule.severity.cascades())
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
