//! Genomics metadata model.
//!
//! Record types for the three ingested entities (samples, sequencing runs,
//! QC metrics) in both their raw form, as delivered by ingest, and their
//! curated form, as handed to the load stage. Also home to the value
//! conventions shared by validation and transformation, and to the
//! violation taxonomy.

pub mod conventions;
pub mod entity;
pub mod enums;
pub mod error;
pub mod options;
pub mod quarantine;
pub mod record;
pub mod violation;

pub use conventions::{Coerced, Conventions};
pub use entity::EntityKind;
pub use enums::{EtlMode, LibraryLayout, Platform};
pub use error::{ModelError, Result};
pub use options::EtlOptions;
pub use quarantine::{QuarantineSet, QuarantinedRow};
pub use record::{
    AuditFields, CuratedTables, QcMetric, RawQcMetric, RawRecord, RawRun, RawSample, RawTables,
    Run, Sample,
};
pub use violation::{RowRef, RuleId, Severity, Violation, ViolationKind, sort_canonical};
