//! Audit field construction.

use chrono::{SecondsFormat, Utc};
use csv::StringRecord;
use sha2::{Digest, Sha256};

use genometa_model::{AuditFields, RawQcMetric, RawRun, RawSample};

/// Timestamp shared by every row of one ingest invocation.
pub fn ingestion_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SHA-256 over the raw header/value pairs of one row, hex encoded.
///
/// Each pair contributes `header=value` followed by a newline, in file
/// column order, so the hash changes when a value moves between columns.
pub fn row_hash(headers: &StringRecord, record: &StringRecord) -> String {
    let mut hasher = Sha256::new();
    for (header, value) in headers.iter().zip(record.iter()) {
        hasher.update(header.as_bytes());
        hasher.update(b"=");
        hasher.update(value.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// Raw records that carry audit fields.
pub trait Audited {
    fn set_audit(&mut self, audit: AuditFields);
}

impl Audited for RawSample {
    fn set_audit(&mut self, audit: AuditFields) {
        self.audit = audit;
    }
}

impl Audited for RawRun {
    fn set_audit(&mut self, audit: AuditFields) {
        self.audit = audit;
    }
}

impl Audited for RawQcMetric {
    fn set_audit(&mut self, audit: AuditFields) {
        self.audit = audit;
    }
}
