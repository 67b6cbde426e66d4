//! Raw and curated record types.
//!
//! Raw records hold every cell as the text delivered by ingest; nothing is
//! trimmed or interpreted. Curated records hold typed values and are only
//! produced by the transform stage. Audit fields ride along untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::enums::{LibraryLayout, Platform};

/// Provenance attached by ingest and preserved, never computed, downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditFields {
    pub ingested_at: String,
    pub source_file: String,
    pub row_hash: String,
}

/// Column-level access to a raw record.
pub trait RawRecord {
    const ENTITY: EntityKind;

    /// Raw cell text for `column`, or `None` when the entity has no such column.
    fn cell(&self, column: &str) -> Option<&str>;

    fn audit(&self) -> &AuditFields;

    /// Raw primary key cell, if the entity has a primary key.
    fn primary_key(&self) -> Option<&str> {
        Self::ENTITY
            .primary_key()
            .and_then(|column| self.cell(column))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSample {
    pub sample_id: String,
    pub project_id: String,
    pub organism: String,
    pub collection_date: String,
    pub tissue: String,
    pub platform: String,
    #[serde(skip_deserializing)]
    pub audit: AuditFields,
}

impl RawRecord for RawSample {
    const ENTITY: EntityKind = EntityKind::Sample;

    fn cell(&self, column: &str) -> Option<&str> {
        let value = match column {
            "sample_id" => &self.sample_id,
            "project_id" => &self.project_id,
            "organism" => &self.organism,
            "collection_date" => &self.collection_date,
            "tissue" => &self.tissue,
            "platform" => &self.platform,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRun {
    pub run_id: String,
    pub sample_id: String,
    pub library_layout: String,
    pub read_length: String,
    pub fastq_gb: String,
    pub md5_1: String,
    pub md5_2: String,
    #[serde(skip_deserializing)]
    pub audit: AuditFields,
}

impl RawRecord for RawRun {
    const ENTITY: EntityKind = EntityKind::Run;

    fn cell(&self, column: &str) -> Option<&str> {
        let value = match column {
            "run_id" => &self.run_id,
            "sample_id" => &self.sample_id,
            "library_layout" => &self.library_layout,
            "read_length" => &self.read_length,
            "fastq_gb" => &self.fastq_gb,
            "md5_1" => &self.md5_1,
            "md5_2" => &self.md5_2,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawQcMetric {
    pub run_id: String,
    pub total_reads: String,
    pub q30_rate: String,
    pub gc_percent: String,
    pub duplication_rate: String,
    pub adapter_content_flag: String,
    #[serde(skip_deserializing)]
    pub audit: AuditFields,
}

impl RawRecord for RawQcMetric {
    const ENTITY: EntityKind = EntityKind::QcMetric;

    fn cell(&self, column: &str) -> Option<&str> {
        let value = match column {
            "run_id" => &self.run_id,
            "total_reads" => &self.total_reads,
            "q30_rate" => &self.q30_rate,
            "gc_percent" => &self.gc_percent,
            "duplication_rate" => &self.duplication_rate,
            "adapter_content_flag" => &self.adapter_content_flag,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }
}

/// The three raw tables of one ETL invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTables {
    pub samples: Vec<RawSample>,
    pub runs: Vec<RawRun>,
    pub qc_metrics: Vec<RawQcMetric>,
}

impl RawTables {
    pub fn new(samples: Vec<RawSample>, runs: Vec<RawRun>, qc_metrics: Vec<RawQcMetric>) -> Self {
        Self {
            samples,
            runs,
            qc_metrics,
        }
    }

    pub fn row_count(&self, entity: EntityKind) -> usize {
        match entity {
            EntityKind::Sample => self.samples.len(),
            EntityKind::Run => self.runs.len(),
            EntityKind::QcMetric => self.qc_metrics.len(),
        }
    }

    pub fn total_rows(&self) -> usize {
        self.samples.len() + self.runs.len() + self.qc_metrics.len()
    }

    /// Raw cells of one column, in row order. Unknown columns read as empty.
    pub fn column(&self, entity: EntityKind, column: &str) -> Vec<&str> {
        fn cells<'a, R: RawRecord>(rows: &'a [R], column: &str) -> Vec<&'a str> {
            rows.iter()
                .map(|row| row.cell(column).unwrap_or(""))
                .collect()
        }
        match entity {
            EntityKind::Sample => cells(&self.samples, column),
            EntityKind::Run => cells(&self.runs, column),
            EntityKind::QcMetric => cells(&self.qc_metrics, column),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub sample_id: String,
    pub project_id: Option<String>,
    pub organism: Option<String>,
    pub collection_date: Option<NaiveDate>,
    pub tissue: Option<String>,
    pub platform: Option<Platform>,
    pub audit: AuditFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub run_id: String,
    pub sample_id: Option<String>,
    pub library_layout: Option<LibraryLayout>,
    pub read_length: Option<i64>,
    pub fastq_gb: Option<f64>,
    pub md5_1: Option<String>,
    pub md5_2: Option<String>,
    pub audit: AuditFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QcMetric {
    pub run_id: String,
    pub total_reads: Option<i64>,
    pub q30_rate: Option<f64>,
    pub gc_percent: Option<f64>,
    pub duplication_rate: Option<f64>,
    pub adapter_content_flag: bool,
    pub audit: AuditFields,
}

/// Validated, normalized and deduplicated tables, ready for the load stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CuratedTables {
    pub samples: Vec<Sample>,
    pub runs: Vec<Run>,
    pub qc_metrics: Vec<QcMetric>,
}

impl CuratedTables {
    pub fn total_rows(&self) -> usize {
        self.samples.len() + self.runs.len() + self.qc_metrics.len()
    }

    /// Render back to raw text in canonical form.
    pub fn to_raw(&self) -> RawTables {
        RawTables {
            samples: self.samples.iter().map(RawSample::from).collect(),
            runs: self.runs.iter().map(RawRun::from).collect(),
            qc_metrics: self.qc_metrics.iter().map(RawQcMetric::from).collect(),
        }
    }
}

fn render_text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn render<T: ToString>(value: Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl From<&Sample> for RawSample {
    fn from(sample: &Sample) -> Self {
        Self {
            sample_id: sample.sample_id.clone(),
            project_id: render_text(sample.project_id.as_ref()),
            organism: render_text(sample.organism.as_ref()),
            collection_date: sample
                .collection_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            tissue: render_text(sample.tissue.as_ref()),
            platform: render(sample.platform.as_ref().map(Platform::as_str)),
            audit: sample.audit.clone(),
        }
    }
}

impl From<&Run> for RawRun {
    fn from(run: &Run) -> Self {
        Self {
            run_id: run.run_id.clone(),
            sample_id: render_text(run.sample_id.as_ref()),
            library_layout: render(run.library_layout.as_ref().map(LibraryLayout::as_str)),
            read_length: render(run.read_length),
            fastq_gb: render(run.fastq_gb),
            md5_1: render_text(run.md5_1.as_ref()),
            md5_2: render_text(run.md5_2.as_ref()),
            audit: run.audit.clone(),
        }
    }
}

impl From<&QcMetric> for RawQcMetric {
    fn from(qc: &QcMetric) -> Self {
        Self {
            run_id: qc.run_id.clone(),
            total_reads: render(qc.total_reads),
            q30_rate: render(qc.q30_rate),
            gc_percent: render(qc.gc_percent),
            duplication_rate: render(qc.duplication_rate),
            adapter_content_flag: qc.adapter_content_flag.to_string(),
            audit: qc.audit.clone(),
        }
    }
}
