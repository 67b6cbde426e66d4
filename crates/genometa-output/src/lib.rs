//! Output writers for the genomics metadata ETL.
//!
//! - **parquet**: curated tables as zstd-compressed Parquet, hive-partitioned
//! - **quarantine**: rejected rows and violations as JSON side files
//!
//! Both are collaborators of the core; neither interprets business rules.

pub mod error;
pub mod frames;
pub mod parquet;
pub mod quarantine;

pub use error::{OutputError, Result};
pub use parquet::{
    HIVE_DEFAULT_PARTITION, QC_METRICS_DIR, RUNS_DIR, SAMPLES_FILE, WrittenFile, clear_curated,
    hive_escape, write_curated,
};
pub use quarantine::{VIOLATIONS_FILE, jsonl_file_name, write_quarantine};
