//! Orchestrator for the genomics metadata ETL core.
//!
//! Wires validation and transformation together under the mode contract.
//! Ingest and load are collaborators outside this crate.

pub mod error;
pub mod pipeline;
pub mod stage;

pub use error::{PipelineError, Result};
pub use pipeline::{Pipeline, PipelineRun};
pub use stage::{StandardTransform, TransformStage};
