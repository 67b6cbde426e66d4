//! Transform stage seam.
//!
//! The orchestrator talks to the transformer through [`TransformStage`] so
//! tests can substitute a recording stage and observe whether, and with
//! what, it was invoked.

use genometa_model::{Conventions, CuratedTables, RawTables};

/// Turns validated raw tables into curated tables.
pub trait TransformStage: Send + Sync {
    /// Human-readable name for logging.
    fn stage_name(&self) -> &'static str {
        "transform"
    }

    fn transform(&self, tables: RawTables, conventions: &Conventions) -> CuratedTables;
}

/// The standard normalizer/transformer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTransform;

impl TransformStage for StandardTransform {
    fn transform(&self, tables: RawTables, conventions: &Conventions) -> CuratedTables {
        genometa_transform::transform(tables, conventions)
    }
}
