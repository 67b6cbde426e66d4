//! Error types for pipeline orchestration.

use thiserror::Error;

use genometa_model::Violation;

/// Errors surfaced by [`Pipeline::run`](crate::Pipeline::run).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Strict validation found violations. Carries every one of them, in
    /// canonical order; transform was not invoked.
    #[error("validation failed with {} violation(s)", violations.len())]
    ValidationFailed { violations: Vec<Violation> },
}

impl PipelineError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            PipelineError::ValidationFailed { violations } => violations,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
