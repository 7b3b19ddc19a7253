//! Lifecycle of a single submission

use super::TriangleAnalysisResult;
use serde::Serialize;

/// Outcome of one submission. Created per submission and replaced wholesale
/// by the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Request in flight
    Pending,
    /// Validation, transport or service failure
    Failed { message: String },
    Succeeded { result: TriangleAnalysisResult },
}

impl AnalysisOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        AnalysisOutcome::Failed {
            message: message.into(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AnalysisOutcome::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed { .. })
    }

    pub fn result(&self) -> Option<&TriangleAnalysisResult> {
        match self {
            AnalysisOutcome::Succeeded { result } => Some(result),
            _ => None,
        }
    }
}
