//! Errors returned by the regret engine.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Why an evaluation was rejected.
///
/// Missing data is never an error; only malformed input is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("invalid emotional signal: {0}")]
    InvalidSignal(#[source] ValidationError),

    #[error("invalid order: {0}")]
    InvalidOrder(#[source] ValidationError),

    #[error("invalid history record at index {index}: {source}")]
    InvalidHistoryRecord {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(#[source] ValidationError),
}

impl EvaluationError {
    /// The underlying validation failure.
    pub fn validation(&self) -> &ValidationError {
        match self {
            EvaluationError::InvalidSignal(e)
            | EvaluationError::InvalidOrder(e)
            | EvaluationError::InvalidConfig(e) => e,
            EvaluationError::InvalidHistoryRecord { source, .. } => source,
        }
    }
}

impl From<EvaluationError> for DomainError {
    fn from(err: EvaluationError) -> Self {
        let field = err.validation().field().to_string();
        let detail_key = match &err {
            EvaluationError::InvalidSignal(_) => "signal_field",
            EvaluationError::InvalidOrder(_) => "order_field",
            EvaluationError::InvalidHistoryRecord { .. } => "history_field",
            EvaluationError::InvalidConfig(_) => "config_field",
        };
        let domain = DomainError::new(ErrorCode::ValidationFailed, err.to_string())
            .with_detail(detail_key, field);
        match err {
            EvaluationError::InvalidHistoryRecord { index, .. } => {
                domain.with_detail("history_index", index.to_string())
            }
            _ => domain,
        }
    }
}
