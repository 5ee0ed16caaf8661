//! Error types for step construction.
//!
//! Step-level problems surface as `StepError` and stop that step from being
//! built. Item-level problems never reach this type: they are logged and the
//! item is dropped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepError {
    /// Unsupported step type, or a grid item without its mandatory id.
    #[error("Invalid step data for '{step_id}': {cause}")]
    InvalidStepData { step_id: String, cause: String },

    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StepError {
    pub fn invalid(step_id: &str, cause: impl Into<String>) -> Self {
        StepError::InvalidStepData {
            step_id: step_id.to_string(),
            cause: cause.into(),
        }
    }

    pub fn is_invalid_step_data(&self) -> bool {
        matches!(self, StepError::InvalidStepData { .. })
    }
}

pub type Result<T> = std::result::Result<T, StepError>;
