use std::path::PathBuf;
use thiserror::Error;

use crate::model::ModelError;
use crate::prediction::PredictionError;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model file not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load classifier: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("severity head does not have {expected} classes: {reason}")]
    SeverityClassMismatch { expected: usize, reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("classifier inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("invalid classifier configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl ClassifierError {
    /// `true` for errors raised while scoring a request (as opposed to loading).
    pub fn is_inference_error(&self) -> bool {
        matches!(
            self,
            ClassifierError::TokenizationFailed { .. } | ClassifierError::InferenceFailed { .. }
        )
    }
}

impl From<candle_core::Error> for ClassifierError {
    fn from(err: candle_core::Error) -> Self {
        ClassifierError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<PredictionError> for ClassifierError {
    fn from(err: PredictionError) -> Self {
        ClassifierError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<ModelError> for ClassifierError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::ModelNotFound { path } => ClassifierError::ModelNotFound { path },
            ModelError::SeverityClassMismatch { expected, reason } => {
                ClassifierError::SeverityClassMismatch { expected, reason }
            }
            ModelError::InvalidConfig { reason } => ClassifierError::InvalidConfig { reason },
            _ => ClassifierError::ModelLoadFailed {
                reason: err.to_string(),
            },
        }
    }
}
