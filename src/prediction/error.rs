use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("model produced a non-finite {field}")]
    NonFinite { field: &'static str },

    #[error("severity logits are empty")]
    EmptyLogits,

    #[error(
        "head outputs disagree on batch size (bullying {bullying}, intent {intent}, severity {severity})"
    )]
    BatchMismatch {
        bullying: usize,
        intent: usize,
        severity: usize,
    },

    #[error("failed to read head outputs: {0}")]
    Tensor(#[from] candle_core::Error),
}
