//! Turns raw head outputs into the values returned to callers.

pub mod error;


pub use error::PredictionError;

use serde::{Deserialize, Serialize};

use crate::constants::{BULLYING_THRESHOLD, INTENT_SCORE_SCALE};
use crate::model::HeadOutputs;

/// Scored text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// `true` when the bullying probability exceeds [`BULLYING_THRESHOLD`].
    pub is_bullying: bool,
    /// Harmful-intent estimate in `[0, 100]`.
    pub intent_score: f32,
    /// Severity class index in `[0, num_severity)`.
    pub severity: usize,
}

/// Strict threshold on the bullying probability.
pub fn is_bullying(probability: f32) -> bool {
    probability > BULLYING_THRESHOLD
}

/// Index of the largest logit; ties resolve to the lowest index.
pub fn argmax(logits: &[f32]) -> Option<usize> {
    logits
        .iter()
        .enumerate()
        .max_by(|(i, a), (j, b)| a.total_cmp(b).then_with(|| j.cmp(i)))
        .map(|(i, _)| i)
}

/// Builds a [`Prediction`] from the values of a single batch item.
pub fn from_head_values(
    probability: f32,
    intent_score: f32,
    severity_logits: &[f32],
) -> Result<Prediction, PredictionError> {
    if !probability.is_finite() {
        return Err(PredictionError::NonFinite {
            field: "is_bullying",
        });
    }
    if !intent_score.is_finite() {
        return Err(PredictionError::NonFinite {
            field: "intent_score",
        });
    }
    if severity_logits.iter().any(|v| !v.is_finite()) {
        return Err(PredictionError::NonFinite {
            field: "severity_logits",
        });
    }

    let severity = argmax(severity_logits).ok_or(PredictionError::EmptyLogits)?;

    Ok(Prediction {
        is_bullying: is_bullying(probability),
        intent_score: intent_score.clamp(0.0, INTENT_SCORE_SCALE as f32),
        severity,
    })
}

/// Post-processes a whole batch of head outputs.
pub fn from_outputs(outputs: &HeadOutputs) -> Result<Vec<Prediction>, PredictionError> {
    let probabilities = outputs.is_bullying.to_vec1::<f32>()?;
    let intent_scores = outputs.intent_score.to_vec1::<f32>()?;
    let severity_logits = outputs.severity_logits.to_vec2::<f32>()?;

    if probabilities.len() != intent_scores.len() || probabilities.len() != severity_logits.len()
    {
        return Err(PredictionError::BatchMismatch {
            bullying: probabilities.len(),
            intent: intent_scores.len(),
            severity: severity_logits.len(),
        });
    }

    probabilities
        .into_iter()
        .zip(intent_scores)
        .zip(severity_logits.iter())
        .map(|((probability, intent), logits)| from_head_values(probability, intent, logits))
        .collect()
}
