use intent_guard::Prediction;
use serde::{Deserialize, Serialize};

/// Body of `POST /predict`. A missing or `null` `text` scores the empty string.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl PredictRequest {
    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PredictResponse {
    pub is_bullying: bool,
    pub intent_score: f32,
    pub severity: usize,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            is_bullying: prediction.is_bullying,
            intent_score: prediction.intent_score,
            severity: prediction.severity,
        }
    }
}
