use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{PredictRequest, PredictResponse};
use crate::gateway::state::HandlerState;

#[instrument(skip(state, payload), fields(text_len = tracing::field::Empty))]
pub async fn predict_handler(
    State(state): State<HandlerState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, GatewayError> {
    let Json(body) = payload?;
    let text = parse_predict_request(body)?.into_text();
    tracing::Span::current().record("text_len", text.len());

    let classifier = Arc::clone(&state.classifier);
    let prediction = tokio::task::spawn_blocking(move || classifier.predict(&text))
        .await
        .map_err(|e| {
            error!(error = %e, "Inference worker did not complete");
            GatewayError::InternalError(format!("inference worker failed: {}", e))
        })?
        .map_err(|e| {
            error!(error = %e, during_inference = e.is_inference_error(), "Prediction failed");
            GatewayError::from(e)
        })?;

    debug!(
        is_bullying = prediction.is_bullying,
        intent_score = prediction.intent_score,
        severity = prediction.severity,
        "Prediction complete"
    );

    Ok(Json(PredictResponse::from(prediction)))
}

pub(crate) fn parse_predict_request(body: serde_json::Value) -> Result<PredictRequest, GatewayError> {
    if !body.is_object() {
        return Err(GatewayError::InvalidRequest(
            "request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}
