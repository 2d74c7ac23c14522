//! HTTP gateway (Axum) for cyberbullying predictions.
//!
//! This module is primarily used by the `intent-guard` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{Router, routing::post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::predict_handler;
pub use state::HandlerState;

/// Builds the `POST /predict` router.
///
/// CORS is permissive: the browser extension calls it from arbitrary page origins.
pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/predict", post(predict_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
