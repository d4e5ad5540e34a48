//! HTTP routes and handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error};

use crate::service;
use crate::state::AppState;
use modscreen_core::{ClassifyRequest, ClassifyResponse, Error};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/classify", post(classify))
        .fallback(fallback)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

/// Classification handler.
///
/// Request-shape validation happens in the `Json` extractor; a body that
/// does not deserialize is rejected before any capability is invoked.
/// Capability failures propagate untranslated into [`AppError`].
async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    debug!(
        pii_redact = request.pii_redact,
        text_chars = request.text.chars().count(),
        "Received classify request"
    );

    let response = service::classify_text(&state, &request).await?;
    Ok(Json(response))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

/// Error surfaced to HTTP callers
#[derive(Debug)]
pub struct AppError(Error);

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);

        let body = json!({
            "error": {
                "message": self.0.to_string(),
                "type": "internal_error",
            }
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
