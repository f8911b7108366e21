use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::SourceMode;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(alias = "input_query")]
    pub query: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[tracing::instrument(skip(state, request), fields(source))]
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let mode = SourceMode::from_request(request.source.as_deref());
    tracing::Span::current().record("source", mode.as_str());
    tracing::debug!(query = %sanitize_prompt(&request.query), "Processing chat request");

    match state.chat_service.answer(&request.query, mode).await {
        Ok(response) => {
            tracing::info!(response_chars = response.len(), "Chat request answered");
            (StatusCode::OK, Json(ChatResponse { response })).into_response()
        }
        Err(e) if e.is_model_not_found() => {
            tracing::error!(error = %e, "Configured model is not available");
            error_response(
                StatusCode::NOT_FOUND,
                "The configured model was not found. Check the model name and API key.",
            )
        }
        Err(e) if e.is_timeout() => {
            tracing::error!(error = %e, "Model call timed out");
            error_response(
                StatusCode::GATEWAY_TIMEOUT,
                "The model did not respond in time.",
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat request failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing the request.",
            )
        }
    }
}
