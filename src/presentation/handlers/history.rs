use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::ConversationTurn;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: String,
    pub response: String,
}

impl From<ConversationTurn> for HistoryEntry {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            message: turn.query,
            response: turn.response,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}

pub async fn history_handler(State(state): State<AppState>) -> Response {
    match state.chat_service.history().await {
        Some(turns) => {
            let history = turns.into_iter().map(HistoryEntry::from).collect();
            (StatusCode::OK, Json(HistoryResponse { history })).into_response()
        }
        // Only reachable if the route is mounted without a history buffer.
        None => error_response(StatusCode::NOT_FOUND, "History is disabled."),
    }
}
