// HTTP request handlers
use crate::domain::entry::Score;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::snapshot::board_to_snapshot;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;

/// Body of a score submission. Browser clients send `name`/`score`, so the
/// lower-case keys are accepted too.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScoreMessage {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Score", alias = "score")]
    pub score: f64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full board as JSON
pub async fn get_board(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let board = state.board_service.board().await;
    let snapshot = board_to_snapshot(&board);

    match json_response(&snapshot, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => (status, "Internal Server Error =(").into_response(),
    }
}

/// Offer a new score to the board
///
/// The body is parsed as JSON whatever its declared content type.
pub async fn post_score(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let message: ScoreMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Rejecting malformed score message: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                format!("Bad Request. Invalid JSON Message: {}", e),
            )
                .into_response();
        }
    };

    // Fractional scores are truncated toward zero.
    let score = message.score as Score;
    match state.board_service.submit(&message.name, score).await {
        Ok(submission) => Json(submission).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Bare `OPTIONS` requests get an empty 200
pub async fn options() -> StatusCode {
    StatusCode::OK
}

/// `HEAD` is not served on the board route
pub async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed.")
}
