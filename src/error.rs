// Error types shared by the persistence and service layers
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    /// The board could not be encoded as JSON.
    #[error("unable to convert board to json: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the snapshot file failed.
    #[error("storage failure on {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored snapshot is missing or could not be decoded. Never
    /// reported as an empty board.
    #[error("board '{name}' is unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    #[error("invalid board name '{0}'")]
    InvalidName(String),
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal Server Error =(\nError: {}", self),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_names_the_board() {
        let err = BoardError::Unavailable {
            name: "first".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "board 'first' is unavailable: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_errors_render_as_server_errors() {
        let err = BoardError::InvalidName("../etc".to_string());
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
