use super::{error_response, AppState, OkResponse};
use crate::highscore::HighScoreEntry;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

pub(super) async fn highscore_post(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let entry = match serde_json::from_slice::<HighScoreEntry>(&body) {
        Ok(entry) => entry,
        Err(error) => {
            tracing::debug!(%error, "rejected high score submission");
            return error_response(StatusCode::BAD_REQUEST, "Invalid data");
        }
    };

    let count = state.scores.submit(entry).await;
    tracing::debug!(count, "accepted high score");
    (StatusCode::OK, Json(OkResponse { ok: true })).into_response()
}

pub(super) async fn highscore_get(State(state): State<Arc<AppState>>) -> Response {
    match state.scores.fetch().await {
        Ok(scores) => (StatusCode::OK, Json(scores)).into_response(),
        Err(error) => {
            tracing::warn!(?error, "failed to fetch high scores");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch scores")
        }
    }
}
