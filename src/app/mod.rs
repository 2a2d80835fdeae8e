mod highscore;

use crate::game::world::World;
use crate::highscore::HighScores;
use crate::transport::ws_session::handle_socket;
use axum::{
    extract::ws::rejection::WebSocketUpgradeRejection,
    extract::{State, WebSocketUpgrade},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub struct AppState {
    pub world: Arc<World>,
    pub scores: HighScores,
    pub shutdown: CancellationToken,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
}

fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            ok: false,
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    // Any origin may connect, including to the websocket.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/ws", get(ws_handler))
        .route(
            "/highscore",
            get(highscore::highscore_get).post(highscore::highscore_post),
        )
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(OkResponse { ok: true })
}

async fn ws_handler(
    State(state): State<Arc<AppState>>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::debug!(%rejection, "websocket upgrade rejected");
            return error_response(StatusCode::BAD_REQUEST, "Could not open websocket connection");
        }
    };
    let world = Arc::clone(&state.world);
    let shutdown = state.shutdown.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, world, shutdown))
}
