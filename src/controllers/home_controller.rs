use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::AppState;

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let classifier = state.board.read().await.strategy_name();

    Json(json!({
        "status": "online",
        "service": "volalert",
        "version": env!("CARGO_PKG_VERSION"),
        "classifier": classifier,
        "feed": state.feed.as_ref().map(|f| f.url().to_string()),
    }))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": "error", "message": "not found" })),
    )
}
