use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{
    AppState,
    controllers::market_controller::bad_request,
    models::{AlertSettingsPatch, NewAlertRule},
    services::alerts_service,
};

fn bad_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "ok": false, "message": "bad id" })),
    )
        .into_response()
}

// GET /alerts
pub async fn get_alerts(State(state): State<AppState>) -> Response {
    let alerts = alerts_service::list_alerts(&state).await;
    (StatusCode::OK, Json(alerts)).into_response()
}

// POST /add-alert
pub async fn post_add_alert(State(state): State<AppState>, Json(new): Json<NewAlertRule>) -> Response {
    match alerts_service::create_alert(&state, new).await {
        Ok(rule) => (StatusCode::OK, Json(json!({ "status": "ok", "alert": rule }))).into_response(),
        Err(e) => bad_request(e),
    }
}

#[derive(Deserialize)]
pub struct RemoveAlertBody {
    pub id: Option<String>,
}

// POST /remove-alert
pub async fn post_remove_alert(State(state): State<AppState>, Json(body): Json<RemoveAlertBody>) -> Response {
    let Some(raw) = body.id else {
        return bad_id();
    };
    let Ok(id) = Uuid::parse_str(raw.trim()) else {
        return bad_id();
    };

    let ok = alerts_service::remove_alert(&state, id).await;
    (StatusCode::OK, Json(json!({ "ok": ok }))).into_response()
}

#[derive(Deserialize)]
pub struct ActiveBody {
    pub is_active: bool,
}

// POST /alerts/:id/active
pub async fn post_alert_active(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ActiveBody>,
) -> Response {
    let Ok(id) = Uuid::parse_str(id.trim()) else {
        return bad_id();
    };

    match alerts_service::set_alert_active(&state, id, body.is_active).await {
        Some(rule) => (StatusCode::OK, Json(json!({ "ok": true, "alert": rule }))).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "message": "no such alert" })),
        )
            .into_response(),
    }
}

// GET /alert-settings
pub async fn get_alert_settings(State(state): State<AppState>) -> Response {
    let settings = alerts_service::alert_settings(&state).await;
    (StatusCode::OK, Json(settings)).into_response()
}

// POST /alert-settings
pub async fn post_alert_settings(
    State(state): State<AppState>,
    Json(patch): Json<AlertSettingsPatch>,
) -> Response {
    let settings = alerts_service::update_alert_settings(&state, patch).await;
    (StatusCode::OK, Json(json!({ "ok": true, "settings": settings }))).into_response()
}
