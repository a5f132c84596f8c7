use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState,
    error::ValidationError,
    models::{DisplayFilters, MetricSnapshot},
    services::{alert_monitor, market_service, view_state},
};

pub(crate) fn bad_request(e: ValidationError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "status": "error", "message": e.to_string() })),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct DataQuery {
    // comma separated intensities, e.g. HIGH,VERY_HIGH
    pub filters: Option<String>,
}

// GET /data
pub async fn get_data(State(state): State<AppState>, Query(q): Query<DataQuery>) -> Response {
    let filters = match q.filters.as_deref() {
        Some(raw) => match view_state::parse_intensities(raw) {
            Ok(intensities) => {
                let mut f = market_service::view_filters(&state).await;
                f.intensities = intensities;
                Some(f)
            }
            Err(e) => return bad_request(e),
        },
        None => None,
    };

    let rows = market_service::ranked_view(&state, filters).await;
    (StatusCode::OK, Json(rows)).into_response()
}

// POST /snapshots
pub async fn post_snapshots(
    State(state): State<AppState>,
    Json(batch): Json<Vec<MetricSnapshot>>,
) -> Response {
    let kept = alert_monitor::ingest_snapshots(&state, batch).await;
    (StatusCode::OK, Json(json!({ "ok": true, "rows": kept }))).into_response()
}

// GET /logs
pub async fn get_logs(State(state): State<AppState>) -> Response {
    let logs = market_service::logs(&state).await;
    (StatusCode::OK, Json(logs)).into_response()
}

#[derive(Deserialize)]
pub struct TimeRangeBody {
    pub start: String,
    pub end: String,
}

// POST /set-time-range
pub async fn post_time_range(State(state): State<AppState>, Json(body): Json<TimeRangeBody>) -> Response {
    match market_service::set_time_range(&state, &body.start, &body.end).await {
        Ok(window) => (
            StatusCode::OK,
            Json(json!({ "ok": true, "start": window.start().format("%H:%M").to_string(), "end": window.end().format("%H:%M").to_string() })),
        )
            .into_response(),
        Err(e) => bad_request(e),
    }
}

// GET /view-filters
pub async fn get_view_filters(State(state): State<AppState>) -> Response {
    let filters = market_service::view_filters(&state).await;
    (StatusCode::OK, Json(filters)).into_response()
}

// POST /view-filters
pub async fn post_view_filters(State(state): State<AppState>, Json(filters): Json<DisplayFilters>) -> Response {
    let filters = market_service::set_view_filters(&state, filters).await;
    (StatusCode::OK, Json(filters)).into_response()
}

// POST /view-filters/reset
pub async fn post_reset_view_filters(State(state): State<AppState>) -> Response {
    let filters = market_service::reset_view(&state).await;
    (StatusCode::OK, Json(filters)).into_response()
}

#[derive(Deserialize)]
pub struct HiddenBody {
    pub symbol: String,
    #[serde(default = "yes")]
    pub hidden: bool,
}

fn yes() -> bool {
    true
}

// POST /view-filters/hidden
pub async fn post_hidden_symbol(State(state): State<AppState>, Json(body): Json<HiddenBody>) -> Response {
    if body.symbol.trim().is_empty() {
        return bad_request(ValidationError::MissingSymbol);
    }

    let filters = market_service::set_symbol_hidden(&state, &body.symbol, body.hidden).await;
    (StatusCode::OK, Json(filters)).into_response()
}

// POST /notifications/reset
pub async fn post_reset_notifications(State(state): State<AppState>) -> Response {
    market_service::reset_notifications(&state).await;
    (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
}
