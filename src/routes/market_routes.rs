use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::market_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/data", get(market_controller::get_data))
        .route("/snapshots", post(market_controller::post_snapshots))
        .route("/logs", get(market_controller::get_logs))
        .route("/set-time-range", post(market_controller::post_time_range))
        .route("/view-filters", get(market_controller::get_view_filters).post(market_controller::post_view_filters))
        .route("/view-filters/reset", post(market_controller::post_reset_view_filters))
        .route("/view-filters/hidden", post(market_controller::post_hidden_symbol))
        .route("/notifications/reset", post(market_controller::post_reset_notifications))
}
