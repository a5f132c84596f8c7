use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::alerts_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/alerts", get(alerts_controller::get_alerts))
        .route("/add-alert", post(alerts_controller::post_add_alert))
        .route("/remove-alert", post(alerts_controller::post_remove_alert))
        .route("/alerts/:id/active", post(alerts_controller::post_alert_active))
        .route("/alert-settings", get(alerts_controller::get_alert_settings).post(alerts_controller::post_alert_settings))
}
