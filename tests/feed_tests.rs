use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::json;
use volalert::{
    AppState,
    config::Settings,
    error::FeedError,
    services::{alert_monitor, feed::SnapshotFeed},
};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn upstream() -> Router {
    Router::new()
        .route(
            "/bare",
            get(|| async {
                Json(json!([
                    { "symbol": "tcs", "live_volume": 1200.0, "weekly_avg_volume": 1000.0 },
                    { "symbol": "INFY", "live_volume": 10.0 }
                ]))
            }),
        )
        .route(
            "/wrapped",
            get(|| async {
                Json(json!({ "snapshots": [{ "symbol": "TCS", "prev_day_volume": 500.0 }] }))
            }),
        )
        .route(
            "/down",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
}

#[tokio::test]
async fn bare_array_body() {
    let base = serve(upstream()).await;
    let feed = SnapshotFeed::new(format!("{base}/bare"));

    let batch = feed.fetch().await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].symbol, "tcs");
    assert_eq!(batch[0].weekly_avg_volume, Some(1000.0));
    assert_eq!(batch[1].weekly_avg_volume, None);
}

#[tokio::test]
async fn wrapped_body() {
    let base = serve(upstream()).await;
    let feed = SnapshotFeed::new(format!("{base}/wrapped"));

    let batch = feed.fetch().await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].prev_day_volume, Some(500.0));
    assert_eq!(batch[0].live_volume, None);
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let base = serve(upstream()).await;
    let feed = SnapshotFeed::new(format!("{base}/down"));

    match feed.fetch().await {
        Err(FeedError::Status { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn snapshot_tick_ingests_the_fetched_batch() {
    let base = serve(upstream()).await;
    let state = AppState::new(Settings {
        feed_url: Some(format!("{base}/bare")),
        ..Settings::default()
    });

    let kept = alert_monitor::run_snapshot_tick(&state).await.unwrap();
    assert_eq!(kept, 2);

    let board = state.board.read().await;
    assert!(board.get("TCS").is_some());
}

#[tokio::test]
async fn failed_tick_keeps_the_previous_batch() {
    let base = serve(upstream()).await;
    let state = AppState::new(Settings {
        feed_url: Some(format!("{base}/down")),
        ..Settings::default()
    });
    alert_monitor::ingest_snapshots(&state, vec![volalert::models::MetricSnapshot::new("OLD").with_live(1.0)]).await;

    let err = alert_monitor::run_snapshot_tick(&state).await.unwrap_err();
    assert!(matches!(err, FeedError::Status { status: 503, .. }));
    assert!(state.board.read().await.get("OLD").is_some());
}

#[tokio::test]
async fn snapshot_tick_without_feed_is_a_noop() {
    let state = AppState::new(Settings::default());
    assert_eq!(alert_monitor::run_snapshot_tick(&state).await.unwrap(), 0);
}
