use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;
use volalert::{AppState, config, routes, services::alert_monitor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::load();
    let state = AppState::new(settings.clone());

    alert_monitor::spawn_snapshot_poller(state.clone());
    alert_monitor::spawn_rule_monitor(state.clone());
    alert_monitor::spawn_log_notifier(state.clone());

    let app = routes::app(state);

    let addr = SocketAddr::from((settings.host.parse::<std::net::IpAddr>()?, settings.port));
    tracing::info!(
        "volalert listening on http://{} (classifier={}, window={})",
        addr,
        settings.classifier,
        settings.window.label()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
