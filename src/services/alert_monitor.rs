//! The three periodic triggers: snapshot tick, rule tick and log tick.
//! Each runs on its own interval and tolerates the others being stale.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use tokio::time;

use crate::{
    AppState, ServerEvent,
    error::FeedError,
    models::{AlertSettings, MetricSnapshot},
    services::{event_log::EventLog, rule_evaluator, rule_store::RuleStore},
};

/// Evaluates a snapshot of the rules and logs rising edges of active rules.
/// Returns how many rules started triggering.
pub fn apply_rule_tick(
    rules: &mut RuleStore,
    snapshots: &[MetricSnapshot],
    settings: &AlertSettings,
    log: &mut EventLog,
    now: DateTime<Utc>,
) -> usize {
    let current = rules.list();
    let results = rule_evaluator::evaluate_all_with(&current, snapshots, settings);
    let rising = rules.record_results(&results, now);

    let mut fired = 0;
    for rule in &rising {
        if !rule.is_active {
            tracing::debug!(rule = %rule.id, "inactive rule triggered, notification suppressed");
            continue;
        }

        let snap = snapshots.iter().find(|s| s.symbol == rule.symbol);
        log.push(rule_evaluator::triggered_message(rule, snap));
        fired += 1;
    }

    fired
}

pub async fn ingest_snapshots(state: &AppState, batch: Vec<MetricSnapshot>) -> usize {
    let rules = state.rules.read().await.list();
    let mut board = state.board.write().await;
    let mut logs = state.logs.write().await;

    board.ingest(batch, &rules, Local::now().naive_local(), &mut logs)
}

/// Fetches one batch from the feed, if one is configured, and ingests it.
pub async fn run_snapshot_tick(state: &AppState) -> Result<usize, FeedError> {
    let Some(feed) = state.feed.as_ref() else {
        return Ok(0);
    };

    let batch = feed.fetch().await?;
    Ok(ingest_snapshots(state, batch).await)
}

pub async fn run_rule_tick(state: &AppState) -> usize {
    let mut rules = state.rules.write().await;
    let board = state.board.read().await;
    let settings = *state.alert_settings.read().await;
    let mut logs = state.logs.write().await;

    let fired = apply_rule_tick(&mut rules, board.snapshots(), &settings, &mut logs, Utc::now());
    drop((rules, board, logs));

    if fired > 0 {
        let _ = state.events_tx.send(ServerEvent::new("alertsUpdated", "1"));
    }

    fired
}

/// Runs the full log through the deduplicator and fans out what is new.
pub async fn run_log_tick(state: &AppState) -> usize {
    let entries = state.logs.read().await.entries();
    let fresh = state.dedup.lock().await.notify(&entries);

    for n in &fresh {
        match serde_json::to_string(n) {
            Ok(data) => {
                let _ = state.events_tx.send(ServerEvent::new("notification", data));
            }
            Err(e) => tracing::error!("notification encode failed: {e}"),
        }
    }

    fresh.len()
}

pub fn spawn_snapshot_poller(state: AppState) {
    let Some(url) = state.feed.as_ref().map(|f| f.url().to_string()) else {
        tracing::info!("no FEED_URL set, expecting batches on POST /snapshots");
        return;
    };

    tokio::spawn(async move {
        tracing::info!("snapshot poller started: {url}");
        let mut interval = time::interval(Duration::from_millis(state.settings.snapshot_poll_ms));

        loop {
            interval.tick().await;

            if let Err(e) = run_snapshot_tick(&state).await {
                tracing::warn!("[snapshot-tick] skipped: {e}");
            }
        }
    });
}

pub fn spawn_rule_monitor(state: AppState) {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_millis(state.settings.rule_tick_ms));

        loop {
            interval.tick().await;
            run_rule_tick(&state).await;
        }
    });
}

pub fn spawn_log_notifier(state: AppState) {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_millis(state.settings.log_tick_ms));

        loop {
            interval.tick().await;
            run_log_tick(&state).await;
        }
    });
}
