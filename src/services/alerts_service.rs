use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    AppState, ServerEvent,
    error::ValidationError,
    models::{AlertRule, AlertSettings, AlertSettingsPatch, NewAlertRule},
    services::rule_evaluator,
};

fn alerts_updated(state: &AppState) {
    let _ = state.events_tx.send(ServerEvent::new("alertsUpdated", "1"));
}

pub async fn list_alerts(state: &AppState) -> Vec<AlertRule> {
    state.rules.read().await.list()
}

/// Validates and stores the rule, then evaluates it once against the latest
/// batch so an already-met condition fires without waiting for the rule tick.
pub async fn create_alert(state: &AppState, new: NewAlertRule) -> Result<AlertRule, ValidationError> {
    let mut rules = state.rules.write().await;
    let board = state.board.read().await;
    let settings = *state.alert_settings.read().await;
    let mut logs = state.logs.write().await;

    let rule = rules.create(new)?;
    logs.push(format!("ALERT CREATED: {}", rule.describe()));

    if let Some(snap) = board.get(&rule.symbol) {
        let hit = settings.allows(rule.right_type) && rule_evaluator::evaluate(&rule, snap);
        let results = HashMap::from([(rule.id, hit)]);

        for r in rules.record_results(&results, Utc::now()) {
            logs.push(format!("{} (on create)", rule_evaluator::triggered_message(&r, Some(snap))));
        }
    }

    let stored = rules.get(rule.id).cloned().unwrap_or(rule);
    drop((rules, board, logs));

    alerts_updated(state);
    Ok(stored)
}

/// Unknown ids are a no-op and return false.
pub async fn remove_alert(state: &AppState, id: Uuid) -> bool {
    let removed = state.rules.write().await.remove(id);

    let Some(rule) = removed else {
        tracing::debug!(%id, "remove for unknown alert id");
        return false;
    };

    state
        .logs
        .write()
        .await
        .push(format!("ALERT REMOVED: {}", rule.describe()));

    alerts_updated(state);
    true
}

pub async fn set_alert_active(state: &AppState, id: Uuid, active: bool) -> Option<AlertRule> {
    let updated = state.rules.write().await.set_active(id, active)?;

    let verb = if active { "ENABLED" } else { "DISABLED" };
    state
        .logs
        .write()
        .await
        .push(format!("ALERT {verb}: {}", updated.describe()));

    alerts_updated(state);
    Some(updated)
}

pub async fn alert_settings(state: &AppState) -> AlertSettings {
    *state.alert_settings.read().await
}

pub async fn update_alert_settings(state: &AppState, patch: AlertSettingsPatch) -> AlertSettings {
    let updated = {
        let mut settings = state.alert_settings.write().await;
        settings.apply(patch);
        *settings
    };

    state.logs.write().await.push(format!(
        "ALERT SETTINGS UPDATED: prev_day={} weekly_avg={} monthly_avg={}",
        updated.above_prev_day, updated.above_weekly_avg, updated.above_monthly_avg
    ));

    updated
}
