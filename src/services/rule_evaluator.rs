use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{AlertRule, AlertSettings, MetricSnapshot, RightType};

/// Right-hand side of the rule for this snapshot. `None` while the baseline is missing.
pub fn resolve_rhs(rule: &AlertRule, snapshot: &MetricSnapshot) -> Option<f64> {
    match rule.right_type {
        RightType::Fixed => rule.right_value,
        RightType::PrevDay => snapshot.prev_day_volume,
        RightType::WeeklyAvg => snapshot.weekly_avg_volume,
        RightType::MonthlyAvg => snapshot.monthly_avg_volume,
        RightType::MultiplierWeekly => Some(rule.right_value? * snapshot.weekly_avg_volume?),
    }
}

/// `live OPERATOR rhs`. No live data (absent or zero) or a missing baseline means "not met".
pub fn evaluate(rule: &AlertRule, snapshot: &MetricSnapshot) -> bool {
    let Some(live) = snapshot.live() else {
        return false;
    };
    let Some(rhs) = resolve_rhs(rule, snapshot) else {
        return false;
    };

    rule.operator.compare(live, rhs)
}

/// Evaluates every rule against the snapshot with the same symbol.
/// Rules with no matching snapshot are left out of the result.
pub fn evaluate_all(rules: &[AlertRule], snapshots: &[MetricSnapshot]) -> HashMap<Uuid, bool> {
    evaluate_all_with(rules, snapshots, &AlertSettings::default())
}

/// Same as [`evaluate_all`], with disabled rule types resolving to not triggered.
pub fn evaluate_all_with(
    rules: &[AlertRule],
    snapshots: &[MetricSnapshot],
    settings: &AlertSettings,
) -> HashMap<Uuid, bool> {
    let by_symbol: HashMap<&str, &MetricSnapshot> =
        snapshots.iter().map(|s| (s.symbol.as_str(), s)).collect();

    let mut out = HashMap::with_capacity(rules.len());
    for rule in rules {
        let Some(snapshot) = by_symbol.get(rule.symbol.as_str()) else {
            tracing::debug!(rule = %rule.id, symbol = %rule.symbol, "rule symbol not in batch, skipping");
            continue;
        };

        let hit = settings.allows(rule.right_type) && evaluate(rule, snapshot);
        out.insert(rule.id, hit);
    }

    out
}

pub fn triggered_message(rule: &AlertRule, snapshot: Option<&MetricSnapshot>) -> String {
    let live = snapshot.and_then(|s| s.live_volume).unwrap_or(0.0);
    let rhs = snapshot.and_then(|s| resolve_rhs(rule, s));

    match rhs {
        Some(rhs) => format!(
            "ALERT TRIGGERED: {} (live={:.0}, threshold={:.0})",
            rule.describe(),
            live,
            rhs
        ),
        None => format!("ALERT TRIGGERED: {} (live={:.0})", rule.describe(), live),
    }
}
