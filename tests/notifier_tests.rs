use chrono::NaiveTime;
use volalert::models::LogEvent;
use volalert::services::notifier::{Deduplicator, NotificationCategory, SeenEventSet};

fn ev(h: u32, m: u32, s: u32, msg: &str) -> LogEvent {
    LogEvent::new(NaiveTime::from_hms_opt(h, m, s).unwrap(), msg)
}

fn history() -> Vec<LogEvent> {
    vec![
        ev(9, 15, 0, "TIME WINDOW SET: 09:15 → 15:30"),
        ev(9, 16, 2, "ALERT CREATED: TCS > WEEKLY_AVG"),
        ev(9, 20, 5, "ALERT TRIGGERED: TCS > WEEKLY_AVG (live=2000, threshold=1000)"),
        ev(9, 20, 6, "STATUS CHANGE [TCS]: NORMAL → ALERT"),
        ev(9, 21, 0, "ALERT REMOVED: TCS > WEEKLY_AVG"),
    ]
}

#[test]
fn redelivered_history_notifies_once() {
    let mut dedup = Deduplicator::default();
    let logs = history();

    let first = dedup.notify(&logs);
    assert_eq!(first.len(), 3);
    assert_eq!(
        first.iter().map(|n| n.category).collect::<Vec<_>>(),
        vec![
            NotificationCategory::AlertCreated,
            NotificationCategory::AlertTriggered,
            NotificationCategory::StatusChange,
        ]
    );

    assert!(dedup.notify(&logs).is_empty());
}

#[test]
fn non_matching_entries_are_marked_seen() {
    let mut dedup = Deduplicator::default();
    dedup.notify(&history());

    assert_eq!(dedup.seen().len(), 5);
}

#[test]
fn only_appended_entries_are_new() {
    let mut dedup = Deduplicator::default();
    let mut logs = history();
    dedup.notify(&logs);

    logs.push(ev(9, 30, 0, "UNUSUAL VOLUME [INFY]: z=2.40 vol=120000"));
    let fresh = dedup.notify(&logs);

    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].category, NotificationCategory::UnusualVolume);
}

#[test]
fn same_message_at_another_time_is_a_new_event() {
    let mut dedup = Deduplicator::default();
    let msg = "ALERT TRIGGERED: TCS > 100";
    let logs = vec![ev(10, 0, 0, msg), ev(11, 0, 0, msg)];

    assert_eq!(dedup.notify(&logs).len(), 2);
}

#[test]
fn disabled_categories_stay_silent() {
    let mut dedup = Deduplicator::new(&[NotificationCategory::AlertTriggered], 100);
    let fresh = dedup.notify(&history());

    assert_eq!(fresh.len(), 1);
    assert!(fresh[0].message.starts_with("ALERT TRIGGERED"));
}

#[test]
fn clear_forgets_everything() {
    let mut dedup = Deduplicator::default();
    dedup.notify(&history());
    dedup.clear();

    assert!(dedup.seen().is_empty());
    assert_eq!(dedup.notify(&history()).len(), 3);
}

#[test]
fn seen_set_evicts_oldest_first() {
    let mut seen = SeenEventSet::with_capacity(2);
    let a = ev(1, 0, 0, "a");
    let b = ev(2, 0, 0, "b");
    let c = ev(3, 0, 0, "c");

    assert!(seen.insert(&a));
    assert!(seen.insert(&b));
    assert!(!seen.insert(&b));
    assert!(seen.insert(&c));

    assert_eq!(seen.len(), 2);
    assert!(!seen.contains(&a));
    assert!(seen.contains(&b));
    assert!(seen.contains(&c));
}

#[test]
fn categories_parse_from_config_names() {
    assert_eq!(
        NotificationCategory::parse("alert_triggered"),
        Some(NotificationCategory::AlertTriggered)
    );
    assert_eq!(
        NotificationCategory::parse("STATUS CHANGE"),
        Some(NotificationCategory::StatusChange)
    );
    assert_eq!(NotificationCategory::parse("nope"), None);
}

#[test]
fn seen_identity_is_time_and_message_not_instance() {
    let mut seen = SeenEventSet::with_capacity(10);
    assert!(seen.insert(&ev(9, 0, 0, "STATUS CHANGE [TCS]: NORMAL → ALERT")));

    assert!(seen.contains(&ev(9, 0, 0, "STATUS CHANGE [TCS]: NORMAL → ALERT")));
    assert!(!seen.insert(&ev(9, 0, 0, "STATUS CHANGE [TCS]: NORMAL → ALERT")));
    assert!(!seen.contains(&ev(9, 0, 1, "STATUS CHANGE [TCS]: NORMAL → ALERT")));
    assert_eq!(seen.len(), 1);
}
