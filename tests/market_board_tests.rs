use chrono::{NaiveDate, NaiveDateTime};
use volalert::models::{Intensity, MetricSnapshot, NewAlertRule, Operator, RightType, StatusLabel, TradingWindow};
use volalert::services::{
    classifier::{RatioThreshold, WindowStatistical},
    event_log::EventLog,
    market_board::{self, MarketBoard},
    rule_store::RuleStore,
};

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn ratio_board() -> MarketBoard {
    MarketBoard::new(Box::new(RatioThreshold), TradingWindow::default())
}

fn messages(log: &EventLog) -> Vec<String> {
    log.entries().into_iter().map(|e| e.message).collect()
}

#[test]
fn status_change_is_logged_after_the_first_tick() {
    let mut board = ratio_board();
    let mut log = EventLog::default();

    let quiet = vec![MetricSnapshot::new("TCS").with_live(10.0).with_weekly(1000.0)];
    let loud = vec![MetricSnapshot::new("TCS").with_live(1200.0).with_weekly(1000.0)];

    board.ingest(quiet.clone(), &[], at(2, 10, 0), &mut log);
    assert!(log.is_empty());

    board.ingest(quiet, &[], at(2, 10, 1), &mut log);
    assert!(log.is_empty());

    board.ingest(loud, &[], at(2, 10, 2), &mut log);
    assert_eq!(messages(&log), vec!["STATUS CHANGE [TCS]: NORMAL → ABOVE WEEKLY AVG"]);
}

#[test]
fn triggered_rule_shows_as_alert_row() {
    let mut board = ratio_board();
    let mut log = EventLog::default();
    let mut store = RuleStore::new();
    let mut rule = store
        .create(NewAlertRule::new("TCS", Operator::Gt, RightType::Fixed, Some(5.0)))
        .unwrap();
    rule.triggered = true;

    board.ingest(
        vec![MetricSnapshot::new("TCS").with_live(1600.0).with_weekly(1000.0)],
        &[rule.clone()],
        at(2, 10, 0),
        &mut log,
    );

    let rows = board.rows(&[rule], at(2, 10, 0).time());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, StatusLabel::Alert);
    assert_eq!(rows[0].intensity, Intensity::VeryHigh);
}

#[test]
fn new_day_forgets_previous_status() {
    let mut board = ratio_board();
    let mut log = EventLog::default();

    board.ingest(
        vec![MetricSnapshot::new("TCS").with_live(10.0).with_weekly(1000.0)],
        &[],
        at(2, 15, 0),
        &mut log,
    );
    board.ingest(
        vec![MetricSnapshot::new("TCS").with_live(5000.0).with_weekly(1000.0)],
        &[],
        at(3, 9, 20),
        &mut log,
    );

    assert!(log.is_empty());
}

#[test]
fn batch_is_replaced_and_normalised() {
    let mut board = ratio_board();
    let mut log = EventLog::default();

    board.ingest(
        vec![MetricSnapshot::new("OLD").with_live(1.0)],
        &[],
        at(2, 10, 0),
        &mut log,
    );

    let kept = board.ingest(
        vec![
            MetricSnapshot::new(" tcs ").with_live(1.0),
            MetricSnapshot::new("").with_live(1.0),
            MetricSnapshot::new("TCS").with_live(2.0).with_weekly(-5.0),
        ],
        &[],
        at(2, 10, 1),
        &mut log,
    );

    assert_eq!(kept, 1);
    assert!(board.get("OLD").is_none());

    let tcs = board.get("TCS").unwrap();
    assert_eq!(tcs.live_volume, Some(2.0));
    assert_eq!(tcs.weekly_avg_volume, None);
}

#[test]
fn normalize_keeps_first_position_for_duplicates() {
    let out = market_board::normalize_batch(vec![
        MetricSnapshot::new("A").with_live(1.0),
        MetricSnapshot::new("B").with_live(1.0),
        MetricSnapshot::new("A").with_live(3.0),
    ]);

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].symbol, "A");
    assert_eq!(out[0].live_volume, Some(3.0));
}

#[test]
fn window_spike_is_logged_once_per_window() {
    let window = TradingWindow::default();
    let mut board = MarketBoard::new(Box::new(WindowStatistical::new(window)), window);
    let mut log = EventLog::default();

    let spiking = vec![MetricSnapshot::new("INFY").with_live(1.0).with_window(100_000.0, 375_000.0, 10_000.0)];

    board.ingest(spiking.clone(), &[], at(2, 10, 30), &mut log);
    board.ingest(spiking.clone(), &[], at(2, 10, 31), &mut log);

    let spikes: Vec<String> = messages(&log)
        .into_iter()
        .filter(|m| m.starts_with("UNUSUAL VOLUME [INFY]"))
        .collect();
    assert_eq!(spikes.len(), 1);

    board.set_window(TradingWindow::parse("09:15", "15:30").unwrap(), &mut log);
    board.ingest(spiking, &[], at(2, 10, 30), &mut log);

    let all = messages(&log);
    assert!(all.iter().any(|m| m == "TIME WINDOW SET: 09:15 → 15:30"));
    assert_eq!(all.iter().filter(|m| m.starts_with("UNUSUAL VOLUME")).count(), 2);
}

#[test]
fn bad_windows_are_rejected() {
    assert!(TradingWindow::parse("15:30", "09:15").is_err());
    assert!(TradingWindow::parse("9am", "10:00").is_err());
    assert_eq!(TradingWindow::parse("09:15", "15:30").unwrap().minutes(), 375);
}

#[test]
fn reversed_window_never_reaches_the_classifier() {
    let start = chrono::NaiveTime::from_hms_opt(15, 30, 0).unwrap();
    let end = chrono::NaiveTime::from_hms_opt(9, 15, 0).unwrap();
    assert!(TradingWindow::new(start, end).is_err());

    let window = TradingWindow::new(end, start).unwrap();
    assert_eq!(window.start(), end);
    assert_eq!(window.end(), start);

    let strategy = WindowStatistical::new(window);
    let late = chrono::NaiveTime::from_hms_opt(23, 0, 0).unwrap();
    let snap = MetricSnapshot::new("X").with_live(1.0).with_window(375_000.0, 375_000.0, 10_000.0);

    // past the end the whole daily mean is expected
    assert_eq!(window.elapsed_minutes(late), 375);
    assert_eq!(strategy.zscore(&snap, late), Some(0.0));
}
