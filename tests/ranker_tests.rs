use volalert::models::{
    Baseline, ClassifiedRow, DisplayFilters, Intensity, MetricSnapshot, StatusLabel,
};
use volalert::services::ranker;

fn row(symbol: &str, live: f64, intensity: Intensity, status: StatusLabel) -> ClassifiedRow {
    ClassifiedRow {
        snapshot: MetricSnapshot::new(symbol).with_live(live),
        intensity,
        status,
    }
}

fn symbols(rows: &[volalert::models::RankedRow]) -> Vec<String> {
    rows.iter().map(|r| r.row.snapshot.symbol.clone()).collect()
}

#[test]
fn alerts_first_then_volume() {
    let rows = vec![
        row("A", 500.0, Intensity::Normal, StatusLabel::Alert),
        row("B", 1000.0, Intensity::Normal, StatusLabel::Alert),
        row("C", 9999.0, Intensity::Normal, StatusLabel::Normal),
    ];

    let view = ranker::ranked_view(&rows, &DisplayFilters::default());
    assert_eq!(symbols(&view), vec!["B", "A", "C"]);
    assert_eq!(view[0].priority, 4);
    assert_eq!(view[2].priority, 0);
}

#[test]
fn priority_levels() {
    let above = StatusLabel::Above(vec![Baseline::WeeklyAvg]);
    assert_eq!(ranker::priority(Intensity::VeryHigh, &StatusLabel::Alert), 4);
    assert_eq!(ranker::priority(Intensity::VeryHigh, &above), 3);
    assert_eq!(ranker::priority(Intensity::High, &StatusLabel::Normal), 2);
    assert_eq!(ranker::priority(Intensity::Normal, &above), 1);
    assert_eq!(ranker::priority(Intensity::Waiting, &StatusLabel::Normal), 0);
}

#[test]
fn symbol_breaks_full_ties() {
    let rows = vec![
        row("ZED", 100.0, Intensity::High, StatusLabel::Normal),
        row("ABC", 100.0, Intensity::High, StatusLabel::Normal),
        row("MID", 100.0, Intensity::High, StatusLabel::Normal),
    ];

    let view = ranker::ranked_view(&rows, &DisplayFilters::default());
    assert_eq!(symbols(&view), vec!["ABC", "MID", "ZED"]);
}

#[test]
fn filtered_out_intensity_is_demoted() {
    let rows = vec![
        row("HOT", 9000.0, Intensity::VeryHigh, StatusLabel::Above(vec![Baseline::WeeklyAvg])),
        row("WARM", 100.0, Intensity::High, StatusLabel::Normal),
    ];
    let filters = DisplayFilters::only(&[Intensity::High]);

    let view = ranker::ranked_view(&rows, &filters);
    assert_eq!(symbols(&view), vec!["WARM", "HOT"]);

    let hot = &view[1];
    assert!(hot.is_demoted);
    assert_eq!(hot.display_intensity, Intensity::Normal);
    assert_eq!(hot.priority, 1);
    assert_eq!(hot.row.intensity, Intensity::VeryHigh);
}

#[test]
fn triggered_alert_bypasses_demotion() {
    let alert = row("ALRT", 10.0, Intensity::VeryHigh, StatusLabel::Alert);
    let filters = DisplayFilters::only(&[]);

    assert_eq!(ranker::rank(&alert, &filters), 4);
    let view = ranker::ranked_view(&[alert], &filters);
    assert!(!view[0].is_demoted);
    assert_eq!(view[0].display_intensity, Intensity::VeryHigh);
}

#[test]
fn hidden_symbols_are_dropped() {
    let rows = vec![
        row("A", 1.0, Intensity::Normal, StatusLabel::Normal),
        row("B", 2.0, Intensity::Normal, StatusLabel::Normal),
    ];
    let mut filters = DisplayFilters::default();
    filters.hidden_symbols.insert("B".to_string());

    let view = ranker::ranked_view(&rows, &filters);
    assert_eq!(symbols(&view), vec!["A"]);
}

#[test]
fn missing_live_volume_sorts_as_zero() {
    let mut no_live = row("NOLIVE", 0.0, Intensity::Waiting, StatusLabel::Normal);
    no_live.snapshot.live_volume = None;
    let rows = vec![no_live, row("SOME", 5.0, Intensity::Waiting, StatusLabel::Normal)];

    let view = ranker::ranked_view(&rows, &DisplayFilters::default());
    assert_eq!(symbols(&view), vec!["SOME", "NOLIVE"]);
}
