use std::cmp::Ordering;

use crate::models::{ClassifiedRow, DisplayFilters, Intensity, RankedRow, StatusLabel};

pub const PRIORITY_ALERT: u8 = 4;

pub fn priority(intensity: Intensity, status: &StatusLabel) -> u8 {
    if status.is_alert() {
        return PRIORITY_ALERT;
    }

    match intensity {
        Intensity::VeryHigh => 3,
        Intensity::High => 2,
        _ if status.is_above() => 1,
        _ => 0,
    }
}

/// Intensity used for ranking: filtered-out intensities are demoted to NORMAL,
/// except for rows holding an active triggered alert.
pub fn display_intensity(row: &ClassifiedRow, filters: &DisplayFilters) -> Intensity {
    if row.status.is_alert() || filters.shows(row.intensity) {
        row.intensity
    } else {
        Intensity::Normal
    }
}

pub fn rank(row: &ClassifiedRow, filters: &DisplayFilters) -> u8 {
    priority(display_intensity(row, filters), &row.status)
}

fn live_or_zero(row: &RankedRow) -> f64 {
    row.row.snapshot.live_volume.unwrap_or(0.0)
}

/// Priority desc, then live volume desc, then symbol asc. Always a full re-sort.
pub fn ranked_view(rows: &[ClassifiedRow], filters: &DisplayFilters) -> Vec<RankedRow> {
    let mut out: Vec<RankedRow> = rows
        .iter()
        .filter(|r| !filters.is_hidden(&r.snapshot.symbol))
        .map(|r| {
            let display = display_intensity(r, filters);
            RankedRow {
                row: r.clone(),
                display_intensity: display,
                priority: priority(display, &r.status),
                is_demoted: display != r.intensity,
            }
        })
        .collect();

    out.sort_by(compare_rows);
    out
}

fn compare_rows(a: &RankedRow, b: &RankedRow) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| live_or_zero(b).total_cmp(&live_or_zero(a)))
        .then_with(|| a.row.snapshot.symbol.cmp(&b.row.snapshot.symbol))
}
