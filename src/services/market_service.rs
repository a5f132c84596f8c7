use chrono::Local;

use crate::{
    AppState,
    error::ValidationError,
    models::{DisplayFilters, LogEvent, RankedRow, TradingWindow},
    services::ranker,
};

/// Ranked dashboard rows. `filters` overrides the stored view state for this call only.
pub async fn ranked_view(state: &AppState, filters: Option<DisplayFilters>) -> Vec<RankedRow> {
    let rules = state.rules.read().await.list();
    let rows = state.board.read().await.rows(&rules, Local::now().time());

    let filters = match filters {
        Some(f) => f,
        None => state.view.read().await.filters().clone(),
    };

    ranker::ranked_view(&rows, &filters)
}

pub async fn set_time_range(state: &AppState, start: &str, end: &str) -> Result<TradingWindow, ValidationError> {
    let window = TradingWindow::parse(start, end)?;

    let mut board = state.board.write().await;
    let mut logs = state.logs.write().await;
    board.set_window(window, &mut logs);

    Ok(window)
}

pub async fn logs(state: &AppState) -> Vec<LogEvent> {
    state.logs.read().await.entries()
}

pub async fn view_filters(state: &AppState) -> DisplayFilters {
    state.view.read().await.filters().clone()
}

pub async fn set_view_filters(state: &AppState, filters: DisplayFilters) -> DisplayFilters {
    let mut view = state.view.write().await;
    view.set_filters(filters);
    view.filters().clone()
}

pub async fn reset_view(state: &AppState) -> DisplayFilters {
    let mut view = state.view.write().await;
    view.reset();
    view.filters().clone()
}

pub async fn reset_notifications(state: &AppState) {
    state.dedup.lock().await.clear();
}

pub async fn set_symbol_hidden(state: &AppState, symbol: &str, hidden: bool) -> DisplayFilters {
    let mut view = state.view.write().await;
    if hidden {
        view.hide(symbol);
    } else {
        view.show(symbol);
    }
    view.filters().clone()
}
