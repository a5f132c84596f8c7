//! Library entrypoint for volalert.
//!
//! The classification / rule / ranking / dedup core lives in `services` and is
//! usable on its own; `controllers` and `routes` wrap it in a small axum app.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, broadcast};

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub mod controllers;
pub mod routes;

use models::AlertSettings;
use services::{
    classifier,
    event_log::EventLog,
    feed::SnapshotFeed,
    market_board::MarketBoard,
    notifier::Deduplicator,
    rule_store::RuleStore,
    view_state::ViewState,
};

/// Fan-out message for SSE subscribers.
#[derive(Debug, Clone)]
pub struct ServerEvent {
    pub name: String,
    pub data: String,
}

impl ServerEvent {
    pub fn new(name: &str, data: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            data: data.into(),
        }
    }
}

// Lock order when holding several: rules -> board -> alert_settings -> logs.
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub board: Arc<RwLock<MarketBoard>>,
    pub rules: Arc<RwLock<RuleStore>>,
    pub alert_settings: Arc<RwLock<AlertSettings>>,
    pub logs: Arc<RwLock<EventLog>>,
    pub view: Arc<RwLock<ViewState>>,
    pub dedup: Arc<Mutex<Deduplicator>>,
    pub feed: Option<SnapshotFeed>,
    pub events_tx: broadcast::Sender<ServerEvent>,
}

impl AppState {
    pub fn new(settings: config::Settings) -> Self {
        let strategy = classifier::strategy_from_name(&settings.classifier, settings.window);
        let board = MarketBoard::new(strategy, settings.window);
        let seen_capacity = settings.seen_capacity.max(settings.log_capacity);
        let dedup = Deduplicator::new(&settings.notify_categories, seen_capacity);
        let feed = settings.feed_url.clone().map(SnapshotFeed::new);
        let (events_tx, _) = broadcast::channel::<ServerEvent>(64);

        Self {
            board: Arc::new(RwLock::new(board)),
            rules: Arc::new(RwLock::new(RuleStore::new())),
            alert_settings: Arc::new(RwLock::new(AlertSettings::default())),
            logs: Arc::new(RwLock::new(EventLog::with_capacity(settings.log_capacity))),
            view: Arc::new(RwLock::new(ViewState::new())),
            dedup: Arc::new(Mutex::new(dedup)),
            feed,
            events_tx,
            settings,
        }
    }
}
