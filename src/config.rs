use std::env;

use crate::{
    models::TradingWindow,
    services::{
        event_log::DEFAULT_LOG_CAPACITY,
        notifier::{DEFAULT_SEEN_CAPACITY, NotificationCategory},
    },
};

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    // upstream snapshot source; None => batches are pushed to POST /snapshots
    pub feed_url: Option<String>,

    pub snapshot_poll_ms: u64,
    pub rule_tick_ms: u64,
    pub log_tick_ms: u64,

    pub classifier: String,
    pub window: TradingWindow,

    pub log_capacity: usize,
    pub seen_capacity: usize,
    pub notify_categories: Vec<NotificationCategory>,

    pub static_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7000,
            feed_url: None,
            snapshot_poll_ms: 1000,
            rule_tick_ms: 2000,
            log_tick_ms: 1500,
            classifier: "ratio".to_string(),
            window: TradingWindow::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            seen_capacity: DEFAULT_SEEN_CAPACITY,
            notify_categories: NotificationCategory::ALL.to_vec(),
            static_dir: "static".to_string(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let defaults = Settings::default();

    let host = env::var("HOST").unwrap_or(defaults.host);
    let port = env_parse("PORT", defaults.port);

    let feed_url = env::var("FEED_URL")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let snapshot_poll_ms = env_parse("SNAPSHOT_POLL_MS", defaults.snapshot_poll_ms).max(100);
    let rule_tick_ms = env_parse("RULE_TICK_MS", defaults.rule_tick_ms).max(100);
    let log_tick_ms = env_parse("LOG_TICK_MS", defaults.log_tick_ms).max(100);

    let classifier = env::var("CLASSIFIER").unwrap_or(defaults.classifier);

    let window = match (env::var("WINDOW_START"), env::var("WINDOW_END")) {
        (Ok(start), Ok(end)) => TradingWindow::parse(&start, &end).unwrap_or_else(|e| {
            tracing::warn!("ignoring WINDOW_START/WINDOW_END: {e}");
            defaults.window
        }),
        _ => defaults.window,
    };

    let log_capacity = env_parse("LOG_CAPACITY", defaults.log_capacity).max(1);
    // a re-delivered history must never outlive its seen identities
    let seen_capacity = env_parse("SEEN_CAPACITY", defaults.seen_capacity).max(log_capacity);

    let notify_categories = match env::var("NOTIFY_CATEGORIES") {
        Ok(raw) => raw
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| {
                let parsed = NotificationCategory::parse(s);
                if parsed.is_none() {
                    tracing::warn!("unknown notification category '{}'", s.trim());
                }
                parsed
            })
            .collect(),
        Err(_) => defaults.notify_categories,
    };

    let static_dir = env::var("STATIC_DIR").unwrap_or(defaults.static_dir);

    Settings {
        host,
        port,
        feed_url,
        snapshot_poll_ms,
        rule_tick_ms,
        log_tick_ms,
        classifier,
        window,
        log_capacity,
        seen_capacity,
        notify_categories,
        static_dir,
    }
}
