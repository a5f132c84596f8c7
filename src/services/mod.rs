pub mod classifier;
pub mod rule_store;
pub mod rule_evaluator;
pub mod ranker;
pub mod notifier;
pub mod event_log;
pub mod market_board;
pub mod view_state;

pub mod feed;
pub mod alerts_service;
pub mod market_service;
pub mod alert_monitor;
