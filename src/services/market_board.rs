use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    models::{AlertRule, ClassifiedRow, MetricSnapshot, TradingWindow},
    services::{
        classifier::{self, ClassificationStrategy},
        event_log::EventLog,
    },
};

/// Latest snapshot batch plus the per-symbol state carried between ticks.
pub struct MarketBoard {
    batch: Vec<MetricSnapshot>,
    last_status: HashMap<String, String>,
    spiked: HashSet<String>,
    window: TradingWindow,
    strategy: Box<dyn ClassificationStrategy>,
    day: Option<NaiveDate>,
}

impl MarketBoard {
    pub fn new(mut strategy: Box<dyn ClassificationStrategy>, window: TradingWindow) -> Self {
        strategy.set_window(window);
        Self {
            batch: Vec::new(),
            last_status: HashMap::new(),
            spiked: HashSet::new(),
            window,
            strategy,
            day: None,
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn window(&self) -> TradingWindow {
        self.window
    }

    pub fn snapshots(&self) -> &[MetricSnapshot] {
        &self.batch
    }

    pub fn get(&self, symbol: &str) -> Option<&MetricSnapshot> {
        self.batch.iter().find(|s| s.symbol == symbol)
    }

    /// Replaces the batch and logs status transitions and window spikes.
    /// Returns the number of rows kept.
    pub fn ingest(
        &mut self,
        batch: Vec<MetricSnapshot>,
        rules: &[AlertRule],
        now: NaiveDateTime,
        log: &mut EventLog,
    ) -> usize {
        if self.day != Some(now.date()) {
            if self.day.is_some() {
                tracing::info!("new trading day {}, clearing per-symbol state", now.date());
            }
            self.last_status.clear();
            self.spiked.clear();
            self.day = Some(now.date());
        }

        self.batch = normalize_batch(batch);

        let time = now.time();
        for snap in &self.batch {
            let status = classifier::status(snap, rules).to_string();

            if let Some(prev) = self.last_status.get(&snap.symbol) {
                if *prev != status {
                    log.push_at(time, format!("STATUS CHANGE [{}]: {} → {}", snap.symbol, prev, status));
                }
            }
            self.last_status.insert(snap.symbol.clone(), status);

            if let Some(z) = self.strategy.spike_score(snap, time) {
                if self.window.contains(time) && self.spiked.insert(snap.symbol.clone()) {
                    log.push_at(
                        time,
                        format!(
                            "UNUSUAL VOLUME [{}]: z={:.2} vol={:.0}",
                            snap.symbol,
                            z,
                            snap.window_volume.unwrap_or(0.0)
                        ),
                    );
                }
            }
        }

        self.batch.len()
    }

    pub fn rows(&self, rules: &[AlertRule], now: NaiveTime) -> Vec<ClassifiedRow> {
        self.batch
            .iter()
            .map(|s| ClassifiedRow {
                snapshot: s.clone(),
                intensity: self.strategy.classify(s, now),
                status: classifier::status(s, rules),
            })
            .collect()
    }

    pub fn set_window(&mut self, window: TradingWindow, log: &mut EventLog) {
        self.window = window;
        self.strategy.set_window(window);
        self.spiked.clear();
        log.push(format!("TIME WINDOW SET: {}", window.label()));
    }

    pub fn reset(&mut self) {
        self.batch.clear();
        self.last_status.clear();
        self.spiked.clear();
        self.day = None;
    }
}

/// One snapshot per symbol (last occurrence wins), sanitised numbers, no blank symbols.
pub fn normalize_batch(batch: Vec<MetricSnapshot>) -> Vec<MetricSnapshot> {
    let mut out: Vec<MetricSnapshot> = Vec::with_capacity(batch.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for mut snap in batch {
        let dropped = snap.sanitize();
        if snap.symbol.is_empty() {
            tracing::warn!("snapshot without symbol dropped");
            continue;
        }
        if !dropped.is_empty() {
            tracing::debug!(symbol = %snap.symbol, ?dropped, "invalid snapshot fields treated as absent");
        }

        match index.get(&snap.symbol) {
            Some(&i) => {
                tracing::warn!(symbol = %snap.symbol, "duplicate symbol in batch, keeping last");
                out[i] = snap;
            }
            None => {
                index.insert(snap.symbol.clone(), out.len());
                out.push(snap);
            }
        }
    }

    out
}
