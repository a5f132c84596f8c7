//! Volume intensity classification.
//!
//! Two strategies share the [`ClassificationStrategy`] seam: the plain ratio
//! against the weekly average, and a z-score over the user's trading window.
//! Both are recomputed on every tick; nothing here is cached.

use chrono::NaiveTime;

use crate::models::{AlertRule, Baseline, Intensity, MetricSnapshot, StatusLabel, TradingWindow};

pub const VERY_HIGH_RATIO: f64 = 1.5;

// window z-score bands
const Z_HIGH: f64 = 0.5;
const Z_VERY_HIGH: f64 = 1.5;
pub const Z_SPIKE: f64 = 2.0;

pub trait ClassificationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, snapshot: &MetricSnapshot, now: NaiveTime) -> Intensity;

    /// Score of an unusual-volume spike, `None` unless the strategy detects one.
    fn spike_score(&self, _snapshot: &MetricSnapshot, _now: NaiveTime) -> Option<f64> {
        None
    }

    /// Called when the user moves the trading window.
    fn set_window(&mut self, _window: TradingWindow) {}
}

/// `live > 1.5 x weekly` => VERY_HIGH, `live > weekly` => HIGH.
pub fn classify(snapshot: &MetricSnapshot) -> Intensity {
    let (Some(live), Some(weekly)) = (snapshot.live(), snapshot.weekly_avg_volume) else {
        return Intensity::Waiting;
    };

    if live > VERY_HIGH_RATIO * weekly {
        Intensity::VeryHigh
    } else if live > weekly {
        Intensity::High
    } else {
        Intensity::Normal
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RatioThreshold;

impl ClassificationStrategy for RatioThreshold {
    fn name(&self) -> &'static str {
        "ratio"
    }

    fn classify(&self, snapshot: &MetricSnapshot, _now: NaiveTime) -> Intensity {
        classify(snapshot)
    }
}

/// Compares volume traded inside the window against the share of the daily
/// mean expected by now, in units of the daily standard deviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowStatistical {
    pub window: TradingWindow,
}

impl WindowStatistical {
    pub fn new(window: TradingWindow) -> Self {
        Self { window }
    }

    pub fn zscore(&self, snapshot: &MetricSnapshot, now: NaiveTime) -> Option<f64> {
        snapshot.live()?;
        if now < self.window.start() {
            return None;
        }

        let mean = snapshot.window_mean.filter(|m| *m > 0.0)?;
        let std = snapshot.window_std.filter(|s| *s > 0.0)?;
        let vol = snapshot.window_volume?;

        let total = self.window.minutes();
        if total == 0 {
            return None;
        }

        let elapsed = self.window.elapsed_minutes(now) as f64;
        let expected = mean * (elapsed / total as f64);

        Some((vol - expected) / std)
    }
}

impl ClassificationStrategy for WindowStatistical {
    fn name(&self) -> &'static str {
        "window"
    }

    fn classify(&self, snapshot: &MetricSnapshot, now: NaiveTime) -> Intensity {
        match self.zscore(snapshot, now) {
            None => Intensity::Waiting,
            Some(z) if z < Z_HIGH => Intensity::Normal,
            Some(z) if z < Z_VERY_HIGH => Intensity::High,
            Some(_) => Intensity::VeryHigh,
        }
    }

    fn spike_score(&self, snapshot: &MetricSnapshot, now: NaiveTime) -> Option<f64> {
        self.zscore(snapshot, now).filter(|z| *z >= Z_SPIKE)
    }

    fn set_window(&mut self, window: TradingWindow) {
        self.window = window;
    }
}

/// Builds the configured strategy, falling back to the ratio rule for unknown names.
pub fn strategy_from_name(name: &str, window: TradingWindow) -> Box<dyn ClassificationStrategy> {
    match name.trim().to_lowercase().as_str() {
        "window" | "window_statistical" | "zscore" => Box::new(WindowStatistical::new(window)),
        "ratio" | "ratio_threshold" | "" => Box::new(RatioThreshold),
        other => {
            tracing::warn!("unknown classifier '{other}', using ratio");
            Box::new(RatioThreshold)
        }
    }
}

/// Baselines the live volume has reached. Zero or absent baselines never count.
pub fn breached_baselines(snapshot: &MetricSnapshot) -> Vec<Baseline> {
    let Some(live) = snapshot.live() else {
        return Vec::new();
    };

    [
        (Baseline::PrevDay, snapshot.prev_day_volume),
        (Baseline::WeeklyAvg, snapshot.weekly_avg_volume),
        (Baseline::MonthlyAvg, snapshot.monthly_avg_volume),
    ]
    .into_iter()
    .filter_map(|(b, v)| v.filter(|base| *base > 0.0 && live >= *base).map(|_| b))
    .collect()
}

/// ALERT if an active rule on this symbol is triggered, then baseline breaches, then NORMAL.
pub fn status(snapshot: &MetricSnapshot, rules: &[AlertRule]) -> StatusLabel {
    let alerted = rules
        .iter()
        .any(|r| r.is_active && r.triggered && r.symbol == snapshot.symbol);
    if alerted {
        return StatusLabel::Alert;
    }

    let breaches = breached_baselines(snapshot);
    if breaches.is_empty() {
        StatusLabel::Normal
    } else {
        StatusLabel::Above(breaches)
    }
}
