use serde::{Deserialize, Serialize};

/// One polling tick's volume metrics for a single symbol.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub symbol: String,

    // 0 or None => market closed / no live data yet
    #[serde(default)]
    pub live_volume: Option<f64>,

    // baselines, None while the symbol is still backfilling
    #[serde(default)]
    pub prev_day_volume: Option<f64>,
    #[serde(default)]
    pub weekly_avg_volume: Option<f64>,
    #[serde(default)]
    pub monthly_avg_volume: Option<f64>,

    // window-statistical inputs
    #[serde(default)]
    pub window_volume: Option<f64>,
    #[serde(default)]
    pub window_mean: Option<f64>,
    #[serde(default)]
    pub window_std: Option<f64>,
}

impl MetricSnapshot {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    pub fn with_live(mut self, v: f64) -> Self {
        self.live_volume = Some(v);
        self
    }

    pub fn with_prev_day(mut self, v: f64) -> Self {
        self.prev_day_volume = Some(v);
        self
    }

    pub fn with_weekly(mut self, v: f64) -> Self {
        self.weekly_avg_volume = Some(v);
        self
    }

    pub fn with_monthly(mut self, v: f64) -> Self {
        self.monthly_avg_volume = Some(v);
        self
    }

    pub fn with_window(mut self, volume: f64, mean: f64, std: f64) -> Self {
        self.window_volume = Some(volume);
        self.window_mean = Some(mean);
        self.window_std = Some(std);
        self
    }

    /// Live volume when there is actual trading data, `None` for absent or zero.
    pub fn live(&self) -> Option<f64> {
        self.live_volume.filter(|v| *v > 0.0)
    }

    /// Trims/upper-cases the symbol and drops negative or non-finite numbers.
    /// Returns the names of the fields that were dropped.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        self.symbol = self.symbol.trim().to_uppercase();

        let mut dropped = Vec::new();
        let fields: [(&'static str, &mut Option<f64>); 7] = [
            ("live_volume", &mut self.live_volume),
            ("prev_day_volume", &mut self.prev_day_volume),
            ("weekly_avg_volume", &mut self.weekly_avg_volume),
            ("monthly_avg_volume", &mut self.monthly_avg_volume),
            ("window_volume", &mut self.window_volume),
            ("window_mean", &mut self.window_mean),
            ("window_std", &mut self.window_std),
        ];

        for (name, slot) in fields {
            if let Some(v) = *slot {
                if !v.is_finite() || v < 0.0 {
                    *slot = None;
                    dropped.push(name);
                }
            }
        }

        dropped
    }
}
