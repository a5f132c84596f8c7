use std::fmt;

use serde::{Deserialize, Serialize};

/// Current volume vs. the weekly baseline. Variant order is the intensity rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intensity {
    Waiting,
    Normal,
    High,
    VeryHigh,
}

impl Intensity {
    pub const ALL: [Intensity; 4] = [
        Intensity::Waiting,
        Intensity::Normal,
        Intensity::High,
        Intensity::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Waiting => "WAITING",
            Intensity::Normal => "NORMAL",
            Intensity::High => "HIGH",
            Intensity::VeryHigh => "VERY_HIGH",
        }
    }

    /// Accepts `VERY_HIGH`, `VERY HIGH` and any casing.
    pub fn parse(s: &str) -> Option<Self> {
        let norm = s.trim().to_uppercase().replace(' ', "_");
        Self::ALL.into_iter().find(|i| i.as_str() == norm)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Baseline {
    PrevDay,
    WeeklyAvg,
    MonthlyAvg,
}

impl Baseline {
    pub fn label(&self) -> &'static str {
        match self {
            Baseline::PrevDay => "ABOVE PREV DAY",
            Baseline::WeeklyAvg => "ABOVE WEEKLY AVG",
            Baseline::MonthlyAvg => "ABOVE MONTHLY AVG",
        }
    }
}

/// Per-symbol status for one tick. A triggered rule outranks any baseline breach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLabel {
    Alert,
    Above(Vec<Baseline>),
    Normal,
}

impl StatusLabel {
    pub fn is_alert(&self) -> bool {
        matches!(self, StatusLabel::Alert)
    }

    pub fn is_above(&self) -> bool {
        matches!(self, StatusLabel::Above(_))
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLabel::Alert => f.write_str("ALERT"),
            StatusLabel::Normal => f.write_str("NORMAL"),
            StatusLabel::Above(parts) => {
                let labels: Vec<&str> = parts.iter().map(|b| b.label()).collect();
                f.write_str(&labels.join(" | "))
            }
        }
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
