use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Intensity, MetricSnapshot, StatusLabel};

/// A snapshot annotated for the current tick.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRow {
    #[serde(flatten)]
    pub snapshot: MetricSnapshot,
    pub intensity: Intensity,
    pub status: StatusLabel,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedRow {
    #[serde(flatten)]
    pub row: ClassifiedRow,
    pub display_intensity: Intensity,
    pub priority: u8,
    pub is_demoted: bool,
}

/// Dashboard filters: intensities shown at full rank, plus symbols hidden entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFilters {
    pub intensities: BTreeSet<Intensity>,
    #[serde(default)]
    pub hidden_symbols: BTreeSet<String>,
}

impl Default for DisplayFilters {
    fn default() -> Self {
        Self {
            intensities: Intensity::ALL.into_iter().collect(),
            hidden_symbols: BTreeSet::new(),
        }
    }
}

impl DisplayFilters {
    pub fn only(intensities: &[Intensity]) -> Self {
        Self {
            intensities: intensities.iter().copied().collect(),
            hidden_symbols: BTreeSet::new(),
        }
    }

    pub fn shows(&self, intensity: Intensity) -> bool {
        self.intensities.contains(&intensity)
    }

    pub fn is_hidden(&self, symbol: &str) -> bool {
        self.hidden_symbols.contains(symbol)
    }
}
