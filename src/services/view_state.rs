use std::collections::BTreeSet;

use crate::{
    error::ValidationError,
    models::{DisplayFilters, Intensity},
};

/// Dashboard display state.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    filters: DisplayFilters,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(&self) -> &DisplayFilters {
        &self.filters
    }

    /// Hidden symbols are stored in the same trimmed upper-case form as snapshot symbols.
    pub fn set_filters(&mut self, mut filters: DisplayFilters) {
        filters.hidden_symbols = filters
            .hidden_symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        self.filters = filters;
    }

    pub fn set_intensities(&mut self, intensities: BTreeSet<Intensity>) {
        self.filters.intensities = intensities;
    }

    pub fn hide(&mut self, symbol: &str) {
        self.filters.hidden_symbols.insert(symbol.trim().to_uppercase());
    }

    pub fn show(&mut self, symbol: &str) {
        self.filters.hidden_symbols.remove(&symbol.trim().to_uppercase());
    }

    pub fn reset(&mut self) {
        self.filters = DisplayFilters::default();
    }
}

/// `HIGH,VERY_HIGH` -> set. Blank entries are skipped.
pub fn parse_intensities(raw: &str) -> Result<BTreeSet<Intensity>, ValidationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Intensity::parse(s).ok_or_else(|| ValidationError::UnknownIntensity(s.to_string())))
        .collect()
}
