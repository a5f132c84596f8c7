use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::error::ValidationError;

/// User-selected intraday range the window-statistical classifier measures against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TradingWindow {
    #[serde(serialize_with = "hhmm")]
    start: NaiveTime,
    #[serde(serialize_with = "hhmm")]
    end: NaiveTime,
}

impl Default for TradingWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 15, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl TradingWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::EmptyWindow {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses `HH:MM` pairs.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_hhmm(start)?, parse_hhmm(end)?)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn minutes(&self) -> u32 {
        minute_of_day(self.end).saturating_sub(minute_of_day(self.start))
    }

    pub fn contains(&self, now: NaiveTime) -> bool {
        self.start <= now && now <= self.end
    }

    /// Minutes elapsed since the start, clamped to the end and never below one.
    pub fn elapsed_minutes(&self, now: NaiveTime) -> u32 {
        let clamped = now.min(self.end);
        minute_of_day(clamped)
            .saturating_sub(minute_of_day(self.start))
            .max(1)
    }

    pub fn label(&self) -> String {
        format!("{} → {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

pub fn parse_hhmm(s: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| ValidationError::BadTime(s.to_string()))
}

fn hhmm<S: serde::Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&t.format("%H:%M"))
}
