use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
}

impl Operator {
    pub fn compare(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::Gt => lhs > rhs,
            Operator::Gte => lhs >= rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Gt => f.write_str(">"),
            Operator::Gte => f.write_str(">="),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RightType {
    Fixed,
    PrevDay,
    WeeklyAvg,
    MonthlyAvg,
    MultiplierWeekly,
}

impl RightType {
    pub fn needs_value(&self) -> bool {
        matches!(self, RightType::Fixed | RightType::MultiplierWeekly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RightType::Fixed => "FIXED",
            RightType::PrevDay => "PREV_DAY",
            RightType::WeeklyAvg => "WEEKLY_AVG",
            RightType::MonthlyAvg => "MONTHLY_AVG",
            RightType::MultiplierWeekly => "MULTIPLIER_WEEKLY",
        }
    }
}

impl fmt::Display for RightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-defined threshold on a symbol's live volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: Uuid,
    pub symbol: String,
    pub operator: Operator,
    pub right_type: RightType,

    // only kept for FIXED / MULTIPLIER_WEEKLY
    pub right_value: Option<f64>,

    // last tick's result, display only
    pub triggered: bool,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub triggered_at: Option<DateTime<Utc>>,
}

impl AlertRule {
    /// `WEEKLY_AVG`, `> 2 x WEEKLY_AVG`, `>= 150000` etc.
    pub fn describe(&self) -> String {
        match (self.right_type, self.right_value) {
            (RightType::Fixed, Some(v)) => format!("{} {} {}", self.symbol, self.operator, v),
            (RightType::MultiplierWeekly, Some(v)) => {
                format!("{} {} {} x WEEKLY_AVG", self.symbol, self.operator, v)
            }
            (rt, _) => format!("{} {} {}", self.symbol, self.operator, rt),
        }
    }
}

/// Create payload, as sent by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlertRule {
    pub symbol: String,
    #[serde(default = "default_operator")]
    pub operator: Operator,
    #[serde(default = "default_right_type")]
    pub right_type: RightType,
    #[serde(default)]
    pub right_value: Option<f64>,
}

fn default_operator() -> Operator {
    Operator::Gt
}

fn default_right_type() -> RightType {
    RightType::Fixed
}

impl NewAlertRule {
    pub fn new(symbol: &str, operator: Operator, right_type: RightType, right_value: Option<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            operator,
            right_type,
            right_value,
        }
    }
}
