use serde::{Deserialize, Serialize};

use super::RightType;

/// Global switches for the baseline-relative alert types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub above_prev_day: bool,
    pub above_weekly_avg: bool,
    pub above_monthly_avg: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            above_prev_day: true,
            above_weekly_avg: true,
            above_monthly_avg: true,
        }
    }
}

impl AlertSettings {
    /// FIXED rules are never gated.
    pub fn allows(&self, right_type: RightType) -> bool {
        match right_type {
            RightType::Fixed => true,
            RightType::PrevDay => self.above_prev_day,
            RightType::WeeklyAvg | RightType::MultiplierWeekly => self.above_weekly_avg,
            RightType::MonthlyAvg => self.above_monthly_avg,
        }
    }

    pub fn apply(&mut self, patch: AlertSettingsPatch) {
        if let Some(v) = patch.above_prev_day {
            self.above_prev_day = v;
        }
        if let Some(v) = patch.above_weekly_avg {
            self.above_weekly_avg = v;
        }
        if let Some(v) = patch.above_monthly_avg {
            self.above_monthly_avg = v;
        }
    }
}

/// Partial update; missing fields keep their current value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AlertSettingsPatch {
    pub above_prev_day: Option<bool>,
    pub above_weekly_avg: Option<bool>,
    pub above_monthly_avg: Option<bool>,
}
