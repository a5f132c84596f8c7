pub mod snapshot;
pub mod intensity;
pub mod alert;
pub mod alert_settings;
pub mod log_event;
pub mod window;
pub mod row;

pub use snapshot::MetricSnapshot;
pub use intensity::{Baseline, Intensity, StatusLabel};
pub use alert::{AlertRule, NewAlertRule, Operator, RightType};
pub use alert_settings::{AlertSettings, AlertSettingsPatch};
pub use log_event::LogEvent;
pub use window::TradingWindow;
pub use row::{ClassifiedRow, DisplayFilters, RankedRow};
