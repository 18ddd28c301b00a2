use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Inclusive calendar-date range over which attendance is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateWindow { start, end }
    }

    /// The window ending today and reaching back the given number of days.
    pub fn trailing(days: i64) -> Self {
        let end = Utc::today().naive_utc();
        DateWindow {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Default analytics window: the trailing 30 days.
    pub fn last_month() -> Self {
        Self::trailing(30)
    }

    /// Inclusive day count. Negative when `end < start`; callers floor it.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComputeStatus {
    Calculated,
    NoClasses,
    Error,
}

/// Result of a percentage computation. `status` is the only error channel
/// callers see; numeric fields are zeroed whenever it is not `Calculated`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceFigures {
    pub attended: i64,
    pub total: i64,
    pub percentage: f64,
    pub status: ComputeStatus,
}

impl AttendanceFigures {
    pub fn from_counts(attended: i64, total: i64) -> Self {
        if total > 0 {
            AttendanceFigures {
                attended,
                total,
                percentage: round2(attended as f64 / total as f64 * 100.0),
                status: ComputeStatus::Calculated,
            }
        } else {
            Self::empty(ComputeStatus::NoClasses)
        }
    }

    pub fn empty(status: ComputeStatus) -> Self {
        AttendanceFigures {
            attended: 0,
            total: 0,
            percentage: 0.0,
            status,
        }
    }
}

/// Per-student-per-institute target pair. Absent rows fall back to
/// `Goal::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub target_percentage: f64,
    pub warning_threshold: f64,
}

impl Default for Goal {
    fn default() -> Self {
        Goal {
            target_percentage: 75.00,
            warning_threshold: 70.00,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub severity: Severity,
    pub message: String,
    pub percentage: f64,
    pub threshold: f64,
}

/// Evaluator output. `warnings` is list-shaped for callers that iterate it,
/// but current rules produce at most one entry per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningReport {
    pub attendance: AttendanceFigures,
    pub goal: Goal,
    pub warnings: Vec<Warning>,
    pub has_warnings: bool,
}

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render a percentage the way messages expect: two decimals at most,
/// trailing zeros trimmed (70.00 -> "70", 70.50 -> "70.5").
pub fn display_percentage(value: f64) -> String {
    let rendered = format!("{:.2}", value);
    rendered
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
