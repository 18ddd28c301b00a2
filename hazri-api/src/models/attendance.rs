use async_graphql::*;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};

use hazri_core::types::{
    AttendanceFigures, ComputeStatus, DateWindow, Goal, Severity, Warning, WarningReport,
};
use hazri_db::models::attendance::AttendanceRecord as AttendanceRecordData;

#[derive(Copy, Clone, Eq, PartialEq, Enum)]
pub(crate) enum ComputeState {
    Calculated,
    NoClasses,
    Error,
}

impl From<ComputeStatus> for ComputeState {
    fn from(status: ComputeStatus) -> Self {
        match status {
            ComputeStatus::Calculated => ComputeState::Calculated,
            ComputeStatus::NoClasses => ComputeState::NoClasses,
            ComputeStatus::Error => ComputeState::Error,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Enum)]
pub(crate) enum AlertSeverity {
    Warning,
    Critical,
}

impl From<Severity> for AlertSeverity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => AlertSeverity::Warning,
            Severity::Critical => AlertSeverity::Critical,
        }
    }
}

/// attended/total/percentage figures. For institute-level results `total`
/// counts subject-days, not calendar days.
#[derive(SimpleObject)]
pub(crate) struct AttendanceStats {
    pub(crate) attended: i64,
    pub(crate) total: i64,
    pub(crate) percentage: f64,
    pub(crate) status: ComputeState,
}

impl From<AttendanceFigures> for AttendanceStats {
    fn from(figures: AttendanceFigures) -> Self {
        AttendanceStats {
            attended: figures.attended,
            total: figures.total,
            percentage: figures.percentage,
            status: figures.status.into(),
        }
    }
}

#[derive(SimpleObject)]
pub(crate) struct GoalSettings {
    pub(crate) target_percentage: f64,
    pub(crate) warning_threshold: f64,
}

impl From<Goal> for GoalSettings {
    fn from(goal: Goal) -> Self {
        GoalSettings {
            target_percentage: goal.target_percentage,
            warning_threshold: goal.warning_threshold,
        }
    }
}

#[derive(SimpleObject)]
pub(crate) struct AttendanceAlert {
    pub(crate) severity: AlertSeverity,
    pub(crate) message: String,
    pub(crate) percentage: f64,
    pub(crate) threshold: f64,
}

impl From<&Warning> for AttendanceAlert {
    fn from(warning: &Warning) -> Self {
        AttendanceAlert {
            severity: warning.severity.into(),
            message: warning.message.clone(),
            percentage: warning.percentage,
            threshold: warning.threshold,
        }
    }
}

/// Evaluator output: figures, the goal they were judged against, and zero
/// or one alerts.
#[derive(SimpleObject)]
pub(crate) struct AttendanceReport {
    pub(crate) attendance: AttendanceStats,
    pub(crate) goal: GoalSettings,
    pub(crate) alerts: Vec<AttendanceAlert>,
    pub(crate) has_warnings: bool,
}

impl From<WarningReport> for AttendanceReport {
    fn from(report: WarningReport) -> Self {
        AttendanceReport {
            attendance: report.attendance.into(),
            goal: report.goal.into(),
            alerts: report.warnings.iter().map(|w| w.into()).collect(),
            has_warnings: report.has_warnings,
        }
    }
}

#[derive(SimpleObject)]
pub(crate) struct AttendanceEntry {
    pub(crate) id: i32,
    pub(crate) institute_id: i32,
    pub(crate) subject_id: i32,
    pub(crate) attendance_date: NaiveDate,
    pub(crate) status: String,
    pub(crate) notes: Option<String>,
    pub(crate) created_at: NaiveDateTime,
}

impl From<&AttendanceRecordData> for AttendanceEntry {
    fn from(record: &AttendanceRecordData) -> Self {
        AttendanceEntry {
            id: record.id,
            institute_id: record.institute_id,
            subject_id: record.subject_id,
            attendance_date: record.attendance_date,
            status: record.status.clone(),
            notes: record.notes.clone(),
            created_at: record.created_at,
        }
    }
}

#[derive(InputObject)]
pub(crate) struct MarkAttendanceInput {
    pub(crate) institute_id: i32,
    pub(crate) subject_id: i32,
    /// Path of the already-uploaded selfie; file handling lives elsewhere.
    pub(crate) selfie_path: Option<String>,
    pub(crate) notes: Option<String>,
}

#[derive(InputObject)]
pub(crate) struct GoalInput {
    pub(crate) institute_id: i32,
    pub(crate) target_percentage: f64,
    pub(crate) warning_threshold: f64,
}

/// Explicit range arguments become a window; both absent means the engine's
/// default trailing-30-day window.
pub(crate) fn window_from(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<DateWindow> {
    if start.is_none() && end.is_none() {
        return None;
    }
    let today = Utc::today().naive_utc();
    Some(DateWindow::new(
        start.unwrap_or_else(|| today - Duration::days(30)),
        end.unwrap_or(today),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_dates_means_default_window() {
        assert!(window_from(None, None).is_none());
    }

    #[test]
    fn partial_dates_are_filled_in() {
        let start = NaiveDate::from_ymd(2024, 1, 1);
        let w = window_from(Some(start), None).unwrap();
        assert_eq!(w.start, start);
        assert_eq!(w.end, Utc::today().naive_utc());
    }
}
