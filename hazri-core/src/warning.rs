//! Threshold evaluation and the post-insert warning trigger.

use log::error;

use crate::goal::resolve_goal;
use crate::percentage::{institute_attendance, subject_attendance};
use crate::store::{AttendanceStore, NewWarning, StorageFailure};
use crate::types::{display_percentage, ComputeStatus, Severity, Warning, WarningReport};

/// Evaluate a student's attendance against their goal, for one subject or
/// (when `subject_id` is `None`) for the whole institute, over the default
/// trailing-30-day window.
///
/// The two threshold branches are mutually exclusive, so `warnings` carries
/// zero or one entry even though it is a list.
pub fn evaluate(
    store: &dyn AttendanceStore,
    user_id: i32,
    institute_id: i32,
    subject_id: Option<i32>,
) -> WarningReport {
    let goal = resolve_goal(store, user_id, institute_id);
    let attendance = match subject_id {
        Some(sid) => subject_attendance(store, user_id, institute_id, sid, None),
        None => institute_attendance(store, user_id, institute_id, None),
    };

    let mut warnings = Vec::new();
    if attendance.status == ComputeStatus::Calculated {
        let percentage = attendance.percentage;
        if percentage < goal.warning_threshold {
            warnings.push(Warning {
                severity: Severity::Critical,
                message: format!(
                    "Attendance is critically low! ({}%)",
                    display_percentage(percentage)
                ),
                percentage,
                threshold: goal.warning_threshold,
            });
        } else if percentage < goal.target_percentage {
            warnings.push(Warning {
                severity: Severity::Warning,
                message: format!(
                    "Attendance is below target ({}%)",
                    display_percentage(percentage)
                ),
                percentage,
                threshold: goal.target_percentage,
            });
        }
    }

    WarningReport {
        has_warnings: !warnings.is_empty(),
        attendance,
        goal,
        warnings,
    }
}

/// Re-evaluate the tuple touched by a freshly inserted attendance record and
/// append any resulting warning rows. Returns true iff at least one row was
/// persisted.
///
/// Runs synchronously in the request that recorded attendance; any failure
/// here is logged and reported as "no warning created" so the committed
/// attendance record is never disturbed.
pub fn on_attendance_recorded(store: &dyn AttendanceStore, record_id: i32) -> bool {
    match try_on_attendance_recorded(store, record_id) {
        Ok(persisted) => persisted,
        Err(e) => {
            error!(
                "automatic warning creation failed for record {}: {}",
                record_id, e
            );
            false
        }
    }
}

fn try_on_attendance_recorded(
    store: &dyn AttendanceStore,
    record_id: i32,
) -> Result<bool, StorageFailure> {
    let record = match store.attendance_record(record_id)? {
        Some(record) => record,
        // Unknown id is a silent no-op, not an error.
        None => return Ok(false),
    };

    let report = evaluate(
        store,
        record.user_id,
        record.institute_id,
        Some(record.subject_id),
    );
    if !report.has_warnings {
        return Ok(false);
    }

    for warning in &report.warnings {
        store.insert_warning(NewWarning {
            user_id: record.user_id,
            institute_id: record.institute_id,
            subject_id: Some(record.subject_id),
            severity: warning.severity,
            message: warning.message.clone(),
            percentage: warning.percentage,
            threshold: warning.threshold,
        })?;
    }
    Ok(true)
}
