//! Attendance percentage computation, per subject and per institute.
//!
//! "Total possible classes" is approximated by elapsed calendar days in the
//! window, not by a class schedule. Institute totals are therefore
//! "subject-days": every active subject contributes the full day count, and
//! the sum deliberately exceeds the calendar span.

use log::error;

use crate::store::{AttendanceStore, StorageFailure};
use crate::types::{AttendanceFigures, ComputeStatus, DateWindow};

/// Attendance figures for one (user, institute, subject) tuple.
///
/// Storage failures never reach the caller: they are logged and collapsed to
/// zeroed figures with `status = error`.
pub fn subject_attendance(
    store: &dyn AttendanceStore,
    user_id: i32,
    institute_id: i32,
    subject_id: i32,
    window: Option<DateWindow>,
) -> AttendanceFigures {
    let window = window.unwrap_or_else(DateWindow::last_month);
    match try_subject_attendance(store, user_id, institute_id, subject_id, window) {
        Ok(figures) => figures,
        Err(e) => {
            error!(
                "attendance calculation failed for user {} subject {}: {}",
                user_id, subject_id, e
            );
            AttendanceFigures::empty(ComputeStatus::Error)
        }
    }
}

pub(crate) fn try_subject_attendance(
    store: &dyn AttendanceStore,
    user_id: i32,
    institute_id: i32,
    subject_id: i32,
    window: DateWindow,
) -> Result<AttendanceFigures, StorageFailure> {
    // At least one day, so the percentage is always divisible.
    let total = window.total_days().max(1);
    let attended = store.count_present(user_id, institute_id, subject_id, window)?;
    Ok(AttendanceFigures::from_counts(attended, total))
}

/// Attendance summed over every active subject of the institute, with the
/// percentage recomputed from the summed counts. Zero active subjects yield
/// `status = no_classes`.
///
/// Each subject goes through the swallowing per-subject calculator: a
/// subject whose lookup fails contributes zeroed figures and the rest still
/// produce a `calculated` result. Only a failure to enumerate the subjects
/// themselves degrades the whole institute to `status = error`.
pub fn institute_attendance(
    store: &dyn AttendanceStore,
    user_id: i32,
    institute_id: i32,
    window: Option<DateWindow>,
) -> AttendanceFigures {
    let window = window.unwrap_or_else(DateWindow::last_month);
    match try_institute_attendance(store, user_id, institute_id, window) {
        Ok(figures) => figures,
        Err(e) => {
            error!(
                "institute attendance calculation failed for user {} institute {}: {}",
                user_id, institute_id, e
            );
            AttendanceFigures::empty(ComputeStatus::Error)
        }
    }
}

pub(crate) fn try_institute_attendance(
    store: &dyn AttendanceStore,
    user_id: i32,
    institute_id: i32,
    window: DateWindow,
) -> Result<AttendanceFigures, StorageFailure> {
    let mut total_attended = 0;
    let mut total_possible = 0;
    for subject_id in store.active_subjects(institute_id)? {
        let figures = subject_attendance(store, user_id, institute_id, subject_id, Some(window));
        total_attended += figures.attended;
        total_possible += figures.total;
    }
    Ok(AttendanceFigures::from_counts(total_attended, total_possible))
}
