use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{DateWindow, Goal, Severity};

/// Any data-access failure, flattened to its backend message. This is the
/// only error kind the engine recognizes; public entry points swallow it
/// into sentinel results rather than propagating.
#[derive(Debug, Clone, Error)]
#[error("storage failure: {0}")]
pub struct StorageFailure(String);

impl StorageFailure {
    pub fn new(message: impl Into<String>) -> Self {
        StorageFailure(message.into())
    }
}

/// The identifying fields of a persisted attendance record, as needed to
/// re-evaluate warnings after it is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef {
    pub user_id: i32,
    pub institute_id: i32,
    pub subject_id: i32,
    pub attendance_date: NaiveDate,
}

/// A warning row to be appended. `subject_id = None` marks an
/// institute-level warning.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWarning {
    pub user_id: i32,
    pub institute_id: i32,
    pub subject_id: Option<i32>,
    pub severity: Severity,
    pub message: String,
    pub percentage: f64,
    pub threshold: f64,
}

/// Read surface over persisted attendance data, plus the single write the
/// engine performs (appending warnings). Implemented by the database layer
/// and by in-memory doubles in tests.
pub trait AttendanceStore {
    /// Count of `present` records for the exact (user, institute, subject)
    /// tuple with `attendance_date` inside the inclusive window.
    fn count_present(
        &self,
        user_id: i32,
        institute_id: i32,
        subject_id: i32,
        window: DateWindow,
    ) -> Result<i64, StorageFailure>;

    /// Ids of the institute's active subjects.
    fn active_subjects(&self, institute_id: i32) -> Result<Vec<i32>, StorageFailure>;

    /// The single active goal row for (user, institute), if any.
    fn active_goal(&self, user_id: i32, institute_id: i32)
        -> Result<Option<Goal>, StorageFailure>;

    fn attendance_record(&self, record_id: i32) -> Result<Option<RecordRef>, StorageFailure>;

    fn insert_warning(&self, warning: NewWarning) -> Result<(), StorageFailure>;
}
