//! [`AttendanceStore`] backed by diesel. The engine sees storage only
//! through this seam; diesel errors are flattened into `StorageFailure`
//! here.

use diesel::PgConnection;

use hazri_core::store::{AttendanceStore, NewWarning, RecordRef, StorageFailure};
use hazri_core::types::{DateWindow, Goal};

use crate::models::attendance::AttendanceRecord;
use crate::models::goal::AttendanceGoal;
use crate::models::subject::Subject;
use crate::models::warning::NewAttendanceWarning;

pub struct DbStore<'a> {
    conn: &'a PgConnection,
}

impl<'a> DbStore<'a> {
    pub fn new(conn: &'a PgConnection) -> Self {
        DbStore { conn }
    }
}

fn storage(e: diesel::result::Error) -> StorageFailure {
    StorageFailure::new(e.to_string())
}

impl AttendanceStore for DbStore<'_> {
    fn count_present(
        &self,
        user_id: i32,
        institute_id: i32,
        subject_id: i32,
        window: DateWindow,
    ) -> Result<i64, StorageFailure> {
        AttendanceRecord::count_present_between(
            user_id,
            institute_id,
            subject_id,
            window.start,
            window.end,
            self.conn,
        )
        .map_err(storage)
    }

    fn active_subjects(&self, institute_id: i32) -> Result<Vec<i32>, StorageFailure> {
        Subject::list_active(institute_id, self.conn)
            .map(|subjects| subjects.iter().map(|s| s.id).collect())
            .map_err(storage)
    }

    fn active_goal(
        &self,
        user_id: i32,
        institute_id: i32,
    ) -> Result<Option<Goal>, StorageFailure> {
        AttendanceGoal::active_for(user_id, institute_id, self.conn)
            .map(|row| {
                row.map(|g| Goal {
                    target_percentage: g.target_percentage,
                    warning_threshold: g.warning_threshold,
                })
            })
            .map_err(storage)
    }

    fn attendance_record(&self, record_id: i32) -> Result<Option<RecordRef>, StorageFailure> {
        AttendanceRecord::find(record_id, self.conn)
            .map(|row| {
                row.map(|r| RecordRef {
                    user_id: r.user_id,
                    institute_id: r.institute_id,
                    subject_id: r.subject_id,
                    attendance_date: r.attendance_date,
                })
            })
            .map_err(storage)
    }

    fn insert_warning(&self, warning: NewWarning) -> Result<(), StorageFailure> {
        NewAttendanceWarning {
            user_id: warning.user_id,
            institute_id: warning.institute_id,
            subject_id: warning.subject_id,
            warning_type: warning.severity.to_string(),
            message: warning.message,
            attendance_percentage: warning.percentage,
            threshold_percentage: warning.threshold,
        }
        .create(self.conn)
        .map(|_| ())
        .map_err(storage)
    }
}
