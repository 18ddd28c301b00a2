use crate::schema::attendance_warnings;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

/// Durable store of emitted warnings. Rows are appended by the automatic
/// trigger, flipped to read by `mark_read`, and never deleted.
#[derive(Queryable, Debug, Serialize, Deserialize, Clone, Identifiable)]
#[table_name = "attendance_warnings"]
pub struct AttendanceWarning {
    pub id: i32,
    pub user_id: i32,
    pub institute_id: i32,
    pub subject_id: Option<i32>,
    pub warning_type: String,
    pub message: String,
    pub attendance_percentage: f64,
    pub threshold_percentage: f64,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

impl AttendanceWarning {
    pub fn list_for_user(
        uid: i32,
        unread_only: bool,
        conn: &PgConnection,
    ) -> QueryResult<Vec<Self>> {
        let mut query = attendance_warnings::table
            .filter(attendance_warnings::user_id.eq(uid))
            .into_boxed();
        if unread_only {
            query = query.filter(attendance_warnings::is_read.eq(false));
        }
        query
            .order(attendance_warnings::created_at.desc())
            .load(conn)
    }

    pub fn mark_read(wid: i32, now: NaiveDateTime, conn: &PgConnection) -> QueryResult<usize> {
        diesel::update(attendance_warnings::table.find(wid))
            .set((
                attendance_warnings::is_read.eq(true),
                attendance_warnings::read_at.eq(now),
            ))
            .execute(conn)
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[table_name = "attendance_warnings"]
pub struct NewAttendanceWarning {
    pub user_id: i32,
    pub institute_id: i32,
    pub subject_id: Option<i32>,
    pub warning_type: String,
    pub message: String,
    pub attendance_percentage: f64,
    pub threshold_percentage: f64,
}

impl NewAttendanceWarning {
    pub fn create(&self, conn: &PgConnection) -> QueryResult<AttendanceWarning> {
        diesel::insert_into(attendance_warnings::table)
            .values(self)
            .get_result(conn)
    }
}
