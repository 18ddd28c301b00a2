use crate::models::{institute::Institute, subject::Subject};
use crate::schema::attendance_records;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

/// One "present" mark. Immutable once created; at most one per
/// (user, institute, subject, day), enforced by a unique index.
#[derive(Queryable, Debug, Serialize, Deserialize, Clone, Identifiable, Associations)]
#[belongs_to(Institute)]
#[belongs_to(Subject)]
#[table_name = "attendance_records"]
pub struct AttendanceRecord {
    pub id: i32,
    pub user_id: i32,
    pub institute_id: i32,
    pub subject_id: i32,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub selfie_image_path: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl AttendanceRecord {
    pub fn find(rid: i32, conn: &PgConnection) -> QueryResult<Option<Self>> {
        attendance_records::table.find(rid).first(conn).optional()
    }

    pub fn count_present_between(
        uid: i32,
        iid: i32,
        sid: i32,
        start: NaiveDate,
        end: NaiveDate,
        conn: &PgConnection,
    ) -> QueryResult<i64> {
        attendance_records::table
            .filter(attendance_records::user_id.eq(uid))
            .filter(attendance_records::institute_id.eq(iid))
            .filter(attendance_records::subject_id.eq(sid))
            .filter(attendance_records::attendance_date.between(start, end))
            .filter(attendance_records::status.eq("present"))
            .select(count_star())
            .first(conn)
    }

    /// Newest-first history for a student's own dashboard.
    pub fn history_for_user(uid: i32, limit: i64, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        attendance_records::table
            .filter(attendance_records::user_id.eq(uid))
            .order(attendance_records::attendance_date.desc())
            .limit(limit)
            .load(conn)
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[table_name = "attendance_records"]
pub struct NewAttendanceRecord {
    pub user_id: i32,
    pub institute_id: i32,
    pub subject_id: i32,
    pub attendance_date: NaiveDate,
    pub status: String,
    pub selfie_image_path: Option<String>,
    pub notes: Option<String>,
}

impl NewAttendanceRecord {
    /// Conditional insert backed by the per-day unique index; `Ok(None)`
    /// means attendance was already marked for that tuple and day.
    pub fn create(&self, conn: &PgConnection) -> QueryResult<Option<AttendanceRecord>> {
        diesel::insert_into(attendance_records::table)
            .values(self)
            .on_conflict_do_nothing()
            .get_result(conn)
            .optional()
    }
}
