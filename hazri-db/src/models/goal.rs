use crate::schema::attendance_goals;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

#[derive(Queryable, Debug, Serialize, Deserialize, AsChangeset, Clone, Identifiable)]
#[table_name = "attendance_goals"]
pub struct AttendanceGoal {
    pub id: i32,
    pub user_id: i32,
    pub institute_id: i32,
    pub target_percentage: f64,
    pub warning_threshold: f64,
    pub is_active: bool,
}

impl AttendanceGoal {
    pub fn active_for(uid: i32, iid: i32, conn: &PgConnection) -> QueryResult<Option<Self>> {
        attendance_goals::table
            .filter(attendance_goals::user_id.eq(uid))
            .filter(attendance_goals::institute_id.eq(iid))
            .filter(attendance_goals::is_active.eq(true))
            .first(conn)
            .optional()
    }

    /// Replace the active goal: prior rows are deactivated and the new pair
    /// inserted in one transaction, keeping at most one active row per
    /// (user, institute).
    pub fn set(
        uid: i32,
        iid: i32,
        target: f64,
        threshold: f64,
        conn: &PgConnection,
    ) -> QueryResult<Self> {
        conn.transaction(|| {
            diesel::update(
                attendance_goals::table
                    .filter(attendance_goals::user_id.eq(uid))
                    .filter(attendance_goals::institute_id.eq(iid))
                    .filter(attendance_goals::is_active.eq(true)),
            )
            .set(attendance_goals::is_active.eq(false))
            .execute(conn)?;

            NewAttendanceGoal {
                user_id: uid,
                institute_id: iid,
                target_percentage: target,
                warning_threshold: threshold,
            }
            .create(conn)
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[table_name = "attendance_goals"]
pub struct NewAttendanceGoal {
    pub user_id: i32,
    pub institute_id: i32,
    pub target_percentage: f64,
    pub warning_threshold: f64,
}

impl NewAttendanceGoal {
    pub fn create(&self, conn: &PgConnection) -> QueryResult<AttendanceGoal> {
        diesel::insert_into(attendance_goals::table)
            .values(self)
            .get_result(conn)
    }
}
