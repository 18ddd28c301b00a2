use crate::schema::enrollments;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

/// Student/teacher/institute link gating whose attendance counts where.
#[derive(Queryable, Debug, Serialize, Deserialize, Clone, Identifiable, Associations)]
#[table_name = "enrollments"]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub teacher_id: i32,
    pub institute_id: i32,
    pub is_active: bool,
}

impl Enrollment {
    pub fn is_enrolled(student: i32, institute: i32, conn: &PgConnection) -> QueryResult<bool> {
        let n: i64 = enrollments::table
            .filter(enrollments::student_id.eq(student))
            .filter(enrollments::institute_id.eq(institute))
            .filter(enrollments::is_active.eq(true))
            .select(count_star())
            .first(conn)?;
        Ok(n > 0)
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[table_name = "enrollments"]
pub struct NewEnrollment {
    pub student_id: i32,
    pub teacher_id: i32,
    pub institute_id: i32,
}

impl NewEnrollment {
    pub fn create(&self, conn: &PgConnection) -> QueryResult<Enrollment> {
        diesel::insert_into(enrollments::table)
            .values(self)
            .get_result(conn)
    }
}
