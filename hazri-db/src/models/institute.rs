use crate::schema::{enrollments, institutes};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable, Debug, Serialize, Deserialize, AsChangeset, Clone, Identifiable, Associations,
)]
#[table_name = "institutes"]
pub struct Institute {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl Institute {
    pub fn find(iid: i32, conn: &PgConnection) -> QueryResult<Self> {
        institutes::table.find(iid).first(conn)
    }

    pub fn list_by_owner(teacher_id: i32, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        institutes::table
            .filter(institutes::owner_id.eq(teacher_id))
            .filter(institutes::is_active.eq(true))
            .order(institutes::name)
            .load(conn)
    }

    /// Active institutes the student is enrolled in, via the enrollment link.
    pub fn list_enrolled(student_id: i32, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        institutes::table
            .inner_join(enrollments::table)
            .filter(enrollments::student_id.eq(student_id))
            .filter(enrollments::is_active.eq(true))
            .filter(institutes::is_active.eq(true))
            .select(institutes::all_columns)
            .distinct()
            .order(institutes::name)
            .load(conn)
    }

    pub fn update_active(&self, active: bool, conn: &PgConnection) -> QueryResult<()> {
        diesel::update(self)
            .set(institutes::is_active.eq(active))
            .execute(conn)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[table_name = "institutes"]
pub struct NewInstitute {
    pub owner_id: i32,
    pub name: String,
}

impl NewInstitute {
    pub fn create(&self, conn: &PgConnection) -> QueryResult<Institute> {
        diesel::insert_into(institutes::table)
            .values(self)
            .get_result(conn)
    }
}
