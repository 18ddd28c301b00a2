use crate::models::institute::Institute;
use crate::schema::subjects;
use diesel::prelude::*;
use diesel::PgConnection;
use serde::{Deserialize, Serialize};

#[derive(
    Queryable, Debug, Serialize, Deserialize, AsChangeset, Clone, Identifiable, Associations,
)]
#[belongs_to(Institute)]
#[table_name = "subjects"]
pub struct Subject {
    pub id: i32,
    pub institute_id: i32,
    pub name: String,
    pub difficulty: String,
    pub color_code: String,
    pub is_active: bool,
}

impl Subject {
    pub fn find(sid: i32, conn: &PgConnection) -> QueryResult<Self> {
        subjects::table.find(sid).first(conn)
    }

    pub fn list_active(iid: i32, conn: &PgConnection) -> QueryResult<Vec<Self>> {
        subjects::table
            .filter(subjects::institute_id.eq(iid))
            .filter(subjects::is_active.eq(true))
            .order(subjects::name)
            .load(conn)
    }

    pub fn update_active(&self, active: bool, conn: &PgConnection) -> QueryResult<()> {
        diesel::update(self)
            .set(subjects::is_active.eq(active))
            .execute(conn)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[table_name = "subjects"]
pub struct NewSubject {
    pub institute_id: i32,
    pub name: String,
    pub difficulty: String,
    pub color_code: String,
}

impl NewSubject {
    pub fn create(&self, conn: &PgConnection) -> QueryResult<Subject> {
        diesel::insert_into(subjects::table)
            .values(self)
            .get_result(conn)
    }
}
