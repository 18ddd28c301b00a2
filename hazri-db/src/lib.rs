//! Persistence layer: diesel schema, models, connection pool, and the
//! engine-facing [`store::DbStore`] adapter.

use connection::PgPool;

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

embed_migrations!();

pub fn run_migrations(pool: &PgPool) {
    let conn = pool.get().expect("Can't get DB connection");
    embedded_migrations::run(&conn).expect("Failed to run database migrations");
}

pub mod connection;
pub mod models;
pub mod schema;
pub mod store;
