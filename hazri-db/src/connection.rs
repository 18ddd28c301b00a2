use std::env;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{pg::PgConnection, r2d2::PooledConnection};

pub type PgPool = Pool<ConnectionManager<PgConnection>>;
pub type Conn = PooledConnection<ConnectionManager<PgConnection>>;

const DEFAULT_POOL_SIZE: u32 = 8;

pub fn create_connection_pool() -> PgPool {
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set");
    let pool_size = env::var("DATABASE_POOL_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_POOL_SIZE);
    let manager = ConnectionManager::<PgConnection>::new(db_url);
    Pool::builder()
        .max_size(pool_size)
        .build(manager)
        .expect("Failed to create pool")
}
