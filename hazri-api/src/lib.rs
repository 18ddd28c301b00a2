use std::sync::Arc;

use actix_web::web;
use async_graphql::{Context, EmptySubscription, Schema};
use models::{AppSchema, Mutation, Query};

use hazri_common::utils::{Claims, Role};
use hazri_db::connection::{Conn, PgPool};

pub fn configure_service(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::index_playground)
        .service(handlers::index);
}

pub fn create_schema_with_context(pool: PgPool) -> AppSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(Arc::new(pool))
        .finish()
}

pub fn get_conn_from_ctx(ctx: &Context<'_>) -> Conn {
    ctx.data::<Arc<PgPool>>()
        .expect("Can't get pool")
        .get()
        .expect("Can't get DB connection")
}

pub(crate) fn get_id_from_ctx(ctx: &Context<'_>) -> Option<i32> {
    ctx.data_opt::<Claims>().map(|c| c.sub)
}

pub(crate) fn get_role_from_ctx(ctx: &Context<'_>) -> Option<Role> {
    ctx.data_opt::<Claims>().map(|c| c.role)
}

mod handlers;
pub mod models;
