use actix_cors::Cors;
use actix_web::{App, HttpServer};
use dotenv::dotenv;
use hazri_api::{configure_service, create_schema_with_context};
use hazri_db::connection::create_connection_pool;
use hazri_db::run_migrations;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let pool = create_connection_pool();
    run_migrations(&pool);

    let schema = create_schema_with_context(pool);

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    log::info!("listening on {}", &bind);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .configure(configure_service)
            .data(schema.clone())
    })
    .bind(&bind)?
    .run()
    .await
}
