use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use taskhub::auth::{AuthMiddleware, AuthService, TokenCodec};
use taskhub::config::Config;
use taskhub::routes;
use taskhub::store::postgres::{PgTaskStore, PgUserStore};
use taskhub::store::{TaskStore, UserStore};
use taskhub::tasks::TaskService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // The signing key is loaded exactly once; everything that needs the codec
    // receives this instance through app data.
    let codec = TokenCodec::new(config.jwt_secret.as_bytes());
    let user_store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let task_store: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool));
    let auth_service = AuthService::new(user_store.clone(), codec.clone());
    let task_service = TaskService::new(task_store.clone());

    log::info!("starting taskhub server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(codec.clone()))
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(task_service.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
