use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use tuneguess_server::{
    app_state::AppState, config::Config, db::Database, errors::AppError, handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let db = Database::connect(&config)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to connect to MongoDB: {}", e)))?;

    let state = AppState::new(&db, config).await.map_err(|e| {
        std::io::Error::other(format!("failed to initialize application state: {}", e))
    })?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(state.jwt_service.clone()))
            // Keep malformed-input failures on the `{ "error": ... }` contract.
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
            )
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
            )
            .configure(handlers::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
