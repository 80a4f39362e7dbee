pub mod auth_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod spotify_handler;

use actix_web::web;

/// Register every route on the app. Shared between `main` and the
/// handler-level tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(health_handler::health_check_ready)
        .service(health_handler::health_check_live)
        .service(auth_handler::login)
        .service(auth_handler::callback)
        .service(auth_handler::refresh)
        .service(spotify_handler::top_items)
        .service(spotify_handler::preview_check)
        .service(quiz_handler::generate_quiz)
        .service(quiz_handler::grade_answer)
        .service(quiz_handler::save_result)
        .service(quiz_handler::list_results);
}
