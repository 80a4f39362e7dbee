use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppResult,
    models::dto::request::{GradeAnswerRequest, PaginationParams, QuizParams, SaveResultRequest},
};

/// Generate a quiz from the caller's top tracks. `mode=multiple_choice`
/// (default, 10 questions) or `mode=free_text` (3 questions).
#[get("/api/quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    query: web::Query<QuizParams>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let questions = state
        .quiz_service
        .generate_quiz(&auth.0.access_token, query.mode)
        .await?;
    Ok(HttpResponse::Ok().json(questions))
}

/// Grade one free-text answer against the ground truth.
#[post("/api/quiz/grade")]
pub async fn grade_answer(
    state: web::Data<AppState>,
    request: web::Json<GradeAnswerRequest>,
    _auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let outcome = state
        .quiz_service
        .grade_answer(&request.guess, &request.answer);
    Ok(HttpResponse::Ok().json(outcome))
}

#[post("/api/quiz/save-result")]
pub async fn save_result(
    state: web::Data<AppState>,
    request: web::Json<SaveResultRequest>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let response = state
        .quiz_service
        .save_result(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/quiz/results")]
pub async fn list_results(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let response = state
        .quiz_service
        .list_results(&auth.0, &query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
