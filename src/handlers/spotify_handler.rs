use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppResult,
    models::dto::request::{PreviewCheckRequest, TimeRangeParams},
};

/// Dashboard payload: top tracks, top artists, and ranked genres for one
/// listening-history window.
#[get("/api/spotify/top-items")]
pub async fn top_items(
    state: web::Data<AppState>,
    query: web::Query<TimeRangeParams>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let response = state
        .catalog_service
        .top_items(&auth.0.access_token, query.time_range)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Preview lookup for a song/artist pair; 404 when no playable clip is
/// found.
#[post("/api/preview-check")]
pub async fn preview_check(
    state: web::Data<AppState>,
    request: web::Json<PreviewCheckRequest>,
    auth: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let response = state
        .catalog_service
        .preview_check(&auth.0.access_token, &request)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
