use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    models::dto::response::{AuthResponse, LoginUrlResponse, SessionUser},
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: String,
}

/// Where the browser should send the user to authorize with Spotify.
#[get("/api/auth/login")]
pub async fn login(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(LoginUrlResponse {
        url: state.spotify.authorize_url()?,
    }))
}

/// OAuth code exchange. Creates the user record on first sign-in, updates
/// the stored refresh credential on every later one, then issues the
/// session JWT that carries the Spotify access token.
#[get("/api/auth/callback")]
pub async fn callback(
    state: web::Data<AppState>,
    web::Query(params): web::Query<CallbackParams>,
) -> AppResult<HttpResponse> {
    log::info!("Spotify OAuth callback started");

    let tokens = state.spotify.exchange_code(&params.code).await?;
    let refresh_token = tokens.refresh_token.as_deref().ok_or_else(|| {
        AppError::UpstreamError("token exchange returned no refresh_token".to_string())
    })?;

    let profile = state.spotify.current_user(&tokens.access_token).await?;
    let user = state.user_service.sign_in(&profile, refresh_token).await?;

    let token = state.jwt_service.create_token(&user, &tokens.access_token)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: SessionUser {
            name: user.name,
            email: user.email,
            image: user.image,
        },
    }))
}

/// Mint a fresh session from the stored refresh credential once the
/// embedded access token has expired.
#[post("/api/auth/refresh")]
pub async fn refresh(state: web::Data<AppState>, auth: AuthenticatedUser) -> AppResult<HttpResponse> {
    let user = state.user_service.get_by_spotify_id(&auth.0.sub).await?;

    let tokens = state
        .spotify
        .refresh_access_token(&user.refresh_token)
        .await?;

    // Spotify may rotate the refresh credential on use.
    let user = match tokens.refresh_token.as_deref() {
        Some(rotated) => {
            state
                .user_service
                .rotate_refresh_token(&user.spotify_id, rotated)
                .await?
        }
        None => user,
    };

    let token = state.jwt_service.create_token(&user, &tokens.access_token)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: SessionUser {
            name: user.name,
            email: user.email,
            image: user.image,
        },
    }))
}
