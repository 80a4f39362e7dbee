use std::future::{ready, Ready};

use actix_web::{http::header::AUTHORIZATION, FromRequest, HttpRequest};

use crate::{auth::Claims, auth::JwtService, errors::AppError};

/// Extractor for authenticated requests. Validates the `Authorization:
/// Bearer` header before the handler body runs, so an unauthenticated
/// request is rejected with 401 before any side effect occurs.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(claims_from_request(req).map(AuthenticatedUser))
    }
}

fn claims_from_request(req: &HttpRequest) -> Result<Claims, AppError> {
    let jwt_service = req
        .app_data::<actix_web::web::Data<JwtService>>()
        .ok_or_else(|| AppError::InternalError("JWT service not configured".to_string()))?;

    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::NotAuthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::NotAuthenticated)?;

    jwt_service
        .validate_token(token)
        .map_err(|_| AppError::NotAuthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, models::domain::User};
    use actix_web::{get, test, web, App, HttpResponse};

    #[get("/protected")]
    async fn protected(auth: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "sub": auth.0.sub }))
    }

    fn jwt_service() -> JwtService {
        JwtService::new(&Config::test_config().jwt_secret, 1)
    }

    #[actix_web::test]
    async fn test_missing_token_is_401() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(jwt_service()))
                .service(protected),
        )
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_malformed_header_is_401() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(jwt_service()))
                .service(protected),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, "Token abc"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let service = jwt_service();
        let user = User::test_user("spotify-jane");
        let token = service.create_token(&user, "access-abc").unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(service))
                .service(protected),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }
}
