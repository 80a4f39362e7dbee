use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoQuizResultRepository, MongoUserRepository, QuizResultRepository, UserRepository,
    },
    services::{CatalogService, QuizService, UserService},
    spotify::SpotifyClient,
};

#[derive(Clone)]
pub struct AppState {
    pub spotify: Arc<SpotifyClient>,
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub catalog_service: Arc<CatalogService>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(db: &Database, config: Config) -> AppResult<Self> {
        let user_repository: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(db));
        let result_repository: Arc<dyn QuizResultRepository> =
            Arc::new(MongoQuizResultRepository::new(db));
        user_repository.ensure_indexes().await?;
        result_repository.ensure_indexes().await?;

        Ok(Self::from_repositories(
            user_repository,
            result_repository,
            config,
        ))
    }

    /// Wire the services over any repository implementations. Integration
    /// tests use this with in-memory repositories.
    pub fn from_repositories(
        user_repository: Arc<dyn UserRepository>,
        result_repository: Arc<dyn QuizResultRepository>,
        config: Config,
    ) -> Self {
        let spotify = Arc::new(SpotifyClient::new(&config));
        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let quiz_service = Arc::new(QuizService::new(
            Arc::clone(&spotify),
            user_repository,
            result_repository,
        ));
        let catalog_service = Arc::new(CatalogService::new(Arc::clone(&spotify)));
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Self {
            spotify,
            user_service,
            quiz_service,
            catalog_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
