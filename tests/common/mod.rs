use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use tuneguess_server::{
    errors::{AppError, AppResult},
    models::domain::{QuizResult, User},
    models::dto::response::QuizStats,
    repositories::{QuizResultRepository, UserRepository},
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.spotify_id)
            || users.values().any(|u| u.email == user.email)
        {
            return Err(AppError::DatabaseError("duplicate key".to_string()));
        }

        if user.id.is_none() {
            user.id = Some(ObjectId::new());
        }
        users.insert(user.spotify_id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_spotify_id(&self, spotify_id: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(spotify_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update_credentials(
        &self,
        spotify_id: &str,
        refresh_token: &str,
        image: Option<String>,
    ) -> AppResult<User> {
        let mut users = self.users.write().await;

        let user = users.get_mut(spotify_id).ok_or_else(|| {
            AppError::NotFound(format!("User with spotify id '{}' not found", spotify_id))
        })?;

        user.refresh_token = refresh_token.to_string();
        if image.is_some() {
            user.image = image;
        }
        Ok(user.clone())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizResultRepository {
    results: Arc<RwLock<Vec<QuizResult>>>,
}

impl InMemoryQuizResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryQuizResultRepository {
    async fn insert(&self, mut result: QuizResult) -> AppResult<QuizResult> {
        let mut results = self.results.write().await;
        if result.id.is_none() {
            result.id = Some(ObjectId::new());
        }
        results.push(result.clone());
        Ok(result)
    }

    async fn find_page_for_user(
        &self,
        user_id: &ObjectId,
        skip: i64,
        limit: i64,
    ) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;

        let mut items: Vec<QuizResult> = results
            .iter()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));

        let page: Vec<QuizResult> = items
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|mut r| {
                // mirror the Mongo projection that drops per-track details
                r.tracks = vec![];
                r
            })
            .collect();

        Ok(page)
    }

    async fn count_for_user(&self, user_id: &ObjectId) -> AppResult<i64> {
        let results = self.results.read().await;
        Ok(results.iter().filter(|r| r.user_id == *user_id).count() as i64)
    }

    async fn aggregate_stats(&self, user_id: &ObjectId) -> AppResult<QuizStats> {
        let results = self.results.read().await;
        let owned: Vec<&QuizResult> = results.iter().filter(|r| r.user_id == *user_id).collect();

        if owned.is_empty() {
            return Ok(QuizStats::default());
        }

        let total_quizzes = owned.len() as i64;
        let percentage_sum: i64 = owned.iter().map(|r| r.percentage as i64).sum();

        Ok(QuizStats {
            total_quizzes,
            average_score: percentage_sum as f64 / total_quizzes as f64,
            best_score: owned.iter().map(|r| r.percentage).max().unwrap_or(0),
            total_correct: owned.iter().map(|r| r.score as i64).sum(),
            total_questions: owned.iter().map(|r| r.total_questions as i64).sum(),
        })
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}
