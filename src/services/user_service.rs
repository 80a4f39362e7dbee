use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::User,
    repositories::UserRepository,
    spotify::types::UserProfile,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Upsert on sign-in: create the identity record the first time a
    /// Spotify account authenticates, refresh its stored credential on
    /// every later sign-in.
    pub async fn sign_in(&self, profile: &UserProfile, refresh_token: &str) -> AppResult<User> {
        let email = profile.email.as_deref().ok_or_else(|| {
            AppError::Unauthorized("Spotify account has no email address".to_string())
        })?;

        let image = profile.images.first().map(|i| i.url.clone());

        match self.repository.find_by_spotify_id(&profile.id).await? {
            Some(_) => {
                let user = self
                    .repository
                    .update_credentials(&profile.id, refresh_token, image.clone())
                    .await?;
                log::info!("Existing user signed in: {}", user.email);
                Ok(user)
            }
            None => {
                let name = profile.display_name.clone().unwrap_or_else(|| profile.id.clone());
                let user = self
                    .repository
                    .create(User::new(&name, email, &profile.id, refresh_token, image))
                    .await?;
                log::info!("Created user on first sign-in: {}", user.email);
                Ok(user)
            }
        }
    }

    /// Store a rotated refresh credential without touching anything else.
    pub async fn rotate_refresh_token(
        &self,
        spotify_id: &str,
        refresh_token: &str,
    ) -> AppResult<User> {
        self.repository
            .update_credentials(spotify_id, refresh_token, None)
            .await
    }

    pub async fn get_by_spotify_id(&self, spotify_id: &str) -> AppResult<User> {
        self.repository
            .find_by_spotify_id(spotify_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
