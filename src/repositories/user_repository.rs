use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_spotify_id(&self, spotify_id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Replace the stored refresh credential (and avatar, when present) on a
    /// repeat sign-in. Returns the updated record.
    async fn update_credentials(
        &self,
        spotify_id: &str,
        refresh_token: &str,
        image: Option<String>,
    ) -> AppResult<User>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection.insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn find_by_spotify_id(&self, spotify_id: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "spotify_id": spotify_id })
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn update_credentials(
        &self,
        spotify_id: &str,
        refresh_token: &str,
        image: Option<String>,
    ) -> AppResult<User> {
        let mut update = doc! { "refresh_token": refresh_token };
        if let Some(image) = image {
            update.insert("image", image);
        }

        let updated = self
            .collection
            .find_one_and_update(doc! { "spotify_id": spotify_id }, doc! { "$set": update })
            .return_document(ReturnDocument::After)
            .await?;

        updated.ok_or_else(|| {
            AppError::NotFound(format!("User with spotify id '{}' not found", spotify_id))
        })
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let spotify_id_index = IndexModel::builder()
            .keys(doc! { "spotify_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("spotify_id_unique".to_string())
                    .build(),
            )
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(spotify_id_index).await?;
        self.collection.create_index(email_index).await?;

        log::info!("Created unique indexes on users collection");

        Ok(())
    }
}
