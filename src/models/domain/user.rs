use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Identity record created on first sign-in with Spotify. Unique per
/// `spotify_id` and per `email`; the refresh credential is replaced on
/// every subsequent sign-in.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub spotify_id: String,
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        name: &str,
        email: &str,
        spotify_id: &str,
        refresh_token: &str,
        image: Option<String>,
    ) -> Self {
        User {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            spotify_id: spotify_id.to_string(),
            refresh_token: refresh_token.to_string(),
            image,
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(spotify_id: &str) -> Self {
        User::new(
            "Test User",
            &format!("{}@example.com", spotify_id),
            spotify_id,
            "refresh-token",
            None,
        )
    }
}
