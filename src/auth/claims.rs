use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::User;

/// Session claims. The Spotify access token rides inside the session JWT so
/// protected handlers can call the catalog API on behalf of the user without
/// a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Spotify user id
    pub name: String,
    pub email: String,
    pub access_token: String,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user: &User, access_token: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.spotify_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            access_token: access_token.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user = User::test_user("spotify-jane");
        let claims = Claims::new(&user, "access-abc", 24);

        assert_eq!(claims.sub, "spotify-jane");
        assert_eq!(claims.email, "spotify-jane@example.com");
        assert_eq!(claims.access_token, "access-abc");
        assert!(claims.exp > claims.iat);
    }
}
