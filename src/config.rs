use std::env;

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: SecretString,
    pub spotify_redirect_uri: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "tuneguess-local".to_string()),
            spotify_client_id: env::var("SPOTIFY_CLIENT_ID")
                .unwrap_or_else(|_| "spotify_client_id".to_string()),
            spotify_client_secret: SecretString::from(
                env::var("SPOTIFY_CLIENT_SECRET")
                    .unwrap_or_else(|_| "spotify_client_secret".to_string()),
            ),
            spotify_redirect_uri: env::var("SPOTIFY_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:3000/auth/callback".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
        }
    }

    /// Validate that production-critical configuration is set.
    /// Panics if required secrets are using default values.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();
        let spotify_secret = self.spotify_client_secret.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if spotify_secret == "spotify_client_secret" {
            panic!(
                "FATAL: SPOTIFY_CLIENT_SECRET is using default value! Set SPOTIFY_CLIENT_SECRET environment variable."
            );
        }

        if self.spotify_client_id == "spotify_client_id" {
            panic!(
                "FATAL: SPOTIFY_CLIENT_ID is using default value! Set SPOTIFY_CLIENT_ID environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "tuneguess-test".to_string(),
            spotify_client_id: "id string".to_string(),
            spotify_client_secret: SecretString::from("secret string".to_string()),
            spotify_redirect_uri: "http://localhost:3000/auth/callback".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
        }
    }
}
