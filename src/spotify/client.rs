use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    spotify::types::{
        Artist, Page, SearchTracksResponse, TimeRange, TokenResponse, Track, UserProfile,
    },
};

const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const OAUTH_SCOPES: &str = "user-read-email user-top-read user-read-private";

/// Thin authenticated wrapper over the Spotify Web API. No retry or backoff:
/// a single failed call aborts the whole operation.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    accounts_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_url: SPOTIFY_API_URL.to_string(),
            accounts_url: SPOTIFY_ACCOUNTS_URL.to_string(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.expose_secret().to_string(),
            redirect_uri: config.spotify_redirect_uri.clone(),
        }
    }

    /// Override the upstream base URLs, for tests against a local stub server.
    #[cfg(test)]
    pub fn with_base_urls(mut self, api_url: &str, accounts_url: &str) -> Self {
        self.api_url = api_url.to_string();
        self.accounts_url = accounts_url.to_string();
        self
    }

    /// URL the browser should be sent to for the authorization step.
    pub fn authorize_url(&self) -> AppResult<String> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/authorize", self.accounts_url),
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", OAUTH_SCOPES),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("malformed authorize URL: {}", e)))?;

        Ok(url.into())
    }

    /// Exchange an authorization code for access and refresh tokens.
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenResponse> {
        let response = self
            .http
            .post(format!("{}/api/token", self.accounts_url))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Obtain a fresh access token from a stored refresh credential.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let response = self
            .http
            .post(format!("{}/api/token", self.accounts_url))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Profile of the user the access token belongs to.
    pub async fn current_user(&self, access_token: &str) -> AppResult<UserProfile> {
        self.get_json(access_token, "/me".to_string()).await
    }

    pub async fn top_tracks(
        &self,
        access_token: &str,
        time_range: TimeRange,
        limit: u32,
    ) -> AppResult<Vec<Track>> {
        let page: Page<Track> = self
            .get_json(
                access_token,
                format!("/me/top/tracks?time_range={}&limit={}", time_range, limit),
            )
            .await?;
        Ok(page.items)
    }

    pub async fn top_artists(
        &self,
        access_token: &str,
        time_range: TimeRange,
        limit: u32,
    ) -> AppResult<Vec<Artist>> {
        let page: Page<Artist> = self
            .get_json(
                access_token,
                format!("/me/top/artists?time_range={}&limit={}", time_range, limit),
            )
            .await?;
        Ok(page.items)
    }

    /// Catalog search used by the preview lookup endpoint.
    pub async fn search_tracks(
        &self,
        access_token: &str,
        query: &str,
        limit: u32,
    ) -> AppResult<Vec<Track>> {
        let response = self
            .search_request(query, limit)
            .bearer_auth(access_token)
            .send()
            .await?;

        let parsed: SearchTracksResponse = Self::parse_response(response).await?;
        Ok(parsed.tracks.items)
    }

    fn search_request(&self, query: &str, limit: u32) -> reqwest::RequestBuilder {
        self.http.get(format!("{}/search", self.api_url)).query(&[
            ("q", query),
            ("type", "track"),
            ("limit", &limit.to_string()),
        ])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        path_and_query: String,
    ) -> AppResult<T> {
        let response = self
            .http
            .get(format!("{}{}", self.api_url, path_and_query))
            .bearer_auth(access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            log::error!("Spotify API error: {} {}", status, body);
            return Err(AppError::UpstreamError(format!("{}", status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::UpstreamError(format!("invalid response body: {}", e)))
    }
}
