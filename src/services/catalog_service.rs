use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::dto::request::PreviewCheckRequest,
    models::dto::response::{GenreCount, PreviewCheckResponse, TopItemsResponse},
    spotify::{Artist, SpotifyClient, TimeRange},
};

const TOP_ITEMS_LIMIT: u32 = 50;
const PREVIEW_SEARCH_LIMIT: u32 = 5;

pub struct CatalogService {
    spotify: Arc<SpotifyClient>,
}

impl CatalogService {
    pub fn new(spotify: Arc<SpotifyClient>) -> Self {
        Self { spotify }
    }

    /// Dashboard read path: top tracks and artists for one time range,
    /// fetched concurrently, with genres ranked by frequency across the
    /// top artists.
    pub async fn top_items(
        &self,
        access_token: &str,
        time_range: TimeRange,
    ) -> AppResult<TopItemsResponse> {
        let (tracks, artists) = tokio::try_join!(
            self.spotify
                .top_tracks(access_token, time_range, TOP_ITEMS_LIMIT),
            self.spotify
                .top_artists(access_token, time_range, TOP_ITEMS_LIMIT),
        )?;

        let genres = rank_genres(&artists);

        Ok(TopItemsResponse {
            tracks,
            artists,
            genres,
        })
    }

    /// Look up a playable preview clip for a song/artist pair via catalog
    /// search. 404 when nothing in the first few hits carries a preview.
    pub async fn preview_check(
        &self,
        access_token: &str,
        request: &PreviewCheckRequest,
    ) -> AppResult<PreviewCheckResponse> {
        request
            .validate()
            .map_err(|_| AppError::BadRequest("Missing song name.".to_string()))?;

        let query = match &request.artist {
            Some(artist) if !artist.is_empty() => format!("{} {}", request.song, artist),
            _ => request.song.clone(),
        };

        let tracks = self
            .spotify
            .search_tracks(access_token, &query, PREVIEW_SEARCH_LIMIT)
            .await?;

        let found = tracks
            .into_iter()
            .find(|t| t.preview_url.is_some())
            .ok_or_else(|| {
                AppError::NotFound("No preview found for this song/artist.".to_string())
            })?;

        let preview_url = found.preview_url.clone().unwrap_or_default();
        Ok(PreviewCheckResponse {
            preview_url,
            artist: found.artist_names(),
            album: found.album.as_ref().map(|a| a.name.clone()),
            track: found.name,
            track_id: found.id,
        })
    }
}

/// Count how often each genre appears across the top artists, most common
/// first. Ties break alphabetically so the ordering is deterministic.
fn rank_genres(artists: &[Artist]) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for artist in artists {
        for genre in &artist.genres {
            *counts.entry(genre.as_str()).or_insert(0) += 1;
        }
    }

    let mut genres: Vec<GenreCount> = counts
        .into_iter()
        .map(|(name, count)| GenreCount {
            name: name.to_string(),
            count,
        })
        .collect();
    genres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    genres
}
