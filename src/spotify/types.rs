use std::fmt;

use serde::{Deserialize, Serialize};

/// Listening-history window understood by the Spotify top-items endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [
        TimeRange::ShortTerm,
        TimeRange::MediumTerm,
        TimeRange::LongTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::MediumTerm
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AlbumImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl Track {
    /// Display string joining every credited artist, matching the quiz
    /// option format ("Artist A, Artist B").
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

/// Paging envelope Spotify wraps around top-items responses.
#[derive(Clone, Debug, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: Page<Track>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: u64,
    pub token_type: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub images: Vec<AlbumImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_query_values_are_snake_case() {
        for range in TimeRange::ALL {
            let parsed: TimeRange =
                serde_json::from_str(&format!("\"{}\"", range.as_str())).unwrap();
            assert_eq!(parsed, range);
        }
        assert!(serde_json::from_str::<TimeRange>("\"last_week\"").is_err());
    }

    #[test]
    fn test_track_artist_names_joined() {
        let track = Track {
            id: "t1".to_string(),
            name: "Telephone".to_string(),
            preview_url: None,
            artists: vec![
                TrackArtist {
                    id: None,
                    name: "Lady Gaga".to_string(),
                },
                TrackArtist {
                    id: None,
                    name: "Beyoncé".to_string(),
                },
            ],
            album: None,
            popularity: None,
        };

        assert_eq!(track.artist_names(), "Lady Gaga, Beyoncé");
    }

    #[test]
    fn test_track_deserializes_with_null_preview() {
        let json = r#"{
            "id": "abc",
            "name": "Song",
            "preview_url": null,
            "artists": [{ "id": "a1", "name": "Someone" }]
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert!(track.preview_url.is_none());
        assert_eq!(track.artists.len(), 1);
    }
}
