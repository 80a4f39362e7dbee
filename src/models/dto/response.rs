use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::QuizResult;
use crate::spotify::{Artist, TimeRange, Track};

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginUrlResponse {
    pub url: String,
}

/// Dashboard payload: top tracks and artists for one time range, plus
/// genres ranked by how often they appear across the top artists.
#[derive(Debug, Clone, Serialize)]
pub struct TopItemsResponse {
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub genres: Vec<GenreCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewCheckResponse {
    pub preview_url: String,
    pub track: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(rename = "trackId")]
    pub track_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveResultResponse {
    pub message: String,
    pub result: SavedResult,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResult {
    pub id: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: i32,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub results: Vec<QuizResultSummary>,
    pub pagination: Pagination,
    pub stats: QuizStats,
}

/// Listing entry with the per-track details left out, matching the read
/// path's projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResultSummary {
    pub id: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: i32,
    pub time_range: TimeRange,
    pub date: DateTime<Utc>,
}

impl From<QuizResult> for QuizResultSummary {
    fn from(result: QuizResult) -> Self {
        QuizResultSummary {
            id: result.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            score: result.score,
            total_questions: result.total_questions,
            percentage: result.percentage,
            time_range: result.time_range,
            date: result.date,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Pagination {
            page,
            limit,
            total,
            pages: if limit > 0 {
                (total + limit - 1) / limit
            } else {
                0
            },
        }
    }
}

/// Group-by reduction over all of a user's results, computed at read time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_quizzes: i64,
    pub average_score: f64,
    pub best_score: i32,
    pub total_correct: i64,
    pub total_questions: i64,
}
