use serde::Deserialize;
use validator::Validate;

use crate::models::domain::UserAnswer;
use crate::quiz::AnswerKey;
use crate::spotify::TimeRange;

/// Which quiz variant to generate: 10 multiple-choice questions, or 3
/// free-text ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    MultipleChoice,
    FreeText,
}

impl Default for QuizMode {
    fn default() -> Self {
        QuizMode::MultipleChoice
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizParams {
    #[serde(default)]
    pub mode: QuizMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeRangeParams {
    #[serde(default)]
    pub time_range: TimeRange,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveResultRequest {
    #[validate(range(min = 0))]
    pub score: i32,

    #[validate(range(min = 1, message = "totalQuestions must be positive"))]
    pub total_questions: i32,

    #[serde(default)]
    pub time_range: Option<TimeRange>,

    #[serde(default)]
    pub tracks: Option<Vec<TrackResultInput>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResultInput {
    pub track_id: String,
    pub track_name: String,
    pub artist: String,
    pub correct: bool,
    #[serde(default)]
    pub user_answer: Option<UserAnswer>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PreviewCheckRequest {
    #[validate(length(min = 1, message = "Missing song name."))]
    pub song: String,

    #[serde(default)]
    pub artist: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeAnswerRequest {
    pub guess: AnswerKey,
    pub answer: AnswerKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn skip(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}
