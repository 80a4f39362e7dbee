use std::collections::HashSet;
use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::{QuizQuestion, QuizResult, TrackResult},
    models::dto::request::{PaginationParams, QuizMode, SaveResultRequest},
    models::dto::response::{
        Pagination, ResultsResponse, SaveResultResponse, SavedResult,
    },
    quiz::{self, AnswerKey, GradeOutcome},
    repositories::{QuizResultRepository, UserRepository},
    spotify::{SpotifyClient, TimeRange, Track},
};

const TOP_TRACKS_FETCH_LIMIT: u32 = 50;

pub struct QuizService {
    spotify: Arc<SpotifyClient>,
    users: Arc<dyn UserRepository>,
    results: Arc<dyn QuizResultRepository>,
}

impl QuizService {
    pub fn new(
        spotify: Arc<SpotifyClient>,
        users: Arc<dyn UserRepository>,
        results: Arc<dyn QuizResultRepository>,
    ) -> Self {
        Self {
            spotify,
            users,
            results,
        }
    }

    /// Build a quiz from the user's top tracks. Tracks are pulled from all
    /// three time ranges concurrently and de-duplicated by id, which widens
    /// the candidate pool well beyond a single listening window.
    pub async fn generate_quiz(
        &self,
        access_token: &str,
        mode: QuizMode,
    ) -> AppResult<Vec<QuizQuestion>> {
        let (short, medium, long) = tokio::try_join!(
            self.spotify
                .top_tracks(access_token, TimeRange::ShortTerm, TOP_TRACKS_FETCH_LIMIT),
            self.spotify
                .top_tracks(access_token, TimeRange::MediumTerm, TOP_TRACKS_FETCH_LIMIT),
            self.spotify
                .top_tracks(access_token, TimeRange::LongTerm, TOP_TRACKS_FETCH_LIMIT),
        )?;

        let pool = dedup_tracks([short, medium, long]);

        let count = match mode {
            QuizMode::MultipleChoice => quiz::MULTIPLE_CHOICE_QUESTIONS,
            QuizMode::FreeText => quiz::FREE_TEXT_QUESTIONS,
        };

        let mut rng = rand::rng();
        quiz::generate_questions(&pool, count, &mut rng)
    }

    /// Grade one free-text answer against the ground truth.
    pub fn grade_answer(&self, guess: &AnswerKey, answer: &AnswerKey) -> GradeOutcome {
        quiz::grade(guess, answer)
    }

    /// Persist a completed quiz. One self-contained insert per quiz; the
    /// document store's per-document atomicity is all we rely on.
    pub async fn save_result(
        &self,
        claims: &Claims,
        request: SaveResultRequest,
    ) -> AppResult<SaveResultResponse> {
        request
            .validate()
            .map_err(|_| AppError::BadRequest("Invalid score data".to_string()))?;

        if request.score > request.total_questions {
            return Err(AppError::BadRequest("Invalid score data".to_string()));
        }

        let user = self
            .users
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("User record has no id".to_string()))?;

        let tracks: Vec<TrackResult> = request
            .tracks
            .unwrap_or_default()
            .into_iter()
            .map(|t| TrackResult {
                track_id: t.track_id,
                track_name: t.track_name,
                artist: t.artist,
                correct: t.correct,
                user_answer: t.user_answer,
            })
            .collect();

        let result = QuizResult::new(
            user_id,
            &user.email,
            &user.name,
            request.score,
            request.total_questions,
            request.time_range.unwrap_or_default(),
            tracks,
        );

        let saved = self.results.insert(result).await?;

        log::info!(
            "Quiz result saved for user {}: {}/{} ({}%)",
            saved.user_email,
            saved.score,
            saved.total_questions,
            saved.percentage
        );

        Ok(SaveResultResponse {
            message: "Quiz result saved successfully".to_string(),
            result: SavedResult {
                id: saved.id.map(|oid| oid.to_hex()).unwrap_or_default(),
                score: saved.score,
                total_questions: saved.total_questions,
                percentage: saved.percentage,
                date: saved.date,
            },
        })
    }

    /// Newest-first page of the caller's results plus read-time aggregates.
    pub async fn list_results(
        &self,
        claims: &Claims,
        pagination: &PaginationParams,
    ) -> AppResult<ResultsResponse> {
        let user = self
            .users
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("User record has no id".to_string()))?;

        let page = self
            .results
            .find_page_for_user(&user_id, pagination.skip(), pagination.limit())
            .await?;
        let total = self.results.count_for_user(&user_id).await?;
        let stats = self.results.aggregate_stats(&user_id).await?;

        Ok(ResultsResponse {
            results: page.into_iter().map(Into::into).collect(),
            pagination: Pagination::new(pagination.page(), pagination.limit(), total),
            stats,
        })
    }
}

/// Keep the first occurrence of each track id across the fetched ranges.
fn dedup_tracks(batches: [Vec<Track>; 3]) -> Vec<Track> {
    let mut seen = HashSet::new();
    let mut pool = Vec::new();

    for track in batches.into_iter().flatten() {
        if seen.insert(track.id.clone()) {
            pool.push(track);
        }
    }

    pool
}
