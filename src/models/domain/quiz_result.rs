use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::spotify::TimeRange;

/// One persisted quiz outcome. Append-only: results are never updated after
/// insertion, and `percentage` is derived in the constructor, never set
/// independently.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizResult {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub user_email: String,
    pub user_name: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: i32,
    pub time_range: TimeRange,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub tracks: Vec<TrackResult>,
}

/// Per-track outcome, including what the user actually typed in free-text
/// mode.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TrackResult {
    pub track_id: String,
    pub track_name: String,
    pub artist: String,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<UserAnswer>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserAnswer {
    pub artist: String,
    pub title: String,
}

impl QuizResult {
    pub fn new(
        user_id: ObjectId,
        user_email: &str,
        user_name: &str,
        score: i32,
        total_questions: i32,
        time_range: TimeRange,
        tracks: Vec<TrackResult>,
    ) -> Self {
        QuizResult {
            id: None,
            user_id,
            user_email: user_email.to_string(),
            user_name: user_name.to_string(),
            score,
            total_questions,
            percentage: Self::percentage_of(score, total_questions),
            time_range,
            date: Utc::now(),
            tracks,
        }
    }

    /// `round(score / total * 100)` for any valid non-zero total.
    pub fn percentage_of(score: i32, total_questions: i32) -> i32 {
        ((score as f64 / total_questions as f64) * 100.0).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(score: i32, total: i32) -> QuizResult {
        QuizResult::new(
            ObjectId::new(),
            "jane@example.com",
            "Jane Doe",
            score,
            total,
            TimeRange::MediumTerm,
            vec![],
        )
    }

    #[test]
    fn test_percentage_is_derived() {
        assert_eq!(make_result(7, 10).percentage, 70);
        assert_eq!(make_result(2, 3).percentage, 67);
        assert_eq!(make_result(1, 3).percentage, 33);
        assert_eq!(make_result(0, 10).percentage, 0);
        assert_eq!(make_result(10, 10).percentage, 100);
    }

    #[test]
    fn test_percentage_of_rounds_to_nearest() {
        assert_eq!(QuizResult::percentage_of(1, 8), 13); // 12.5 rounds up
        assert_eq!(QuizResult::percentage_of(1, 6), 17); // 16.66...
    }

    #[test]
    fn test_result_round_trip_keeps_track_outcomes() {
        let mut result = make_result(1, 3);
        result.tracks = vec![TrackResult {
            track_id: "t1".to_string(),
            track_name: "Let It Be".to_string(),
            artist: "The Beatles".to_string(),
            correct: true,
            user_answer: Some(UserAnswer {
                artist: "the beatles".to_string(),
                title: "let it be".to_string(),
            }),
        }];

        let json = serde_json::to_string(&result).unwrap();
        let parsed: QuizResult = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.tracks.len(), 1);
        assert!(parsed.tracks[0].correct);
        assert_eq!(parsed.time_range, TimeRange::MediumTerm);
    }
}
