use serde::{Deserialize, Serialize};

/// Transient multiple-choice question; never persisted. The wire field
/// names match what the quiz page consumes.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub preview_url: String,
    pub correct_answer_id: String,
    pub options: Vec<QuizOption>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizOption {
    pub id: String,
    pub name: String,
    pub artist: String,
}
