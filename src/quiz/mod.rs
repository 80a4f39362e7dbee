pub mod generator;
pub mod grader;

pub use generator::{generate_questions, FREE_TEXT_QUESTIONS, MULTIPLE_CHOICE_QUESTIONS};
pub use grader::{grade, is_close, levenshtein, normalize, AnswerKey, GradeOutcome};
