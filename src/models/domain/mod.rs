pub mod quiz_question;
pub mod quiz_result;
pub mod user;

pub use quiz_question::{QuizOption, QuizQuestion};
pub use quiz_result::{QuizResult, TrackResult, UserAnswer};
pub use user::User;
