use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{QuizOption, QuizQuestion},
    spotify::Track,
};

/// Question counts per quiz mode.
pub const MULTIPLE_CHOICE_QUESTIONS: usize = 10;
pub const FREE_TEXT_QUESTIONS: usize = 3;
const DISTRACTORS_PER_QUESTION: usize = 3;

/// Build `count` multiple-choice questions from a pool of preview-bearing
/// tracks. Pure over the pool and the supplied random source, so tests can
/// seed the rng and assert exact orderings.
///
/// The pool is shuffled uniformly (Fisher-Yates); the first `count` tracks
/// become the correct answers, each padded with 3 distractors drawn without
/// replacement from the rest of the shuffled pool. The 4-option set is
/// shuffled again so the correct answer carries no positional bias.
pub fn generate_questions<R: Rng + ?Sized>(
    pool: &[Track],
    count: usize,
    rng: &mut R,
) -> AppResult<Vec<QuizQuestion>> {
    let mut playable: Vec<&Track> = pool.iter().filter(|t| t.preview_url.is_some()).collect();

    // Every question needs its correct track plus 3 distinct distractors, so
    // even a small question count requires at least 4 playable tracks.
    if playable.len() < count.max(DISTRACTORS_PER_QUESTION + 1) {
        return Err(AppError::BadRequest(
            "Not enough playable top tracks to generate a quiz.".to_string(),
        ));
    }

    playable.shuffle(rng);

    let questions = playable[..count]
        .iter()
        .map(|correct| {
            let mut options: Vec<QuizOption> = playable
                .iter()
                .filter(|t| t.id != correct.id)
                .take(DISTRACTORS_PER_QUESTION)
                .map(|t| option_for(t))
                .collect();
            options.push(option_for(correct));
            options.shuffle(rng);

            QuizQuestion {
                // playable is pre-filtered on preview_url above
                preview_url: correct.preview_url.clone().unwrap_or_default(),
                correct_answer_id: correct.id.clone(),
                options,
            }
        })
        .collect();

    Ok(questions)
}

fn option_for(track: &Track) -> QuizOption {
    QuizOption {
        id: track.id.clone(),
        name: track.name.clone(),
        artist: track.artist_names(),
    }
}
