use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("NON_ALPHANUMERIC is a valid regex pattern"));

/// Typo tolerance for free-text answers, in edit-distance units.
const MAX_EDIT_DISTANCE: usize = 2;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AnswerKey {
    pub artist: String,
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOutcome {
    pub artist_correct: bool,
    pub title_correct: bool,
    pub correct: bool,
}

/// Lowercase, collapse non-alphanumeric runs to single spaces, trim.
/// Accented letters are swallowed by the collapse rather than folded to
/// their base letter; "Beyoncé" normalizes to "beyonc", not "beyonce".
pub fn normalize(s: &str) -> String {
    let lowered = s.trim().to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, " ")
        .trim()
        .to_string()
}

/// Unit-cost Levenshtein distance (insert, delete, substitute).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Typo-tolerant comparison: exact match after normalization, or edit
/// distance at most 2 between the normalized strings.
pub fn is_close(guess: &str, truth: &str) -> bool {
    let guess = normalize(guess);
    let truth = normalize(truth);
    guess == truth || levenshtein(&guess, &truth) <= MAX_EDIT_DISTANCE
}

/// Grade a free-text answer. Both the artist and the title must
/// independently pass the typo-tolerant check; no partial credit.
pub fn grade(guess: &AnswerKey, truth: &AnswerKey) -> GradeOutcome {
    let artist_correct = is_close(&guess.artist, &truth.artist);
    let title_correct = is_close(&guess.title, &truth.title);

    GradeOutcome {
        artist_correct,
        title_correct,
        correct: artist_correct && title_correct,
    }
}
