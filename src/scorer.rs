//! Pronunciation similarity scoring
//!
//! Scores compare the comparison forms of two phoneme sequences with a
//! character-level Levenshtein distance. Multi-character symbols such as
//! `oʊ` are compared per character, not as a single token.

use tracing::trace;

use crate::phoneme::PhonemeSequence;

/// Default score a result must exceed to count as a successful cast
pub const DEFAULT_SUCCESS_THRESHOLD: f64 = 10.0;

/// Lowest possible score
pub const MIN_SCORE: f64 = 0.0;

/// Highest possible score
pub const MAX_SCORE: f64 = 100.0;

/// Similarity scorer with a success threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    success_threshold: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(DEFAULT_SUCCESS_THRESHOLD)
    }
}

impl Scorer {
    pub fn new(success_threshold: f64) -> Self {
        Self { success_threshold }
    }

    pub fn success_threshold(&self) -> f64 {
        self.success_threshold
    }

    /// Unrounded similarity in `[0, 100]`
    pub fn score(&self, user: &PhonemeSequence, target: &PhonemeSequence) -> f64 {
        similarity(user, target)
    }

    /// Whether an unrounded score passes (strictly above the threshold)
    pub fn is_success(&self, score: f64) -> bool {
        score > self.success_threshold
    }
}

/// Similarity between two phoneme sequences in `[0, 100]`.
///
/// Empty inputs, and inputs that are empty once whitespace is removed, score
/// zero without running a comparison.
pub fn similarity(user: &PhonemeSequence, target: &PhonemeSequence) -> f64 {
    if user.is_empty() || target.is_empty() {
        return MIN_SCORE;
    }

    let user_form = user.comparison_form();
    let target_form = target.comparison_form();
    if user_form.is_empty() || target_form.is_empty() {
        return MIN_SCORE;
    }

    let max_len = user_form.chars().count().max(target_form.chars().count());
    debug_assert!(max_len > 0);
    if max_len == 0 {
        return MIN_SCORE;
    }

    // strsim compares by char, so `oʊ` costs two edits and `ɒ` one
    let distance = strsim::levenshtein(&user_form, &target_form);
    let score = (1.0 - distance as f64 / max_len as f64) * MAX_SCORE;
    debug_assert!(
        (MIN_SCORE..=MAX_SCORE).contains(&score),
        "score {score} out of range (distance {distance}, max length {max_len})"
    );

    trace!(distance, max_len, score, "Scored phoneme sequences");
    score
}

/// Round a score to one decimal place for reporting.
///
/// Exact halves round to even, so 6.25 reports as 6.2 and 18.75 as 18.8.
pub fn round_score(score: f64) -> f64 {
    (score * 10.0).round_ties_even() / 10.0
}
