//! Quality score calculation

use super::rules::predicates::has_comment;
use crate::Language;

const BASELINE: i32 = 50;
/// Awarded once above each line threshold
const LENGTH_BONUS: i32 = 10;
const FIRST_LENGTH_THRESHOLD: usize = 5;
const SECOND_LENGTH_THRESHOLD: usize = 10;
const FUNCTION_BONUS: i32 = 15;
const LOOP_BONUS: i32 = 10;
const RETURN_BONUS: i32 = 5;
const COMMENT_BONUS: i32 = 10;

/// Calculator for code quality scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Additive score from the baseline, clamped to 0-100.
    ///
    /// The structure bonuses use raw substring checks, so `forever` counts as
    /// a loop and `returned` as a return.
    pub fn calculate(code: &str, language: &Language, total_lines: usize) -> u8 {
        let mut score = BASELINE;

        if total_lines > FIRST_LENGTH_THRESHOLD {
            score += LENGTH_BONUS;
        }
        if total_lines > SECOND_LENGTH_THRESHOLD {
            score += LENGTH_BONUS;
        }

        if language.has_structure_bonus() {
            if code.contains("def ") || code.contains("function ") {
                score += FUNCTION_BONUS;
            }
            if code.contains("for") || code.contains("while") {
                score += LOOP_BONUS;
            }
            if code.contains("return") {
                score += RETURN_BONUS;
            }
        }

        if has_comment(code) {
            score += COMMENT_BONUS;
        }

        score.clamp(0, 100) as u8
    }

    /// Get a description of the score band
    pub fn score_description(score: u8) -> &'static str {
        match score {
            90..=100 => "Excellent - well structured and documented",
            75..=89 => "Good - solid with room for polish",
            60..=74 => "Fair - works but needs more structure",
            _ => "Basic - add structure, comments and error handling",
        }
    }
}
