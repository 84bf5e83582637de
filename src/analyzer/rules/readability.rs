//! Readability tier from comment presence and average line length

use super::predicates::has_comment_or_block;
use crate::analyzer::CodeMetrics;
use crate::Readability;

/// Commented code below this average line length reads as excellent
const EXCELLENT_MAX_AVERAGE: f64 = 80.0;
/// Any code below this average line length reads as good
const GOOD_MAX_AVERAGE: f64 = 100.0;

pub fn assess(code: &str, metrics: &CodeMetrics) -> Readability {
    classify(has_comment_or_block(code), metrics.average_line_length())
}

/// The "good" tier does not require comments to be absent: commented code
/// averaging 80-100 characters per line lands there too.
pub fn classify(has_comments: bool, average_line_length: f64) -> Readability {
    if has_comments && average_line_length < EXCELLENT_MAX_AVERAGE {
        Readability::Excellent
    } else if average_line_length < GOOD_MAX_AVERAGE {
        Readability::Good
    } else {
        Readability::NeedsImprovement
    }
}
