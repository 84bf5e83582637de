//! Complexity tier from control-flow keyword density

use crate::analyzer::patterns::global_patterns;
use crate::Complexity;

/// Count whole-word for/while/if/elif/else occurrences
pub fn count_indicators(code: &str) -> usize {
    global_patterns().control_keyword.find_iter(code).count()
}

pub fn assess(code: &str) -> Complexity {
    Complexity::from_indicator_count(count_indicators(code))
}
