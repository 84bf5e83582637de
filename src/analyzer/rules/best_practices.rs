//! Best-practice observations, language-specific first, then language-agnostic.
//! Unlike strengths and suggestions, the list has no fallback and may be empty.

use super::predicates::{has_conditional_comparison, has_loop};
use crate::analyzer::patterns::global_patterns;
use crate::Language;

pub const SNAKE_CASE_NAMING: &str = "Uses snake_case variable naming";
pub const DOCSTRINGS: &str = "Includes docstrings";
pub const MODERN_SYNTAX: &str = "Uses modern ES6+ syntax";
pub const ARROW_FUNCTIONS: &str = "Uses arrow functions";
pub const CONDITIONAL_LOGIC: &str = "Uses conditional logic";
pub const ITERATIVE_SOLUTIONS: &str = "Implements iterative solutions";

pub fn check(code: &str, language: &Language) -> Vec<String> {
    let patterns = global_patterns();
    let mut practices = Vec::new();

    match language {
        Language::Python => {
            if patterns.snake_case_assignment.is_match(code) {
                practices.push(SNAKE_CASE_NAMING.to_string());
            }
            if patterns.docstring.is_match(code) {
                practices.push(DOCSTRINGS.to_string());
            }
        }
        Language::JavaScript => {
            if patterns.block_scoped_declaration.is_match(code) {
                practices.push(MODERN_SYNTAX.to_string());
            }
            if code.contains("=>") {
                practices.push(ARROW_FUNCTIONS.to_string());
            }
        }
        Language::Other(_) => {}
    }

    if has_conditional_comparison(code) {
        practices.push(CONDITIONAL_LOGIC.to_string());
    }
    if has_loop(code) {
        practices.push(ITERATIVE_SOLUTIONS.to_string());
    }

    practices
}
