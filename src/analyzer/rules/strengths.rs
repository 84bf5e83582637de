//! Strengths worth calling out in a submission

use super::predicates::{has_comment, has_four_space_indent, has_function_declaration, has_return};
use crate::Language;

pub const HELPFUL_COMMENTS: &str = "Code includes helpful comments";
pub const USES_FUNCTIONS: &str = "Uses functions for code organization";
pub const RETURNS_VALUES: &str = "Properly returns values";
pub const PYTHON_INDENTATION: &str = "Follows proper Python indentation";
/// Fallback when nothing else fired
pub const CONCISE: &str = "Code is concise";

/// Strengths in fixed check order. Never empty.
pub fn identify(code: &str, language: &Language) -> Vec<String> {
    let mut strengths = Vec::new();

    if has_comment(code) {
        strengths.push(HELPFUL_COMMENTS.to_string());
    }
    if has_function_declaration(code) {
        strengths.push(USES_FUNCTIONS.to_string());
    }
    if has_return(code) {
        strengths.push(RETURNS_VALUES.to_string());
    }
    if *language == Language::Python && has_four_space_indent(code) {
        strengths.push(PYTHON_INDENTATION.to_string());
    }

    if strengths.is_empty() {
        strengths.push(CONCISE.to_string());
    }
    strengths
}
