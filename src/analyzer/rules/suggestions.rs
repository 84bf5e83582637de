//! Improvement suggestions. Every check is independent; all that fire are kept.

use super::predicates::{
    has_comment, has_error_handling, has_four_space_indent, has_function_declaration,
};
use crate::analyzer::metrics::has_line_longer_than;
use crate::Language;

/// Lines longer than this trigger the line-length suggestion
const MAX_LINE_LENGTH: usize = 100;
/// Fewer lines than this trigger the detail suggestion
const MIN_DETAILED_LINES: usize = 5;

pub const ADD_COMMENTS: &str = "Add comments to explain your logic";
pub const MORE_DETAIL: &str = "Consider adding more detailed implementation";
pub const EXTRACT_FUNCTIONS: &str = "Consider breaking code into reusable functions";
pub const CONSISTENT_INDENTATION: &str = "Ensure consistent indentation (4 spaces recommended)";
pub const BREAK_LONG_LINES: &str = "Consider breaking long lines for better readability";
pub const ADD_ERROR_HANDLING: &str = "Consider adding error handling for edge cases";
/// Fallback when nothing else fired
pub const LOOKS_SOLID: &str = "Great work! Code looks solid.";

/// Suggestions in fixed check order. Never empty.
pub fn generate(code: &str, language: &Language, total_lines: usize) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !has_comment(code) {
        suggestions.push(ADD_COMMENTS.to_string());
    }
    if total_lines < MIN_DETAILED_LINES {
        suggestions.push(MORE_DETAIL.to_string());
    }
    if !has_function_declaration(code) {
        suggestions.push(EXTRACT_FUNCTIONS.to_string());
    }
    if *language == Language::Python && !has_four_space_indent(code) {
        suggestions.push(CONSISTENT_INDENTATION.to_string());
    }
    if has_line_longer_than(code, MAX_LINE_LENGTH) {
        suggestions.push(BREAK_LONG_LINES.to_string());
    }
    if !has_error_handling(code) {
        suggestions.push(ADD_ERROR_HANDLING.to_string());
    }

    if suggestions.is_empty() {
        suggestions.push(LOOKS_SOLID.to_string());
    }
    suggestions
}
