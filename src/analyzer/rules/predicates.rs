//! Boolean predicates over raw code text.
//!
//! Each predicate is independent and pure; the list builders in the sibling
//! modules compose them in a fixed order.

use crate::analyzer::patterns::global_patterns;

/// `#`/`//` line comment or a one-line triple-quoted string
pub fn has_comment(code: &str) -> bool {
    global_patterns().comment.is_match(code)
}

/// [`has_comment`] extended with one-line `/* ... */` block comments
pub fn has_comment_or_block(code: &str) -> bool {
    global_patterns().comment_or_block.is_match(code)
}

/// `def name(` or `function name(`
pub fn has_function_declaration(code: &str) -> bool {
    global_patterns().function_declaration.is_match(code)
}

pub fn has_return(code: &str) -> bool {
    global_patterns().return_keyword.is_match(code)
}

/// Some line begins with four whitespace characters
pub fn has_four_space_indent(code: &str) -> bool {
    global_patterns().four_space_indent.is_match(code)
}

/// A `try` keyword followed anywhere later by an `except` keyword
pub fn has_error_handling(code: &str) -> bool {
    global_patterns().try_except.is_match(code)
}

pub fn has_loop(code: &str) -> bool {
    global_patterns().loop_keyword.is_match(code)
}

/// `if` followed by an identifier and a comparison operator
pub fn has_conditional_comparison(code: &str) -> bool {
    global_patterns().conditional_comparison.is_match(code)
}
