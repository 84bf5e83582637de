//! Shared pattern library for the heuristics.
//!
//! Every regular expression is compiled once per process and reused by all
//! analyses (see [`global_patterns`]). `Regex` is `Sync`, so concurrent
//! analyses share one set without locking.
//!
//! Several patterns are deliberately loose and match only single-line spans:
//! `""".*"""` and `/\*.*\*/` never see a docstring or block comment that
//! spans lines, and `#` anywhere on a line (including inside a string) counts
//! as a comment. Scores depend on that exact behavior.
//!
//! `\s` in these patterns also covers the information separators
//! U+001C..=U+001F, which the submission front end treats as whitespace.

use regex::Regex;
use std::sync::OnceLock;

/// Compiled patterns, one field per heuristic
pub struct Patterns {
    /// `#` or `//` line comment, or a one-line triple-quoted string
    pub comment: Regex,
    /// `comment` plus one-line C-style block comments (readability only)
    pub comment_or_block: Regex,
    /// Whole-word for/while/if/elif/else
    pub control_keyword: Regex,
    /// `def name(` or `function name(`
    pub function_declaration: Regex,
    /// Whole-word `return`
    pub return_keyword: Regex,
    /// Line starting with four whitespace characters
    pub four_space_indent: Regex,
    /// `try` followed anywhere later by `except`, across lines
    pub try_except: Regex,
    /// Line starting with a lowercase identifier assignment
    pub snake_case_assignment: Regex,
    /// Line starting with a triple-quoted string, possibly multi-line
    pub docstring: Regex,
    /// Whole-word `const` or `let`
    pub block_scoped_declaration: Regex,
    /// `if name <op>` comparison
    pub conditional_comparison: Regex,
    /// Whole-word for/while
    pub loop_keyword: Regex,
}

/// Whitespace class used wherever a pattern says `\s`
const SPACE_CLASS: &str = r"[\s\x1C-\x1F]";

/// Compile `pattern` with every `\s` widened to [`SPACE_CLASS`]
fn spaced(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&pattern.replace(r"\s", SPACE_CLASS))
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            comment: Regex::new(r#"#.*|//.*|""".*""""#)?,
            comment_or_block: Regex::new(r#"#.*|//.*|/\*.*\*/|""".*""""#)?,
            control_keyword: Regex::new(r"\b(?:for|while|if|elif|else)\b")?,
            function_declaration: spaced(r"\bdef\s+\w+\(|function\s+\w+\(")?,
            return_keyword: Regex::new(r"\breturn\b")?,
            four_space_indent: spaced(r"(?m)^\s{4}")?,
            try_except: Regex::new(r"(?s)\btry\b.*\bexcept\b")?,
            snake_case_assignment: spaced(r"(?m)^[a-z_][a-z0-9_]*\s*=")?,
            docstring: spaced(r#"(?ms)^\s*""".*?""""#)?,
            block_scoped_declaration: Regex::new(r"\bconst\b|\blet\b")?,
            conditional_comparison: spaced(r"\bif\s+\w+\s*(?:==|!=|>|<|>=|<=)")?,
            loop_keyword: Regex::new(r"\b(?:for|while)\b")?,
        })
    }
}

/// Global pattern set (compile once per process).
pub fn global_patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns::compile().expect("built-in patterns are valid"))
}
