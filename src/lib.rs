//! codecritic: heuristic code quality analyzer
//!
//! This library scores a code snippet with token and regular-expression
//! heuristics and produces a report of strengths, suggestions and
//! best-practice observations. Nothing is parsed or executed; every signal is
//! read off the raw text.

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod history;
pub mod mcp;
pub mod reporter;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use analyzer::AnalysisEngine;

/// A piece of code handed to the analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSubmission {
    /// Raw code text
    pub code: String,
    /// Declared language
    pub language: Language,
    /// Challenge title (context only, never scored)
    pub title: Option<String>,
}

impl CodeSubmission {
    pub fn new(code: impl Into<String>, language: &str) -> Self {
        Self {
            code: code.into(),
            language: Language::from_identifier(language),
            title: None,
        }
    }

    /// Attach a challenge title. An empty title is treated as no title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = (!title.is_empty()).then(|| title.to_string());
        self
    }
}

/// Language identifier. Only Python and JavaScript unlock language-specific checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    Python,
    JavaScript,
    /// Any other identifier, stored lowercased
    Other(String),
}

impl Language {
    /// Parse a free-form identifier, case-insensitively. No trimming is applied.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier.to_lowercase().as_str() {
            "python" => Language::Python,
            "javascript" => Language::JavaScript,
            other => Language::Other(other.to_string()),
        }
    }

    /// Infer the language from a file extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("py") => Language::Python,
            Some("js" | "jsx" | "mjs" | "cjs") => Language::JavaScript,
            Some("ts" | "tsx") => Language::Other("typescript".to_string()),
            Some("rs") => Language::Other("rust".to_string()),
            Some("rb") => Language::Other("ruby".to_string()),
            Some("c" | "h") => Language::Other("c".to_string()),
            Some("cpp" | "cc" | "cxx" | "hpp") => Language::Other("cpp".to_string()),
            Some(other) => Language::Other(other.to_string()),
            None => Language::Other("text".to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Other(name) => name,
        }
    }

    /// Python and JavaScript get the structure bonuses in the quality score
    pub fn has_structure_bonus(&self) -> bool {
        matches!(self, Language::Python | Language::JavaScript)
    }
}

impl From<String> for Language {
    fn from(identifier: String) -> Self {
        Language::from_identifier(&identifier)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.as_str().to_string()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complexity tier, driven by the number of control-flow keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Moderate,
    High,
}

impl Complexity {
    pub fn from_indicator_count(count: usize) -> Self {
        match count {
            0 => Complexity::Low,
            1..=3 => Complexity::Moderate,
            _ => Complexity::High,
        }
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Low => write!(f, "low"),
            Complexity::Moderate => write!(f, "moderate"),
            Complexity::High => write!(f, "high"),
        }
    }
}

/// Readability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Readability {
    Excellent,
    Good,
    NeedsImprovement,
}

impl std::fmt::Display for Readability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Readability::Excellent => write!(f, "excellent"),
            Readability::Good => write!(f, "good"),
            Readability::NeedsImprovement => write!(f, "needs improvement"),
        }
    }
}

/// The report produced for one submission.
///
/// Keys serialize in snake_case so a caller can persist the payload as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Quality score (0-100)
    pub quality_score: u8,
    /// Never empty
    pub strengths: Vec<String>,
    /// Never empty
    pub suggestions: Vec<String>,
    pub complexity: Complexity,
    pub readability: Readability,
    /// May be empty
    pub best_practices: Vec<String>,
}

impl AnalysisReport {
    /// Suggestions that ask for a change (the "looks solid" fallback is not one)
    pub fn actionable_suggestions(&self) -> usize {
        self.suggestions
            .iter()
            .filter(|s| s.as_str() != analyzer::rules::suggestions::LOOKS_SOLID)
            .count()
    }
}

/// Counts gathered while analyzing a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStats {
    /// Lines after trimming surrounding whitespace (empty code counts as 1)
    pub total_lines: usize,
    /// Lines with at least one non-whitespace character
    pub non_empty_lines: usize,
    /// Character count of the untrimmed code
    pub characters: usize,
    /// Whole-word for/while/if/elif/else occurrences
    pub complexity_indicators: usize,
}

/// Analysis result for a file on disk (or stdin)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    /// Path to the analyzed file ("-" for stdin)
    pub file_path: PathBuf,
    /// Language the file was analyzed as
    pub language: Language,
    /// Challenge title, when one was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub stats: CodeStats,
    pub report: AnalysisReport,
}

/// Public API: analyze a snippet. Never fails, whatever the input.
pub fn analyze(code: &str, language: &str, title: &str) -> AnalysisReport {
    let submission = CodeSubmission::new(code, language).with_title(title);
    AnalysisEngine::new().analyze(&submission)
}

/// Public API: analyze a single file. Used by the tool server and other programmatic consumers.
///
/// * `path` - path to the code file
/// * `work_dir` - project root (for config lookup)
/// * `config_path` - optional path to .codecriticrc.json; if None, searches from work_dir
pub fn analyze_file(
    path: &Path,
    work_dir: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<FileReport> {
    let config = crate::config::load_config(work_dir, config_path).ok();
    AnalysisEngine::new().analyze_file(path, config.as_ref())
}
