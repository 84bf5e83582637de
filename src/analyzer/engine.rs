//! Analysis engine - runs every heuristic over a submission

use crate::config::Config;
use crate::{AnalysisReport, CodeStats, CodeSubmission, Complexity, FileReport, Language};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::rules::{best_practices, complexity, readability, strengths, suggestions};
use super::{CodeMetrics, ScoreCalculator};

/// Main analysis engine
pub struct AnalysisEngine {
    /// Forced language for every file (CLI `--language`)
    language_override: Option<Language>,
    /// Challenge title attached to file reports
    title: Option<String>,
}

impl AnalysisEngine {
    /// Create a new analysis engine
    pub fn new() -> Self {
        Self {
            language_override: None,
            title: None,
        }
    }

    /// Analyze every file as `language`, ignoring extensions and config
    pub fn with_language(mut self, language: Language) -> Self {
        self.language_override = Some(language);
        self
    }

    /// Attach a challenge title to file reports. An empty title is ignored.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = (!title.is_empty()).then(|| title.to_string());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Analyze one submission. Total: any string in any language yields a report.
    pub fn analyze(&self, submission: &CodeSubmission) -> AnalysisReport {
        let (_, report) = Self::evaluate(submission);

        tracing::debug!(
            language = %submission.language,
            title = ?submission.title,
            score = report.quality_score,
            "analyzed submission"
        );
        report
    }

    /// Measure the code and run every heuristic over it
    fn evaluate(submission: &CodeSubmission) -> (CodeStats, AnalysisReport) {
        let code = submission.code.as_str();
        let language = &submission.language;
        let metrics = CodeMetrics::measure(code);
        let indicators = complexity::count_indicators(code);

        let report = AnalysisReport {
            quality_score: ScoreCalculator::calculate(code, language, metrics.total_lines),
            strengths: strengths::identify(code, language),
            suggestions: suggestions::generate(code, language, metrics.total_lines),
            complexity: Complexity::from_indicator_count(indicators),
            readability: readability::assess(code, &metrics),
            best_practices: best_practices::check(code, language),
        };
        let stats = CodeStats {
            total_lines: metrics.total_lines,
            non_empty_lines: metrics.non_empty_lines,
            characters: metrics.characters,
            complexity_indicators: indicators,
        };
        (stats, report)
    }

    /// Language for a file: engine override, then config, then extension
    pub fn resolve_language(&self, path: &Path, config: Option<&Config>) -> Language {
        if let Some(ref language) = self.language_override {
            return language.clone();
        }
        if let Some(language) = config.and_then(|c| c.effective_for_file(path).language) {
            return language;
        }
        Language::from_path(path)
    }

    /// Analyze code from a string (e.g. stdin or in-memory content).
    /// `virtual_path` drives language detection and config overrides.
    pub fn analyze_source(
        &self,
        code: &str,
        virtual_path: &Path,
        config: Option<&Config>,
    ) -> FileReport {
        let submission = CodeSubmission {
            code: code.to_string(),
            language: self.resolve_language(virtual_path, config),
            title: self.title.clone(),
        };
        let (stats, report) = Self::evaluate(&submission);

        tracing::debug!(
            file = %virtual_path.display(),
            language = %submission.language,
            score = report.quality_score,
            "analyzed file"
        );

        FileReport {
            file_path: virtual_path.to_path_buf(),
            language: submission.language,
            title: submission.title,
            stats,
            report,
        }
    }

    /// Read a file and analyze it
    pub fn analyze_file(&self, path: &Path, config: Option<&Config>) -> Result<FileReport> {
        let code = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(self.analyze_source(&code, path, config))
    }

    /// Analyze multiple files sequentially
    pub fn analyze_many(&self, paths: &[&Path], config: Option<&Config>) -> Vec<Result<FileReport>> {
        paths.iter().map(|p| self.analyze_file(p, config)).collect()
    }

    /// Analyze multiple files in parallel using rayon
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<FileReport>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze_file(p, config)).collect()
    }

    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[FileReport]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats::default();
        }

        let total_score: u32 = results.iter().map(|r| r.report.quality_score as u32).sum();
        let average_score = (total_score / results.len() as u32) as u8;

        let total_suggestions = results
            .iter()
            .map(|r| r.report.actionable_suggestions())
            .sum();
        let high_complexity_files = results
            .iter()
            .filter(|r| r.report.complexity == Complexity::High)
            .count();

        AggregateStats {
            files_analyzed: results.len(),
            average_score,
            total_suggestions,
            high_complexity_files,
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics from multiple file analyses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of files analyzed
    pub files_analyzed: usize,
    /// Integer mean of the quality scores
    pub average_score: u8,
    /// Suggestions across all files, not counting the "looks solid" fallback
    pub total_suggestions: usize,
    /// Files assessed as high complexity
    pub high_complexity_files: usize,
}
