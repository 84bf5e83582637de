//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{Complexity, FileReport, Readability};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Print a single file report
    pub fn report(&self, result: &FileReport) {
        print!("{}", self.render(result));
    }

    /// Print multiple reports followed by a summary
    pub fn report_many(&self, results: &[FileReport], stats: &AggregateStats) {
        for result in results {
            self.report(result);
            println!("{}", "─".repeat(60));
        }
        print!("{}", self.render_summary(stats));
    }

    /// Print one line per file: path, score, complexity, and an optional trend delta
    pub fn report_quiet(&self, result: &FileReport, delta: &str) {
        println!("{}", self.render_quiet(result, delta));
    }

    pub fn render_quiet(&self, result: &FileReport, delta: &str) -> String {
        format!(
            "{}: {} ({}){}",
            result.file_path.display(),
            self.paint_score(result.report.quality_score, result.report.quality_score.to_string()),
            self.paint_complexity(result.report.complexity),
            delta
        )
    }

    /// Render the full report for one file
    pub fn render(&self, result: &FileReport) -> String {
        let mut out = String::new();
        self.render_header(&mut out, result);
        self.render_score(&mut out, result);
        self.render_list(&mut out, "Strengths:", &result.report.strengths, "✓".green());
        self.render_list(
            &mut out,
            "Suggestions:",
            &result.report.suggestions,
            "→".cyan(),
        );
        if !result.report.best_practices.is_empty() {
            self.render_list(
                &mut out,
                "Best Practices:",
                &result.report.best_practices,
                "•".blue(),
            );
        } else if self.verbose {
            let _ = writeln!(out, "   {}", self.paint("No best practices detected".dimmed()));
            let _ = writeln!(out);
        }
        out
    }

    fn render_header(&self, out: &mut String, result: &FileReport) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            self.paint(
                format!(
                    "📊 Code Quality Analysis: {} ({})",
                    result.file_path.display(),
                    result.language
                )
                .bold()
            )
        );
        if let Some(ref title) = result.title {
            let _ = writeln!(out, "   Challenge: {}", title);
        }
        if self.verbose {
            let _ = writeln!(
                out,
                "   Lines: {} ({} non-empty) | Characters: {} | Control keywords: {}",
                result.stats.total_lines,
                result.stats.non_empty_lines,
                result.stats.characters,
                result.stats.complexity_indicators
            );
        }
        let _ = writeln!(out);
    }

    fn render_score(&self, out: &mut String, result: &FileReport) {
        let score = result.report.quality_score;
        let _ = writeln!(out, "   Score: {}", self.create_score_bar(score));
        let _ = writeln!(
            out,
            "   {}",
            self.paint(ScoreCalculator::score_description(score).dimmed())
        );
        let _ = writeln!(
            out,
            "   Complexity: {} | Readability: {}",
            self.paint_complexity(result.report.complexity),
            self.paint_readability(result.report.readability)
        );
        let _ = writeln!(out);
    }

    fn render_list(&self, out: &mut String, heading: &str, items: &[String], icon: ColoredString) {
        let _ = writeln!(out, "   {}", self.paint(heading.bold()));
        let icon = self.paint(icon);
        for item in items {
            let _ = writeln!(out, "   {} {}", icon, item);
        }
        let _ = writeln!(out);
    }

    /// Render the batch summary
    pub fn render_summary(&self, stats: &AggregateStats) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(out, "{}", self.paint("Summary".bold()));
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(
            out,
            "   Files analyzed:        {}",
            self.paint(stats.files_analyzed.to_string().bold())
        );
        let _ = writeln!(
            out,
            "   Average score:         {}",
            self.paint_score(stats.average_score, stats.average_score.to_string())
        );
        let _ = writeln!(out, "   Total suggestions:     {}", stats.total_suggestions);
        let _ = writeln!(out, "   High complexity files: {}", stats.high_complexity_files);
        let _ = writeln!(out);
        out
    }

    fn paint(&self, s: ColoredString) -> String {
        if self.use_colors {
            s.to_string()
        } else {
            s.clear().to_string()
        }
    }

    fn paint_score(&self, score: u8, text: String) -> String {
        let colored = if score >= 80 {
            text.green()
        } else if score >= 60 {
            text.yellow()
        } else {
            text.red()
        };
        self.paint(colored)
    }

    fn paint_complexity(&self, complexity: Complexity) -> String {
        let s = complexity.to_string();
        self.paint(match complexity {
            Complexity::Low => s.green(),
            Complexity::Moderate => s.yellow(),
            Complexity::High => s.red(),
        })
    }

    fn paint_readability(&self, readability: Readability) -> String {
        let s = readability.to_string();
        self.paint(match readability {
            Readability::Excellent => s.green().bold(),
            Readability::Good => s.green(),
            Readability::NeedsImprovement => s.red(),
        })
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);
        self.paint_score(score, bar)
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalysisEngine;
    use std::path::Path;

    fn make_result(path: &str, code: &str) -> FileReport {
        AnalysisEngine::new().analyze_source(code, Path::new(path), None)
    }

    #[test]
    fn test_render_contains_sections() {
        let result = make_result("hello.py", "print('hello')");
        let out = ConsoleReporter::new().without_colors().render(&result);

        assert!(out.contains("Code Quality Analysis: hello.py (python)"));
        assert!(out.contains("[██████████░░░░░░░░░░]  50%"));
        assert!(out.contains("Complexity: low | Readability: good"));
        assert!(out.contains("Strengths:"));
        assert!(out.contains("✓ Code is concise"));
        assert!(out.contains("→ Add comments to explain your logic"));
        assert!(!out.contains("Best Practices:"));
        assert!(!out.contains("Lines:"));
    }

    #[test]
    fn test_render_verbose_shows_stats() {
        let result = make_result("hello.py", "print('hello')");
        let out = ConsoleReporter::new().without_colors().verbose().render(&result);
        assert!(out.contains("Lines: 1 (1 non-empty) | Characters: 14 | Control keywords: 0"));
        assert!(out.contains("No best practices detected"));
    }

    #[test]
    fn test_render_title_and_best_practices() {
        let result = AnalysisEngine::new().with_title("Loop").analyze_source(
            "for x in xs:\n    print(x)",
            Path::new("loop.py"),
            None,
        );
        let out = ConsoleReporter::new().without_colors().render(&result);
        assert!(out.contains("Challenge: Loop"));
        assert!(out.contains("• Implements iterative solutions"));
    }

    #[test]
    fn test_render_quiet() {
        let result = make_result("hello.py", "print('hello')");
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(reporter.render_quiet(&result, ""), "hello.py: 50 (low)");
        assert_eq!(
            reporter.render_quiet(&result, " [was 40, up 10]"),
            "hello.py: 50 (low) [was 40, up 10]"
        );
    }

    #[test]
    fn test_render_summary() {
        let stats = AggregateStats {
            files_analyzed: 3,
            average_score: 72,
            total_suggestions: 9,
            high_complexity_files: 1,
        };
        let out = ConsoleReporter::new().without_colors().render_summary(&stats);
        assert!(out.contains("Files analyzed:        3"));
        assert!(out.contains("Average score:         72"));
        assert!(out.contains("Total suggestions:     9"));
        assert!(out.contains("High complexity files: 1"));
    }
}
