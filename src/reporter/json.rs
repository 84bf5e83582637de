//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::FileReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single file as JSON
    pub fn report(&self, result: &FileReport) -> String {
        self.to_json(result, "{}")
    }

    /// Report multiple files as a JSON array
    pub fn report_many(&self, results: &[FileReport]) -> String {
        self.to_json(results, "[]")
    }

    /// Report multiple files with the aggregate summary
    pub fn report_with_summary(&self, results: &[FileReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results,
            summary: stats,
        };
        self.to_json(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [FileReport],
    summary: &'a AggregateStats,
}
