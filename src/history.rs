//! Trend tracking - persist scores to .codecritic-history.json

use crate::FileReport;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const HISTORY_FILENAME: &str = ".codecritic-history.json";
const MAX_RUNS: usize = 50;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub runs: Vec<HistoryRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRun {
    /// RFC 3339, UTC
    pub timestamp: String,
    pub files: HashMap<String, FileScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileScore {
    pub score: u8,
    pub suggestions: usize,
}

/// Load history from project root. A missing or corrupt file yields an empty history.
pub fn load_history(project_root: &Path) -> HistoryFile {
    let path = project_root.join(HISTORY_FILENAME);
    let Ok(content) = fs::read_to_string(&path) else {
        return HistoryFile::default();
    };
    match serde_json::from_str::<HistoryFile>(&content) {
        Ok(history) => history,
        Err(e) => {
            tracing::warn!(history = %path.display(), error = %e, "ignoring unreadable history");
            HistoryFile::default()
        }
    }
}

/// Save history to project root
pub fn save_history(project_root: &Path, history: &HistoryFile) -> Result<()> {
    let path = project_root.join(HISTORY_FILENAME);
    let content = serde_json::to_string_pretty(history).context("Failed to serialize history")?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write history to {}", path.display()))
}

/// Get the previous score for a file from the latest run
pub fn previous_score(history: &HistoryFile, file_path: &Path) -> Option<u8> {
    let run = history.runs.last()?;
    let key = file_path.to_string_lossy().to_string();
    run.files.get(&key).map(|f| f.score)
}

/// Build a new run from file reports and append it, keeping the latest runs only
pub fn append_run(history: &mut HistoryFile, results: &[FileReport]) {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let files = results
        .iter()
        .map(|r| {
            (
                r.file_path.to_string_lossy().to_string(),
                FileScore {
                    score: r.report.quality_score,
                    suggestions: r.report.actionable_suggestions(),
                },
            )
        })
        .collect();
    history.runs.push(HistoryRun { timestamp, files });
    if history.runs.len() > MAX_RUNS {
        history.runs.drain(0..history.runs.len() - MAX_RUNS);
    }
}

/// Format delta for console: "[was 82, down 4]" or "[was 82, up 2]" or ""
pub fn format_delta(previous: Option<u8>, current: u8) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    if prev == current {
        return format!(" [unchanged at {}]", current);
    }
    let diff = current as i16 - prev as i16;
    if diff > 0 {
        format!(" [was {}, up {}]", prev, diff)
    } else {
        format!(" [was {}, down {}]", prev, -diff)
    }
}
