//! Config schema and deserialization

use crate::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default file-name suffixes picked up when walking a directory
pub const DEFAULT_FILE_PATTERNS: &[&str] = &[
    ".py", ".js", ".jsx", ".mjs", ".cjs", ".java", ".ts", ".tsx", ".go", ".rs", ".rb", ".c",
    ".cpp",
];

/// Per-path override configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Optional threshold override for matched files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Optional language for matched files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Root config structure for .codecriticrc.json
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Minimum score threshold (exit 1 if below). Default: 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Analyze every file as this language instead of detecting it from the extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// File-name suffixes to analyze (default: common source extensions)
    #[serde(default)]
    pub file_patterns: Vec<String>,

    /// Per-path configuration overrides
    #[serde(default)]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>, cli_language: Option<&str>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if let Some(language) = cli_language {
            self.language = Some(language.to_string());
        }
        self
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            threshold: self.threshold,
            language: self.language.as_deref().map(Language::from_identifier),
        };

        // Apply matching overrides in order
        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(threshold) = override_cfg.threshold {
                    effective.threshold = Some(threshold);
                }
                if let Some(ref language) = override_cfg.language {
                    effective.language = Some(Language::from_identifier(language));
                }
            }
        }

        effective
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        for pattern in patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(file_path)
                    || path_str.contains(pattern.trim_start_matches("**/"))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.language.is_none() {
            self.language = base.language;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.file_patterns.is_empty() {
            self.file_patterns = base.file_patterns;
        }

        // Prepend base overrides
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Get file-name suffixes to analyze
    pub fn get_file_patterns(&self) -> Vec<&str> {
        if self.file_patterns.is_empty() {
            DEFAULT_FILE_PATTERNS.to_vec()
        } else {
            self.file_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    /// True if the file name ends with one of the configured suffixes
    pub fn matches_file_pattern(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.get_file_patterns().iter().any(|p| name.ends_with(p))
    }

    /// Config written by `codecritic init`
    pub fn starter() -> Self {
        Self {
            threshold: Some(60),
            ignore: vec!["**/vendor/**".to_string(), "**/dist/**".to_string()],
            ..Self::default()
        }
    }
}

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub threshold: Option<u8>,
    pub language: Option<Language>,
}
