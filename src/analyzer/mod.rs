//! Analyzer module - heuristic code quality analysis engine

pub mod engine;
pub mod metrics;
pub mod patterns;
pub mod rules;
pub mod scoring;

pub use engine::{AggregateStats, AnalysisEngine};
pub use metrics::CodeMetrics;
pub use scoring::ScoreCalculator;
