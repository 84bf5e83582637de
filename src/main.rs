//! codecritic: Heuristic Code Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codecritic::analyzer::AnalysisEngine;
use codecritic::cache::AnalysisCache;
use codecritic::config::{
    absolute_dir, build_ignore_set, find_project_root, is_ignored, load_config,
    write_default_config, Config, CONFIG_FILENAME,
};
use codecritic::history::{append_run, format_delta, load_history, previous_score, save_history};
use codecritic::reporter::{ConsoleReporter, JsonReporter};
use codecritic::{FileReport, Language};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

/// Directories never descended into when collecting files
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "target", "__pycache__"];

/// Above this many files, analysis runs in parallel even without --parallel
const PARALLEL_FILE_COUNT: usize = 10;

/// codecritic: heuristic code quality feedback for code submissions
#[derive(Parser, Debug)]
#[command(name = "codecritic")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Code file or directory to analyze (omit when using --stdin or a subcommand)
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    path: Option<PathBuf>,

    /// Read code from standard input
    #[arg(long)]
    stdin: bool,

    /// Language identifier (default: detect from file extension, `text` for stdin)
    #[arg(long, short)]
    language: Option<String>,

    /// Challenge title shown alongside the report
    #[arg(long)]
    title: Option<String>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score threshold (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (one line per file)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .codecriticrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable caching (re-analyze all files even if unchanged)
    #[arg(long)]
    no_cache: bool,

    /// Clear the analysis cache before running
    #[arg(long)]
    clear_cache: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the stdio JSON-RPC tool server
    Mcp,

    /// Create .codecriticrc.json with sensible defaults
    Init {
        /// Minimum score threshold (default: 60)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// Diagnostics go to stderr, filtered by RUST_LOG (warnings by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = &args.command {
        return match cmd {
            Commands::Mcp => codecritic::mcp::run_mcp_server().map(|_| ExitCode::SUCCESS),
            Commands::Init { threshold, dir } => run_init(*threshold, dir.as_deref()),
        };
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    if args.stdin {
        return run_stdin(&args);
    }

    let path = args
        .path
        .clone()
        .context("A path is required unless --stdin or a subcommand is used")?;

    // Resolve work directory for config search; relative paths have no parents to walk
    let work_dir = absolute_dir(if path.is_file() {
        path.parent().unwrap_or(Path::new("."))
    } else {
        path.as_path()
    });
    let work_dir = work_dir.as_path();

    // Load config (CLI flags override config file)
    let config = load_config(work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.language.as_deref());

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let files = collect_files(&path, ignore_set.as_ref(), &config)?;
    if files.is_empty() {
        eprintln!("{}: No code files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }
    tracing::info!(files = files.len(), path = %path.display(), "collected files");

    let project_root = find_project_root(work_dir).unwrap_or_else(|| work_dir.to_path_buf());
    let mut cache = if args.no_cache {
        AnalysisCache::disabled()
    } else {
        AnalysisCache::new(&project_root)
    };

    if args.clear_cache {
        cache.clear();
        if !args.quiet {
            eprintln!("{}: Cache cleared", "Info".blue());
        }
    }

    let engine = build_engine(&args);
    let use_parallel = args.parallel || files.len() > PARALLEL_FILE_COUNT;

    let (results, had_errors) = if use_parallel && !args.no_cache {
        analyze_files_parallel_cached(&engine, &files, &config, &mut cache, args.quiet)
    } else if use_parallel {
        analyze_files_parallel(&engine, &files, &config, args.quiet)
    } else {
        analyze_files_sequential_cached(&engine, &files, &config, &mut cache, args.quiet)
    };

    cache.prune_missing();
    if let Err(e) = cache.save() {
        if !args.quiet {
            eprintln!("{}: Failed to save cache: {:#}", "Warning".yellow(), e);
        }
    }

    if results.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&results);
    tracing::info!(
        files = stats.files_analyzed,
        average = stats.average_score,
        "analysis complete"
    );

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if results.len() == 1 {
            println!("{}", reporter.report(&results[0]));
        } else {
            println!("{}", reporter.report_with_summary(&results, &stats));
        }
    } else {
        let history = load_history(&project_root);
        let reporter = console_reporter(&args);
        if args.quiet {
            for result in &results {
                let delta = format_delta(
                    previous_score(&history, &result.file_path),
                    result.report.quality_score,
                );
                reporter.report_quiet(result, &delta);
            }
        } else if results.len() == 1 {
            reporter.report(&results[0]);
        } else {
            reporter.report_many(&results, &stats);
        }

        // Persist trend history
        let mut history = history;
        append_run(&mut history, &results);
        if let Err(e) = save_history(&project_root, &history) {
            tracing::warn!(error = %e, "failed to save history");
        }
    }

    // Threshold applies to the single file's score or the batch average
    let score = if results.len() == 1 {
        results[0].report.quality_score
    } else {
        stats.average_score
    };
    let threshold = if results.len() == 1 {
        config.effective_for_file(&results[0].file_path).threshold
    } else {
        config.threshold
    };
    if check_threshold(score, threshold, args.quiet || args.json) {
        return Ok(ExitCode::from(1));
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Analyze code piped on stdin. Never cached; nothing to key it on.
fn run_stdin(args: &Args) -> Result<ExitCode> {
    let mut code = String::new();
    std::io::stdin()
        .read_to_string(&mut code)
        .context("Failed to read code from stdin")?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.language.as_deref());

    let result = build_engine(args).analyze_source(&code, Path::new("-"), Some(&config));

    if args.json {
        println!("{}", JsonReporter::new().pretty().report(&result));
    } else if args.quiet {
        console_reporter(args).report_quiet(&result, "");
    } else {
        console_reporter(args).report(&result);
    }

    if check_threshold(
        result.report.quality_score,
        config.threshold,
        args.quiet || args.json,
    ) {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn build_engine(args: &Args) -> AnalysisEngine {
    let mut engine = AnalysisEngine::new();
    if let Some(ref language) = args.language {
        engine = engine.with_language(Language::from_identifier(language));
    } else if args.stdin {
        engine = engine.with_language(Language::Other("text".to_string()));
    }
    if let Some(ref title) = args.title {
        engine = engine.with_title(title);
    }
    engine
}

fn console_reporter(args: &Args) -> ConsoleReporter {
    let reporter = ConsoleReporter::new();
    if args.verbose {
        reporter.verbose()
    } else {
        reporter
    }
}

/// True if the score falls below the threshold
fn check_threshold(score: u8, threshold: Option<u8>, silent: bool) -> bool {
    let Some(threshold) = threshold else {
        return false;
    };
    if score >= threshold {
        return false;
    }
    if !silent {
        eprintln!(
            "\n{}: Score {} is below threshold {}",
            "Failed".red().bold(),
            score,
            threshold
        );
    }
    true
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);

    if dir.join(CONFIG_FILENAME).exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            dir.join(CONFIG_FILENAME).display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let config_path = write_default_config(dir, threshold)?;
    println!(
        "{}: Created {}",
        "Done".green().bold(),
        config_path.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn collect_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    config: &Config,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e.path()))
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || !config.matches_file_pattern(file_path) {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(file_path, set) {
                tracing::debug!(file = %file_path.display(), "ignored by config");
                continue;
            }
        }
        files.push(file_path.to_path_buf());
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| SKIPPED_DIRS.contains(&name))
        .unwrap_or(false)
        && path.is_dir()
}

fn report_failure(file: &Path, e: &anyhow::Error, quiet: bool) {
    tracing::warn!(file = %file.display(), error = %e, "analysis failed");
    if !quiet {
        eprintln!(
            "{}: Failed to analyze {}: {:#}",
            "Error".red(),
            file.display(),
            e
        );
    }
}

/// Analyze files sequentially with caching
fn analyze_files_sequential_cached(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    cache: &mut AnalysisCache,
    quiet: bool,
) -> (Vec<FileReport>, bool) {
    let mut results = Vec::new();
    let mut had_errors = false;
    let mut cache_hits = 0;

    for file in files {
        let content = match std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read file: {}", file.display()))
        {
            Ok(content) => content,
            Err(e) => {
                report_failure(file, &e, quiet);
                had_errors = true;
                continue;
            }
        };

        let language = engine.resolve_language(file, Some(config));
        if let Some(mut cached) = cache.get(file, &content, &language) {
            cached.title = engine.title().map(str::to_string);
            results.push(cached);
            cache_hits += 1;
            continue;
        }

        let result = engine.analyze_source(&content, file, Some(config));
        cache.set(file, &content, result.clone());
        results.push(result);
    }

    if !quiet && cache_hits > 0 {
        eprintln!(
            "{}: {} files from cache, {} analyzed",
            "Cache".blue(),
            cache_hits,
            results.len() - cache_hits
        );
    }

    (results, had_errors)
}

/// Analyze files in parallel without caching
fn analyze_files_parallel(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    quiet: bool,
) -> (Vec<FileReport>, bool) {
    let mut had_errors = false;
    let results = engine
        .analyze_parallel(files, Some(config))
        .into_iter()
        .zip(files)
        .filter_map(|(result, file)| match result {
            Ok(result) => Some(result),
            Err(e) => {
                report_failure(file, &e, quiet);
                had_errors = true;
                None
            }
        })
        .collect();

    (results, had_errors)
}

/// Analyze files in parallel, reading the cache concurrently and filling it afterwards
fn analyze_files_parallel_cached(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    cache: &mut AnalysisCache,
    quiet: bool,
) -> (Vec<FileReport>, bool) {
    use rayon::prelude::*;

    enum Outcome {
        Cached(FileReport),
        Fresh(FileReport, String),
        Failed(anyhow::Error),
    }

    let outcomes: Vec<Outcome> = {
        let cache = &*cache;
        files
            .par_iter()
            .map(|file| {
                let content = match std::fs::read_to_string(file)
                    .with_context(|| format!("Failed to read file: {}", file.display()))
                {
                    Ok(content) => content,
                    Err(e) => return Outcome::Failed(e),
                };
                let language = engine.resolve_language(file, Some(config));
                match cache.get(file, &content, &language) {
                    Some(cached) => Outcome::Cached(cached),
                    None => Outcome::Fresh(engine.analyze_source(&content, file, Some(config)), content),
                }
            })
            .collect()
    };

    let mut results = Vec::with_capacity(files.len());
    let mut had_errors = false;
    let mut cache_hits = 0;
    for (outcome, file) in outcomes.into_iter().zip(files) {
        match outcome {
            Outcome::Cached(mut result) => {
                result.title = engine.title().map(str::to_string);
                cache_hits += 1;
                results.push(result);
            }
            Outcome::Fresh(result, content) => {
                cache.set(file, &content, result.clone());
                results.push(result);
            }
            Outcome::Failed(e) => {
                report_failure(file, &e, quiet);
                had_errors = true;
            }
        }
    }

    if !quiet && cache_hits > 0 {
        eprintln!(
            "{}: {} files from cache, {} analyzed",
            "Cache".blue(),
            cache_hits,
            results.len() - cache_hits
        );
    }

    (results, had_errors)
}
