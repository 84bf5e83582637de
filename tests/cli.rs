//! CLI behavior tests: exit codes, output formats, stdin, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TWO_SUM: &str = "test-repos/snippets/two_sum.py";
const HELLO: &str = "test-repos/snippets/hello.py";
const SNIPPETS: &str = "test-repos/snippets";

fn codecritic_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_codecritic"));
    cmd.env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("RUST_LOG");
    cmd
}

/// Copy a snippet into a scratch dir so console runs keep cache and history out of the repo
fn scratch_copy(dir: &TempDir, snippet: &str) -> PathBuf {
    let name = Path::new(snippet).file_name().unwrap();
    let dest = dir.path().join(name);
    fs::copy(snippet, &dest).unwrap();
    dest
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    let s = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(s.trim()).expect("valid JSON")
}

#[test]
fn no_args_returns_error_not_panic() {
    let mut cmd = codecritic_cmd();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("<PATH>"));
}

#[test]
fn help_does_not_panic() {
    let mut cmd = codecritic_cmd();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn subcommand_needs_no_path() {
    let mut cmd = codecritic_cmd();
    cmd.args(["init", "--help"]);
    cmd.assert().success();
}

#[test]
fn path_and_stdin_conflict() {
    let mut cmd = codecritic_cmd();
    cmd.arg(HELLO).arg("--stdin");
    cmd.assert().failure().code(2);
}

#[test]
fn below_threshold_exit_1() {
    let mut cmd = codecritic_cmd();
    cmd.arg(HELLO)
        .args(["--threshold", "60", "--json", "--no-cache"]);
    cmd.assert().failure().code(1);
}

#[test]
fn above_threshold_exit_0() {
    let mut cmd = codecritic_cmd();
    cmd.arg(TWO_SUM)
        .args(["--threshold", "90", "--json", "--no-cache"]);
    cmd.assert().success();
}

#[test]
fn below_threshold_console_explains_failure() {
    let dir = TempDir::new().unwrap();
    let file = scratch_copy(&dir, HELLO);
    let mut cmd = codecritic_cmd();
    cmd.arg(&file).args(["--threshold", "75"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Score 50 is below threshold 75"));
}

#[test]
fn nonexistent_path_exit_2() {
    let mut cmd = codecritic_cmd();
    cmd.arg("test-repos/snippets/nope.py").arg("--no-cache");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = TempDir::new().unwrap();
    let mut cmd = codecritic_cmd();
    cmd.arg(dir.path()).arg("--no-cache");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("No code files found"));
}

#[test]
fn json_output_single_file() {
    let mut cmd = codecritic_cmd();
    cmd.arg(TWO_SUM).args(["--json", "--no-cache"]);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["filePath"], TWO_SUM);
    assert_eq!(v["language"], "python");
    assert_eq!(v["stats"]["totalLines"], 8);
    assert_eq!(v["report"]["quality_score"], 100);
    assert_eq!(v["report"]["complexity"], "moderate");
    assert_eq!(v["report"]["readability"], "excellent");
    assert!(v.get("title").is_none());
}

#[test]
fn json_output_includes_title() {
    let mut cmd = codecritic_cmd();
    cmd.arg(TWO_SUM)
        .args(["--json", "--no-cache", "--title", "Two Sum"]);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["title"], "Two Sum");
    assert_eq!(v["report"]["quality_score"], 100);
}

#[test]
fn json_output_directory_summary() {
    let mut cmd = codecritic_cmd();
    cmd.arg(SNIPPETS).args(["--json", "--no-cache"]);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["results"].as_array().unwrap().len(), 7);
    assert_eq!(v["summary"]["filesAnalyzed"], 7);
    assert_eq!(v["summary"]["averageScore"], 77);
    assert_eq!(v["summary"]["totalSuggestions"], 17);
    assert_eq!(v["summary"]["highComplexityFiles"], 1);
}

#[test]
fn parallel_matches_sequential() {
    let mut seq = codecritic_cmd();
    seq.arg(SNIPPETS).args(["--json", "--no-cache"]);
    let mut par = codecritic_cmd();
    par.arg(SNIPPETS)
        .args(["--json", "--no-cache", "--parallel", "--jobs", "2"]);
    assert_eq!(json_stdout(&mut seq), json_stdout(&mut par));
}

#[test]
fn directory_threshold_uses_average() {
    let mut cmd = codecritic_cmd();
    cmd.arg(SNIPPETS)
        .args(["--json", "--no-cache", "--threshold", "78"]);
    cmd.assert().code(1);

    let mut cmd = codecritic_cmd();
    cmd.arg(SNIPPETS)
        .args(["--json", "--no-cache", "--threshold", "77"]);
    cmd.assert().success();
}

#[test]
fn language_flag_overrides_extension() {
    let mut cmd = codecritic_cmd();
    cmd.arg(TWO_SUM)
        .args(["--json", "--no-cache", "--language", "Java"]);
    let v = json_stdout(&mut cmd);
    assert_eq!(v["language"], "java");
    assert_eq!(v["report"]["quality_score"], 70);
}

#[test]
fn stdin_json() {
    let dir = TempDir::new().unwrap();
    let mut cmd = codecritic_cmd();
    cmd.current_dir(dir.path())
        .args(["--stdin", "--json", "--language", "python"])
        .write_stdin(fs::read_to_string(TWO_SUM).unwrap());
    let v = json_stdout(&mut cmd);
    assert_eq!(v["filePath"], "-");
    assert_eq!(v["language"], "python");
    assert_eq!(v["report"]["quality_score"], 100);
}

#[test]
fn stdin_defaults_to_text() {
    let dir = TempDir::new().unwrap();
    let mut cmd = codecritic_cmd();
    cmd.current_dir(dir.path())
        .args(["--stdin", "--json"])
        .write_stdin(fs::read_to_string(TWO_SUM).unwrap());
    let v = json_stdout(&mut cmd);
    assert_eq!(v["language"], "text");
    assert_eq!(v["report"]["quality_score"], 70);
}

#[test]
fn stdin_console_shows_title_and_report() {
    let dir = TempDir::new().unwrap();
    let mut cmd = codecritic_cmd();
    cmd.current_dir(dir.path())
        .args(["--stdin", "--language", "python", "--title", "Hello"])
        .write_stdin("print('hello')");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Challenge: Hello"))
        .stdout(predicate::str::contains("Code is concise"))
        .stdout(predicate::str::contains("Complexity: low | Readability: good"));
}

#[test]
fn stdin_respects_threshold() {
    let dir = TempDir::new().unwrap();
    let mut cmd = codecritic_cmd();
    cmd.current_dir(dir.path())
        .args(["--stdin", "--json", "--threshold", "51"])
        .write_stdin("print('hello')");
    cmd.assert().code(1);
}

#[test]
fn console_report_sections() {
    let dir = TempDir::new().unwrap();
    let file = scratch_copy(&dir, "test-repos/snippets/counter.js");
    let mut cmd = codecritic_cmd();
    cmd.arg(&file).arg("--verbose");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Code Quality Analysis"))
        .stdout(predicate::str::contains("(javascript)"))
        .stdout(predicate::str::contains("Lines: 11 (10 non-empty)"))
        .stdout(predicate::str::contains("Strengths:"))
        .stdout(predicate::str::contains("Suggestions:"))
        .stdout(predicate::str::contains("Best Practices:"))
        .stdout(predicate::str::contains("Uses arrow functions"));
}

#[test]
fn quiet_mode_one_line_and_trend() {
    let dir = TempDir::new().unwrap();
    let file = scratch_copy(&dir, HELLO);

    let mut first = codecritic_cmd();
    first.arg(&file).arg("--quiet");
    first
        .assert()
        .success()
        .stdout(predicate::str::contains("hello.py: 50 (low)"))
        .stdout(predicate::str::contains("[").not());
    assert!(dir.path().join(".codecritic-history.json").exists());
    assert!(dir.path().join(".codecritic-cache.json").exists());

    let mut second = codecritic_cmd();
    second.arg(&file).arg("--quiet");
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("[unchanged at 50]"));
}

#[test]
fn json_mode_writes_no_history() {
    let dir = TempDir::new().unwrap();
    let file = scratch_copy(&dir, HELLO);
    let mut cmd = codecritic_cmd();
    cmd.arg(&file).args(["--json", "--no-cache"]);
    cmd.assert().success();
    assert!(!dir.path().join(".codecritic-history.json").exists());
    assert!(!dir.path().join(".codecritic-cache.json").exists());
}

#[test]
fn cached_run_reports_cache_hits() {
    let dir = TempDir::new().unwrap();
    scratch_copy(&dir, HELLO);
    scratch_copy(&dir, TWO_SUM);

    let mut first = codecritic_cmd();
    first.arg(dir.path()).arg("--json");
    let first_out = json_stdout(&mut first);

    let mut second = codecritic_cmd();
    second.arg(dir.path()).arg("--json");
    second
        .assert()
        .success()
        .stderr(predicate::str::contains("2 files from cache, 0 analyzed"));

    let mut third = codecritic_cmd();
    third.arg(dir.path()).arg("--json");
    assert_eq!(first_out, json_stdout(&mut third));
}

#[test]
fn config_threshold_applies() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".codecriticrc.json"), r#"{ "threshold": 95 }"#).unwrap();
    let two_sum = scratch_copy(&dir, TWO_SUM);
    let hello = scratch_copy(&dir, HELLO);

    let mut pass = codecritic_cmd();
    pass.arg(&two_sum).args(["--json", "--no-cache"]);
    pass.assert().success();

    let mut fail = codecritic_cmd();
    fail.arg(&hello).args(["--json", "--no-cache"]);
    fail.assert().code(1);

    // CLI flag wins over the config file
    let mut flag = codecritic_cmd();
    flag.arg(&hello)
        .args(["--json", "--no-cache", "--threshold", "50"]);
    flag.assert().success();
}

#[test]
fn relative_path_finds_config_in_parent_dir() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(".codecriticrc.json"), r#"{ "threshold": 99 }"#).unwrap();
    let sub = root.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("hello.py"), "print('hello')").unwrap();

    for target in ["hello.py", "."] {
        let mut cmd = codecritic_cmd();
        cmd.current_dir(&sub)
            .arg(target)
            .args(["--json", "--no-cache"]);
        cmd.assert().code(1);
    }

    let mut cmd = codecritic_cmd();
    cmd.current_dir(&sub).arg("hello.py").arg("--quiet");
    cmd.assert().code(1);
    assert!(root.path().join(".codecritic-cache.json").exists());
    assert!(root.path().join(".codecritic-history.json").exists());
    assert!(!sub.join(".codecritic-cache.json").exists());
    assert!(!sub.join(".codecritic-history.json").exists());
}

#[test]
fn invalid_config_exit_2() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".codecriticrc.json"), "{ nope").unwrap();
    let file = scratch_copy(&dir, HELLO);
    let mut cmd = codecritic_cmd();
    cmd.arg(&file).args(["--json", "--no-cache"]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON in config"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    let mut cmd = codecritic_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(dir.path().join(".codecriticrc.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(v["threshold"], 60);
}

#[test]
fn init_with_threshold() {
    let dir = TempDir::new().unwrap();
    let mut cmd = codecritic_cmd();
    cmd.args(["init", "--threshold", "85", "--dir"]).arg(dir.path());
    cmd.assert().success();

    let content = fs::read_to_string(dir.path().join(".codecriticrc.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(v["threshold"], 85);
}

#[test]
fn init_keeps_existing_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".codecriticrc.json"), r#"{ "threshold": 10 }"#).unwrap();
    let mut cmd = codecritic_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    let content = fs::read_to_string(dir.path().join(".codecriticrc.json")).unwrap();
    assert!(content.contains("10"));
}

#[test]
fn mcp_server_answers_over_stdio() {
    let mut cmd = codecritic_cmd();
    cmd.arg("mcp").write_stdin(
        "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"initialize\"}\n\
         {\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n\
         not json\n\
         {\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n",
    );
    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines.len(),
        2,
        "notifications and malformed lines get no reply"
    );
    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["id"], 2);
    assert_eq!(second["result"]["tools"].as_array().unwrap().len(), 2);
}
