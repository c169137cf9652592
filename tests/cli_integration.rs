//! Integration tests for the `nebula` CLI.
//!
//! Each test creates a temp data directory and a config with the remote
//! import disabled, runs `nebula` as a subprocess, and verifies stdout
//! and/or the persisted documents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde_json::Value;

/// Get the path to the built `nebula` binary.
fn nebula_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("nebula");
    path
}

/// Write a config that keeps the tests offline and opens links with `true`.
fn create_test_env(root: &Path) -> PathBuf {
    let config = root.join("config.toml");
    fs::write(
        &config,
        r#"[remote]
enabled = false

[ui]
opener = "true"
"#,
    )
    .unwrap();
    config
}

fn base_command(root: &Path, args: &[&str]) -> Command {
    let config = root.join("config.toml");
    let data = root.join("data");
    let mut cmd = Command::new(nebula_bin());
    cmd.arg("--config")
        .arg(config)
        .arg("--data-dir")
        .arg(data)
        .args(args)
        .env("HOME", root)
        .env_remove("NEBULA_LOG");
    cmd
}

/// Run `nebula` in the given environment, return (stdout, stderr, success).
fn run_nebula(root: &Path, args: &[&str]) -> (String, String, bool) {
    let output = base_command(root, args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run nebula");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `nebula` expecting success, return stdout.
fn run_nebula_ok(root: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_nebula(root, args);
    if !success {
        panic!(
            "nebula {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `nebula` feeding `input` on stdin.
fn run_nebula_with_input(root: &Path, args: &[&str], input: &str) -> (String, bool) {
    let mut child = base_command(root, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run nebula");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        output.status.success(),
    )
}

fn list_json(root: &Path, extra: &[&str]) -> Vec<Value> {
    let mut args = vec!["list", "--json"];
    args.extend_from_slice(extra);
    let out = run_nebula_ok(root, &args);
    serde_json::from_str::<Vec<Value>>(&out).unwrap()
}

fn setup() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_env(tmp.path());
    tmp
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_list_fresh_store_shows_seed_links() {
    let tmp = setup();
    let out = run_nebula_ok(tmp.path(), &["list"]);
    assert!(out.contains("GitHub"));
    assert!(out.contains("Google Gemini"));
    assert_eq!(out.lines().count(), 7);
}

#[test]
fn test_list_by_category() {
    let tmp = setup();
    let links = list_json(tmp.path(), &["--category", "dev"]);
    let titles: Vec<&str> = links.iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["GitHub", "Stack Overflow"]);
    assert_eq!(links[0]["category_name"], "开发");

    let all = list_json(tmp.path(), &["--category", "all"]);
    assert_eq!(all.len(), 7);
}

#[test]
fn test_list_search_is_case_insensitive() {
    let tmp = setup();
    let links = list_json(tmp.path(), &["--search", "GITHUB"]);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["id"], "1");

    // Descriptions are searched too
    let links = list_json(tmp.path(), &["--search", "设计"]);
    let titles: Vec<&str> = links.iter().map(|l| l["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Figma", "Dribbble"]);
}

#[test]
fn test_list_no_match() {
    let tmp = setup();
    let out = run_nebula_ok(tmp.path(), &["list", "--search", "nothing-like-this"]);
    assert_eq!(out.trim(), "未找到链接");
}

#[test]
fn test_categories() {
    let tmp = setup();
    let out = run_nebula_ok(tmp.path(), &["categories"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("dev"));
    assert!(lines[0].ends_with("开发 (2)"));
}

#[test]
fn test_list_does_not_write() {
    let tmp = setup();
    run_nebula_ok(tmp.path(), &["list"]);
    assert!(!tmp.path().join("data/nebula_links.json").exists());
}

#[test]
fn test_corrupt_document_falls_back_to_seed() {
    let tmp = setup();
    fs::create_dir_all(tmp.path().join("data")).unwrap();
    fs::write(tmp.path().join("data/nebula_links.json"), "{not json").unwrap();
    let links = list_json(tmp.path(), &[]);
    assert_eq!(links.len(), 7);
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_add_with_https_prefix() {
    let tmp = setup();
    let id = run_nebula_ok(tmp.path(), &["add", "Example", "example.com", "--https"]);
    let id = id.trim();
    assert!(!id.is_empty());

    let links = list_json(tmp.path(), &["--search", "example"]);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["id"], id);
    assert_eq!(links[0]["url"], "https://example.com");
    assert_eq!(links[0]["icon"], "🔗");
    assert_eq!(links[0]["description"], "用户添加的链接");
    assert_eq!(links[0]["category"], "other");
    assert_eq!(links[0]["visits"], 0);
}

#[test]
fn test_add_keeps_url_verbatim_without_flag() {
    let tmp = setup();
    run_nebula_ok(tmp.path(), &["add", "Local", "localhost:3000"]);
    let links = list_json(tmp.path(), &["--search", "local"]);
    assert_eq!(links[0]["url"], "localhost:3000");
}

#[test]
fn test_add_creates_category() {
    let tmp = setup();
    run_nebula_ok(tmp.path(), &["add", "Tool", "https://tool.io", "--category", "tools"]);
    let out = run_nebula_ok(tmp.path(), &["categories", "--json"]);
    let cats: Vec<Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(cats.len(), 6);
    assert_eq!(cats[5]["id"], "tools");
    assert_eq!(cats[5]["name"], "Tools");
    assert_eq!(cats[5]["links"], 1);

    // Persisted as documents in the data dir
    let raw = fs::read_to_string(tmp.path().join("data/nebula_categories.json")).unwrap();
    let stored: Vec<Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored.len(), 6);
}

#[test]
fn test_add_rejects_blank_title() {
    let tmp = setup();
    let (_, stderr, success) = run_nebula(tmp.path(), &["add", "  ", "https://a.io"]);
    assert!(!success);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_add_rejects_blank_url_with_https() {
    let tmp = setup();
    let (_, stderr, success) = run_nebula(tmp.path(), &["add", "T", "  ", "--https"]);
    assert!(!success);
    assert!(stderr.contains("url must not be empty"));
    assert!(!tmp.path().join("data/nebula_links.json").exists());
    assert_eq!(list_json(tmp.path(), &[]).len(), 7);
}

#[test]
fn test_list_whitespace_search_is_literal() {
    let tmp = setup();
    let links = list_json(tmp.path(), &["--search", " "]);
    assert!(links.len() < 7);
    assert!(links.iter().all(|l| l["title"] != "GitHub"));
}

#[test]
fn test_delete_with_yes() {
    let tmp = setup();
    let out = run_nebula_ok(tmp.path(), &["delete", "3", "--yes"]);
    assert!(out.contains("removed 3 Figma"));
    let links = list_json(tmp.path(), &[]);
    assert_eq!(links.len(), 6);
    assert!(links.iter().all(|l| l["id"] != "3"));
}

#[test]
fn test_delete_declined_keeps_link() {
    let tmp = setup();
    let (out, success) = run_nebula_with_input(tmp.path(), &["delete", "3"], "n\n");
    assert!(success);
    assert!(out.contains("cancelled"));
    assert_eq!(list_json(tmp.path(), &[]).len(), 7);
}

#[test]
fn test_delete_confirmed_on_stdin() {
    let tmp = setup();
    let (_, success) = run_nebula_with_input(tmp.path(), &["delete", "3"], "y\n");
    assert!(success);
    assert_eq!(list_json(tmp.path(), &[]).len(), 6);
}

#[test]
fn test_delete_unknown_id_fails() {
    let tmp = setup();
    let (_, stderr, success) = run_nebula(tmp.path(), &["delete", "nope", "--yes"]);
    assert!(!success);
    assert!(stderr.contains("no link with id nope"));
}

#[test]
fn test_open_counts_visit_after_countdown() {
    let tmp = setup();
    let start = std::time::Instant::now();
    let out = run_nebula_ok(tmp.path(), &["open", "1", "--yes", "--json"]);
    assert!(start.elapsed() >= std::time::Duration::from_secs(3));

    let opened: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(opened["id"], "1");
    assert_eq!(opened["url"], "https://github.com");
    assert_eq!(opened["visits"], 121);

    let links = list_json(tmp.path(), &["--search", "github"]);
    assert_eq!(links[0]["visits"], 121);
}

#[test]
fn test_open_unknown_id_fails() {
    let tmp = setup();
    let (_, stderr, success) = run_nebula(tmp.path(), &["open", "missing", "--yes"]);
    assert!(!success);
    assert!(stderr.contains("error: no link with id missing"));
}

#[test]
fn test_sync_disabled_is_an_error() {
    let tmp = setup();
    let (_, stderr, success) = run_nebula(tmp.path(), &["sync"]);
    assert!(!success);
    assert!(stderr.contains("remote import is disabled"));
}

#[test]
fn test_broken_config_warns_and_uses_defaults() {
    let tmp = setup();
    fs::write(tmp.path().join("config.toml"), "[remote\nenabled = ").unwrap();
    let (stdout, stderr, success) = run_nebula(tmp.path(), &["list"]);
    assert!(success);
    assert!(stderr.contains("warning:"));
    assert!(stdout.contains("GitHub"));
}
