use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cbk_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("cbk");
    path
}

const DATASET: &str = r#"{
  "macros": [
    {"id": 1, "name": "A"},
    {"id": 2, "name": "Empty Area"}
  ],
  "codes": [
    {"id": 10, "key": "FOO", "name": "Foo Bar", "macro_id": 1},
    {"id": 11, "key": "QUX", "name": "Quux", "macro_id": 1},
    {"id": 12, "key": "LOST", "name": "Lost macro", "macro_id": 9}
  ],
  "items": [
    {"code_id": 10, "type": "definition", "text": "d1", "order": 2},
    {"code_id": 10, "type": "definition", "text": "d0", "order": 1},
    {"code_id": 10, "type": "border_rule", "text": "use QUX when in doubt"},
    {"code_id": 11, "type": "definition", "text": "A rather long definition that will not fit"},
    {"code_id": 77, "type": "example", "text": "orphan"}
  ]
}"#;

fn setup_test_env(dataset: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(data_dir.join("codebook.json"), dataset).unwrap();

    let config_content = format!(
        r#"[dataset]
path = "{}/data/codebook.json"

[preview]
definition_chars = 20
rule_chars = 10
"#,
        root.display()
    );

    let config_path = config_dir.join("codebook.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_cbk(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = cbk_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run cbk binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_macros_lists_counts() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, stderr, success) = run_cbk(&config_path, &["macros"]);
    assert!(success, "macros failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("All areas"));
    assert!(stdout.contains("Empty Area"));
    let a_line = stdout.lines().find(|l| l.ends_with("  A")).unwrap();
    assert!(a_line.contains(" 2 "), "unexpected row: {}", a_line);
}

#[test]
fn test_list_all() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, success) = run_cbk(&config_path, &["list"]);
    assert!(success);
    assert!(stdout.starts_with("Codebook Explorer\n3 entities"));
    let foo = stdout.find("[10] Foo Bar").unwrap();
    let quux = stdout.find("[11] Quux").unwrap();
    let lost = stdout.find("[12] Lost macro").unwrap();
    assert!(foo < quux && quux < lost, "order not preserved: {}", stdout);
}

#[test]
fn test_list_previews_use_configured_budget() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, _) = run_cbk(&config_path, &["list", "--search", "foo"]);
    assert!(stdout.contains("def:  d0"));
    assert!(stdout.contains("rule: use QUX wh…"));
    assert!(stdout.contains("tags: Definition, Rule"));

    let (stdout, _, _) = run_cbk(&config_path, &["list", "--search", "quux"]);
    assert!(stdout.contains("def:  A rather long defini…"));
    assert!(!stdout.contains("rule:"));

    let (stdout, _, _) = run_cbk(&config_path, &["list", "--search", "lost"]);
    // The placeholder is subject to the same budget.
    assert!(stdout.contains("def:  No definition loaded…"));
}

#[test]
fn test_list_search_matches_key_case_insensitively() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, success) = run_cbk(&config_path, &["list", "--search", "  qux "]);
    assert!(success);
    assert!(stdout.contains("1 entity"));
    assert!(stdout.contains("[11] Quux"));
}

#[test]
fn test_list_no_results_is_not_an_error() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, success) = run_cbk(&config_path, &["list", "--search", "zzz"]);
    assert!(success);
    assert!(stdout.contains("0 entities"));

    let (stdout, _, success) = run_cbk(&config_path, &["list", "--macro", "2"]);
    assert!(success);
    assert!(stdout.starts_with("Empty Area\n0 entities"));
}

#[test]
fn test_list_unknown_macro() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, success) = run_cbk(&config_path, &["list", "--macro", "42"]);
    assert!(success);
    assert!(stdout.starts_with("Macro not found\n0 entities"));
}

#[test]
fn test_list_json() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, success) = run_cbk(&config_path, &["list", "--macro", "1", "--json"]);
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["title"], "A");
    assert_eq!(value["count"], 2);
    assert_eq!(value["view"]["macro_id"], 1);
    assert_eq!(value["codes"][0]["key"], "FOO");
    assert_eq!(value["codes"][0]["definition"], "d0");
    assert!(value["codes"][1].get("rule").is_none());
    assert_eq!(value["codes"][1]["tags"], serde_json::json!(["Definition"]));
}

#[test]
fn test_show_orders_items() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, stderr, success) = run_cbk(&config_path, &["show", "10"]);
    assert!(success, "show failed: {}", stderr);
    assert!(stdout.contains("macro:  A"));
    assert!(stdout.contains("--- Items (3) ---"));
    let d0 = stdout.find("d0").unwrap();
    let d1 = stdout.find("d1").unwrap();
    let rule = stdout.find("[Border Rule]").unwrap();
    assert!(d0 < d1 && d1 < rule);
}

#[test]
fn test_show_unresolved_macro_placeholder() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, success) = run_cbk(&config_path, &["show", "12", "--json"]);
    assert!(success);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["macro_name"], "—");
    assert_eq!(value["items"].as_array().unwrap().len(), 0);
}

#[test]
fn test_show_unknown_code_fails() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (_, stderr, success) = run_cbk(&config_path, &["show", "404"]);
    assert!(!success);
    assert!(stderr.contains("code not found: 404"));
}

#[test]
fn test_stats() {
    let (_tmp, config_path) = setup_test_env(DATASET);
    let (stdout, _, success) = run_cbk(&config_path, &["stats"]);
    assert!(success);
    assert!(stdout.contains("Macros:      2"));
    assert!(stdout.contains("Codes:       3"));
    assert!(stdout.contains("Items:       5"));
    assert!(stdout.contains("Dangling macro refs:   1"));
    assert!(stdout.contains("Orphan items:          1"));
    assert!(stdout.contains("code 77: orphan"));
    assert!(stdout.contains("SHA-256:"));
}

#[test]
fn test_empty_macros_reports_load_failure() {
    let dataset = r#"{"macros": [], "codes": [{"id": 1, "key": "K", "name": "N", "macro_id": 1}], "items": []}"#;
    let (_tmp, config_path) = setup_test_env(dataset);
    let (stdout, stderr, success) = run_cbk(&config_path, &["list"]);
    assert!(!success);
    assert!(stdout.is_empty(), "normal view printed: {}", stdout);
    assert!(stderr.contains("could not load codebook"));
}

#[test]
fn test_missing_dataset_reports_load_failure() {
    let (tmp, config_path) = setup_test_env(DATASET);
    let missing = tmp.path().join("nowhere.json");
    let (_, stderr, success) = run_cbk(
        &config_path,
        &["--dataset", missing.to_str().unwrap(), "macros"],
    );
    assert!(!success);
    assert!(stderr.contains("could not load codebook"));
    assert!(stderr.contains("nowhere.json"));
}

#[test]
fn test_malformed_document_reports_load_failure() {
    let (_tmp, config_path) = setup_test_env("[\"not\", \"an\", \"object\"]");
    let (_, stderr, success) = run_cbk(&config_path, &["stats"]);
    assert!(!success);
    assert!(stderr.contains("could not load codebook"));
    assert!(stderr.contains("document root is not an object"));
}

#[test]
fn test_completions_need_no_dataset() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("absent.toml");
    let (stdout, _, success) = run_cbk(&config_path, &["completions", "bash"]);
    assert!(success);
    assert!(stdout.contains("cbk"));
}
