//! Integration tests for Read request evaluation and decision logging

use read_guard::{dispatch, AuditLogger, Config, ReadGuard};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

struct Harness {
    dir: TempDir,
    guard: ReadGuard,
    logger: AuditLogger,
}

impl Harness {
    fn new(config: Config) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let logger = AuditLogger::for_project(dir.path());
        Self {
            dir,
            guard: ReadGuard::new(config),
            logger,
        }
    }

    async fn run(&self, json: &str) -> read_guard::HookOutput {
        dispatch::handle(&self.guard, &self.logger, json.as_bytes()).await
    }

    fn log_path(&self) -> std::path::PathBuf {
        self.dir.path().join("logs/tools/Read.jsonl")
    }

    fn log_entries(&self) -> Vec<Value> {
        read_entries(&self.log_path())
    }
}

fn read_entries(path: &Path) -> Vec<Value> {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn read_json(limit: i64) -> String {
    format!(r#"{{"tool_name":"Read","tool_input":{{"file_path":"src/lib.rs","limit":{}}}}}"#, limit)
}

// ============================================================================
// Scenarios with default thresholds (400 + 200)
// ============================================================================

#[tokio::test]
async fn test_small_read_allowed_without_log() {
    let h = Harness::new(Config::default());
    let output = h.run(r#"{"tool_name":"Read","tool_input":{"limit":100}}"#).await;

    assert_eq!(output.exit_code, 0);
    assert!(output.messages.is_empty());
    assert!(!h.log_path().exists());
}

#[tokio::test]
async fn test_tolerance_band_warns_and_logs() {
    let h = Harness::new(Config::default());
    let output = h
        .run(r#"{"tool_name":"Read","tool_input":{"limit":500,"offset":1},"session_id":"s-1"}"#)
        .await;

    assert_eq!(output.exit_code, 1);
    assert!(output.messages[0].contains("500"));
    assert!(output.messages[0].contains("1-500"));

    let entries = h.log_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["enforcement_level"], "warn");
    assert_eq!(entries[0]["exit_code"], 1);
    assert_eq!(entries[0]["limit"], 500);
    assert_eq!(entries[0]["offset"], 1);
    assert_eq!(entries[0]["end_line"], 500);
    assert_eq!(entries[0]["session_id"], "s-1");
    assert_eq!(entries[0]["file_path"], "unknown");
}

#[tokio::test]
async fn test_oversized_read_blocks_and_logs() {
    let h = Harness::new(Config::default());
    let output = h.run(r#"{"tool_name":"Read","tool_input":{"limit":700}}"#).await;

    assert_eq!(output.exit_code, 2);
    assert!(output.messages[0].contains("700"));
    assert!(output.messages[0].contains("600"));

    let entries = h.log_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["enforcement_level"], "block");
    assert_eq!(entries[0]["tool"], "Read");
}

#[tokio::test]
async fn test_other_tool_passes_through() {
    let h = Harness::new(Config::default());
    let output = h.run(r#"{"tool_name":"Write","tool_input":{"limit":9999}}"#).await;

    assert_eq!(output.exit_code, 0);
    assert!(output.messages.is_empty());
    assert!(!h.log_path().exists());
}

// ============================================================================
// Boundaries
// ============================================================================

#[tokio::test]
async fn test_boundaries_resolve_to_lower_band() {
    let h = Harness::new(Config::default());

    assert_eq!(h.run(&read_json(400)).await.exit_code, 0);
    assert_eq!(h.run(&read_json(401)).await.exit_code, 1);
    assert_eq!(h.run(&read_json(600)).await.exit_code, 1);
    assert_eq!(h.run(&read_json(601)).await.exit_code, 2);

    let levels: Vec<Value> = h
        .log_entries()
        .into_iter()
        .map(|e| e["enforcement_level"].clone())
        .collect();
    assert_eq!(levels, vec!["warn", "warn", "block"]);
}

#[tokio::test]
async fn test_missing_or_zero_limit_allowed() {
    let h = Harness::new(Config::default());

    let whole = h.run(r#"{"tool_name":"Read","tool_input":{"file_path":"huge.log"}}"#).await;
    assert_eq!(whole.exit_code, 0);

    let zero = h.run(r#"{"tool_name":"Read","tool_input":{"limit":0,"offset":5000}}"#).await;
    assert_eq!(zero.exit_code, 0);
    assert!(zero.messages.is_empty());
    assert!(h.log_entries().is_empty());
}

#[tokio::test]
async fn test_offset_shifts_reported_range() {
    let h = Harness::new(Config::default());
    let output = h.run(r#"{"tool_name":"Read","tool_input":{"limit":450,"offset":1001}}"#).await;

    assert_eq!(output.exit_code, 1);
    assert!(output.messages[0].contains("(1001-1450)"));
    assert_eq!(h.log_entries()[0]["end_line"], 1450);
}

#[tokio::test]
async fn test_fractional_limits_compare_strictly() {
    let h = Harness::new(Config::default());

    assert_eq!(h.run(r#"{"tool_name":"Read","tool_input":{"limit":400.5}}"#).await.exit_code, 1);
    assert_eq!(h.run(r#"{"tool_name":"Read","tool_input":{"limit":600.5}}"#).await.exit_code, 2);
}

#[tokio::test]
async fn test_numeric_string_limit_is_evaluated() {
    let h = Harness::new(Config::default());
    let output = h.run(r#"{"tool_name":"Read","tool_input":{"limit":"700"}}"#).await;

    assert_eq!(output.exit_code, 2);
    assert_eq!(h.log_entries()[0]["limit"], 700);
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_malformed_json_fails_open() {
    let h = Harness::new(Config::default());
    let output = h.run(r#"{"tool_name":"Read","tool_input":{"limit":700"#).await;

    assert_eq!(output.exit_code, 0);
    assert!(!output.messages.is_empty());
    assert!(!h.log_path().exists());
}

#[tokio::test]
async fn test_array_payload_fails_open() {
    let h = Harness::new(Config::default());
    let output = h.run(r#"["Read",{"limit":700}]"#).await;

    assert_eq!(output.exit_code, 0);
    assert_eq!(output.messages.len(), 1);
    assert!(!h.log_path().exists());
}

#[tokio::test]
async fn test_append_only_across_invocations() {
    let h = Harness::new(Config::default());
    std::fs::create_dir_all(h.log_path().parent().unwrap()).unwrap();
    std::fs::write(h.log_path(), "{\"existing\":true}\n").unwrap();

    h.run(&read_json(700)).await;
    h.run(&read_json(700)).await;

    let content = std::fs::read_to_string(h.log_path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "{\"existing\":true}");
}

// ============================================================================
// Configuration variants
// ============================================================================

#[tokio::test]
async fn test_two_level_configuration_warns_with_zero_exit() {
    let config = Config::default().merge(&serde_json::json!({
        "thresholds": {
            "block": { "exit_code": 2, "message": "Use Grep." },
            "warn": { "exit_code": 0, "message": "Consider a narrower read." }
        }
    }));
    let h = Harness::new(config);

    let output = h.run(&read_json(500)).await;
    assert_eq!(output.exit_code, 0);
    assert!(output.messages[0].contains("Consider a narrower read."));
    assert_eq!(h.log_entries()[0]["exit_code"], 0);

    assert_eq!(h.run(&read_json(700)).await.exit_code, 2);
}

#[tokio::test]
async fn test_custom_limits() {
    let config = Config::default().merge(&serde_json::json!({
        "max_read_lines": 100,
        "tolerance_lines": 50
    }));
    let h = Harness::new(config);

    assert_eq!(h.run(&read_json(100)).await.exit_code, 0);
    assert_eq!(h.run(&read_json(150)).await.exit_code, 1);

    let output = h.run(&read_json(151)).await;
    assert_eq!(output.exit_code, 2);
    assert!(output.messages[0].contains("Maximum: 100 + tolerance: 50 = 150 lines."));
}

#[tokio::test]
async fn test_warn_only_guard_never_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let guard = ReadGuard::new(Config::default()).with_warn_only(true);
    let logger = AuditLogger::for_project(dir.path());

    let output = dispatch::handle(&guard, &logger, read_json(5000).as_bytes()).await;
    assert_eq!(output.exit_code, 1);

    let entries = read_entries(&dir.path().join("logs/tools/Read.jsonl"));
    assert_eq!(entries[0]["enforcement_level"], "warn");
}
