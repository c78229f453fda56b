//! Integration tests for the jsonshape binary

use std::fs::{self, File};
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn run_jsonshape(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_jsonshape"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run jsonshape");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    (stdout, stderr, output.status.success())
}

fn run_with_stdin(args: &[&str], input: &str) -> (String, bool) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jsonshape"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn jsonshape");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        output.status.success(),
    )
}

#[test]
fn test_single_file_report() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let file = input_dir.path().join("profile.json");
    let mut f = File::create(&file).unwrap();
    write!(f, r#"{{"name": "Alice", "langs": ["rust", "go"]}}"#).unwrap();

    let (stdout, stderr, success) = run_jsonshape(&[
        "--file",
        file.to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
    ]);

    assert!(success, "Command should succeed: {}", stderr);
    assert!(stdout.contains("Analyzed profile: 4 fields, max depth 2"));

    let report = fs::read_to_string(output_dir.path().join("profile_analysis.md")).unwrap();
    assert!(report.starts_with("# JSON Structure Report: profile"));
    assert!(report.contains("| 2 | langs[1] | string |"));
}

#[test]
fn test_folder_consistency_report() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::create_dir_all(input_dir.path().join("nested")).unwrap();
    fs::write(input_dir.path().join("a.json"), r#"{"id": 1, "email": "a@x"}"#).unwrap();
    fs::write(input_dir.path().join("b.json"), r#"{"id": "2", "email": "b@x"}"#).unwrap();
    fs::write(input_dir.path().join("nested/c.json"), r#"{"id": 3}"#).unwrap();
    fs::write(input_dir.path().join("readme.txt"), "not json").unwrap();

    let (stdout, stderr, success) = run_jsonshape(&[
        "--folder",
        input_dir.path().to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
        "--recursive",
        "--per-file",
    ]);

    assert!(success, "Command should succeed: {}", stderr);
    assert!(stdout.contains("Found 3 JSON files"), "stdout: {}", stdout);

    let report =
        fs::read_to_string(output_dir.path().join("field_consistency_analysis.md")).unwrap();
    assert!(report.contains("- Files analyzed: 3"));
    assert!(report.contains("| 1 | id | integer, string | no |"));
    assert!(report.contains("| email | 2/3 | nested/c |"));
    assert!(output_dir.path().join("files/nested/c_analysis.md").exists());
}

#[test]
fn test_folder_keeps_going_after_bad_file() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("bad.json"), "{ name: invalid }").unwrap();
    fs::write(input_dir.path().join("good.json"), r#"{"name": "OK"}"#).unwrap();

    let (_, stderr, success) = run_jsonshape(&[
        "--folder",
        input_dir.path().to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
    ]);

    assert!(success);
    assert!(stderr.contains("bad"), "Should report the bad file: {}", stderr);
    let report =
        fs::read_to_string(output_dir.path().join("field_consistency_analysis.md")).unwrap();
    assert!(report.contains("| name | string | yes | all 1 files |"));
    assert!(report.contains("| bad |"));
}

#[test]
fn test_json_format_to_stdout() {
    let input_dir = tempdir().unwrap();
    let file = input_dir.path().join("data.json");
    fs::write(&file, r#"[{"x": 1.25}]"#).unwrap();

    let (stdout, stderr, success) = run_jsonshape(&[
        "--file",
        file.to_str().unwrap(),
        "--format",
        "json",
        "--stdout",
    ]);

    assert!(success, "Command should succeed: {}", stderr);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["structure"]["records"][0]["path"], "$");
    assert_eq!(value["structure"]["records"][2]["type"], "float");
}

#[test]
fn test_stdin_input() {
    let (stdout, success) = run_with_stdin(&["--stdin", "--stdout"], r#"{"a": {"b": null}}"#);
    assert!(success);
    assert!(stdout.contains("# JSON Structure Report: stdin"));
    assert!(stdout.contains("| 2 | a.b | null |"));
}

#[test]
fn test_depth_limit_failure() {
    let input_dir = tempdir().unwrap();
    let file = input_dir.path().join("deep.json");
    fs::write(&file, r#"{"a": {"b": {"c": {"d": 1}}}}"#).unwrap();

    let (_, stderr, success) = run_jsonshape(&[
        "--file",
        file.to_str().unwrap(),
        "--max-depth",
        "3",
        "--stdout",
    ]);

    assert!(!success);
    assert!(stderr.contains("too deep"), "stderr: {}", stderr);
    assert!(stderr.contains("--max-depth"));
    assert_eq!(stderr.matches("too deep").count(), 1, "stderr: {}", stderr);
    assert!(!stderr.contains("Error:"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_file_reports_once() {
    let input_dir = tempdir().unwrap();
    let file = input_dir.path().join("bad.json");
    fs::write(&file, "{ name: invalid }").unwrap();

    let (_, stderr, success) = run_jsonshape(&["--file", file.to_str().unwrap(), "--stdout"]);

    assert!(!success);
    assert_eq!(stderr.matches("JSON parse error").count(), 1, "stderr: {}", stderr);
    assert!(!stderr.contains("Failed to analyze"), "stderr: {}", stderr);
}

#[test]
fn test_nesting_beyond_parser_recursion() {
    let input_dir = tempdir().unwrap();
    let file = input_dir.path().join("deep.json");
    fs::write(&file, format!("{}1{}", "[".repeat(200), "]".repeat(200))).unwrap();

    let (stdout, stderr, success) = run_jsonshape(&[
        "--file",
        file.to_str().unwrap(),
        "--max-depth",
        "500",
        "--stdout",
    ]);
    assert!(success, "Command should succeed: {}", stderr);
    assert!(stdout.contains("- Max depth: 200"), "stdout: {}", stdout);

    let (_, stderr, success) = run_jsonshape(&[
        "--file",
        file.to_str().unwrap(),
        "--max-depth",
        "150",
        "--stdout",
    ]);
    assert!(!success);
    assert!(stderr.contains("depth 151"), "stderr: {}", stderr);
}

#[test]
fn test_same_stem_files_stay_separate() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.json"), r#"{"v": 1}"#).unwrap();
    fs::write(input_dir.path().join("a.JSON"), r#"{"v": "x", "w": {"z": 1}}"#).unwrap();

    let (stdout, stderr, success) = run_jsonshape(&[
        "--folder",
        input_dir.path().to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
        "--per-file",
    ]);

    assert!(success, "Command should succeed: {}", stderr);
    // Case-insensitive filesystems keep only one of the two files
    if stdout.contains("Found 2 JSON files") {
        let report =
            fs::read_to_string(output_dir.path().join("field_consistency_analysis.md")).unwrap();
        assert!(report.contains("| 1 | v | integer, string | no | integer: a.json<br>string: a.JSON |"));
        assert!(report.contains("| w | 1/2 | a.json |"));
        assert!(report.contains("| a.JSON | 2 |"));
        assert!(report.contains("| a.json | 1 |"));
        assert!(output_dir.path().join("files/a.json_analysis.md").exists());
        assert!(output_dir.path().join("files/a.JSON_analysis.md").exists());
    }
}

#[test]
fn test_per_file_report_does_not_replace_consistency_report() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("field_consistency.json"), r#"{"k": 1}"#).unwrap();
    fs::write(input_dir.path().join("other.json"), r#"{"k": 2}"#).unwrap();

    let (_, stderr, success) = run_jsonshape(&[
        "--folder",
        input_dir.path().to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
        "--per-file",
    ]);

    assert!(success, "Command should succeed: {}", stderr);
    let consistency =
        fs::read_to_string(output_dir.path().join("field_consistency_analysis.md")).unwrap();
    assert!(consistency.starts_with("# JSON Field Consistency Report"));
    let per_file = fs::read_to_string(
        output_dir
            .path()
            .join("files/field_consistency_analysis.md"),
    )
    .unwrap();
    assert!(per_file.starts_with("# JSON Structure Report: field_consistency"));
}

#[test]
fn test_empty_folder() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let (stdout, _, success) = run_jsonshape(&[
        "--folder",
        input_dir.path().to_str().unwrap(),
        "--output",
        output_dir.path().to_str().unwrap(),
    ]);

    assert!(success);
    assert!(stdout.contains("No JSON files found"));
    assert!(!output_dir
        .path()
        .join("field_consistency_analysis.md")
        .exists());
}

#[test]
fn test_missing_source_argument() {
    let (_, stderr, success) = run_jsonshape(&[]);
    assert!(!success);
    assert!(!stderr.is_empty());
}
