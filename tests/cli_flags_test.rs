//! CLI contract tests
//!
//! Runs the actual binary to verify the evaluate subcommand's flags,
//! output formats, and exit codes.

use std::path::Path;
use std::process::Command;

const DIFF: &str = "\
diff --git a/lorem.rb b/lorem.rb
index 70714bc..f0253cf 100644
--- a/lorem.rb
+++ b/lorem.rb
@@ -1,2 +1,4 @@
 kept
-removed
+# a comment
+added one
+added two
";

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("change.diff");
    std::fs::write(&path, DIFF).unwrap();
    path
}

fn run(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_diffsize"))
        .args(args)
        .output()
        .expect("failed to run diffsize");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_evaluate_reads_a_diff_file() {
    let dir = tempfile::tempdir().unwrap();
    let diff = write_fixture(dir.path());

    let (code, stdout, _) = run(&["evaluate", "--diff", diff.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("score:"), "stdout was: {stdout}");
    assert!(stdout.contains("extra small"));
}

#[test]
fn test_json_format_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    let diff = write_fixture(dir.path());

    let (code, stdout, _) = run(&[
        "evaluate",
        "--diff",
        diff.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // additions 3, deletions 1, comments 1, whitespace 0
    assert_eq!(json["result"], 3.0);
    assert_eq!(json["substitutions"]["additions"], 3.0);
}

#[test]
fn test_invalid_formula_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let diff = write_fixture(dir.path());
    let config = dir.path().join("config.yaml");
    std::fs::write(
        &config,
        "scoring:\n  formula: \"+ additions entropy\"\n",
    )
    .unwrap();

    let (code, _, stderr) = run(&[
        "evaluate",
        "--diff",
        diff.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(code, 1);
    assert!(
        stderr.contains("invalid token at position 3: entropy"),
        "stderr was: {stderr}"
    );
}

#[test]
fn test_custom_configuration_changes_the_formula() {
    let dir = tempfile::tempdir().unwrap();
    let diff = write_fixture(dir.path());
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "scoring:\n  formula: \"deletions\"\n").unwrap();

    let (code, stdout, _) = run(&[
        "evaluate",
        "--diff",
        diff.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["result"], 1.0);
}

#[test]
fn test_missing_diff_file_is_an_error() {
    let (code, _, stderr) = run(&["evaluate", "--diff", "/no/such/file.diff"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("failed to read diff"));
}
