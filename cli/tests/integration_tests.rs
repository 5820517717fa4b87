use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn argprobe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argprobe"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run argprobe")
}

fn write_definition(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write definition");
    path
}

/// Definition modelled on a small compression tool.
fn demo_definition(dir: &TempDir) -> PathBuf {
    write_definition(
        dir,
        "demo.yaml",
        r#"program: demo
flags:
  - long: --gzip
    short: -g
    description: use gzip
  - long: --verbose
    short: -v
  - long: --help
    short: -h
    usage: true
  - long: --quit
    exit_code: 3
options:
  - long: --len
    short: -l
    type: i32
    description: length
    default: "10"
    min: 0
  - long: --scale
    type: f64
    description: scale factor
    required: true
"#,
    )
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_reports_flags_values_and_rest() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let output = argprobe(&[
        "parse",
        "--definition",
        path_arg(&def),
        "--",
        "-gv",
        "--len",
        "5",
        "--scale=2.5",
        "input.txt",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report = stdout_json(&output);
    assert_eq!(report["ok"], true);
    assert_eq!(report["outcome"], "complete");
    assert_eq!(report["flags"][0]["name"], "--gzip");
    assert_eq!(report["flags"][0]["count"], 1);
    assert_eq!(report["flags"][1]["count"], 1);
    assert_eq!(report["options"][0]["values"], serde_json::json!(["10", "5"]));
    assert_eq!(report["options"][1]["values"], serde_json::json!(["2.5"]));
    assert_eq!(report["rest"], serde_json::json!(["input.txt"]));
}

#[test]
fn parse_failure_exits_nonzero_with_report() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let output = argprobe(&["parse", "--definition", path_arg(&def), "--", "-g"]);
    assert_eq!(output.status.code(), Some(1));

    let report = stdout_json(&output);
    assert_eq!(report["ok"], false);
    assert_eq!(report["error"], "missing required option: --scale");
    assert_eq!(report["flags"][0]["count"], 1);
}

#[test]
fn parse_rejects_value_outside_bounds() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let output = argprobe(&[
        "parse",
        "--definition",
        path_arg(&def),
        "--",
        "--scale",
        "1",
        "-l-4",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_json(&output)["error"],
        "failed to set option with value: -l, --len = -4"
    );
}

#[test]
fn parse_reports_help_and_exit_outcomes() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let help = argprobe(&["parse", "--definition", path_arg(&def), "--", "-h"]);
    assert!(help.status.success());
    let report = stdout_json(&help);
    assert_eq!(report["outcome"], "help");
    assert_eq!(report["exit_code"], 0);

    let quit = argprobe(&["parse", "--definition", path_arg(&def), "--", "--quit", "-g"]);
    assert!(quit.status.success());
    let report = stdout_json(&quit);
    assert_eq!(report["outcome"], "exit");
    assert_eq!(report["exit_code"], 3);
    // Tokens after the exiting flag are never processed.
    assert_eq!(report["flags"][0]["count"], 0);
}

#[test]
fn parse_strict_flag_disables_expansion() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let output = argprobe(&[
        "parse",
        "--definition",
        path_arg(&def),
        "--strict",
        "--",
        "--scale",
        "1",
        "-gv",
    ]);
    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["rest"], serde_json::json!(["-gv"]));
    assert_eq!(report["flags"][0]["count"], 0);
}

#[test]
fn parse_yaml_output() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let output = argprobe(&[
        "parse",
        "--definition",
        path_arg(&def),
        "--format",
        "yaml",
        "--",
        "--scale",
        "1",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok: true"), "unexpected output: {stdout}");
    assert!(stdout.contains("outcome: complete"));
}

#[test]
fn parse_json_definition() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(
        &dir,
        "tool.json",
        r#"{"options": [{"long": "--mode", "short": "-m", "choices": ["fast", "slow"]}]}"#,
    );

    let ok = argprobe(&["parse", "--definition", path_arg(&def), "--", "-mfast"]);
    assert!(ok.status.success());
    assert_eq!(stdout_json(&ok)["options"][0]["values"], serde_json::json!(["fast"]));

    let bad = argprobe(&["parse", "--definition", path_arg(&def), "--", "-m", "medium"]);
    assert_eq!(bad.status.code(), Some(1));
}

// ---------------------------------------------------------------------------
// usage
// ---------------------------------------------------------------------------

#[test]
fn usage_prints_sections() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let output = argprobe(&["usage", "--definition", path_arg(&def)]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("usage: demo --scale=f64 ...\n"), "unexpected output: {stdout}");
    assert!(stdout.contains(" @required options:\n"));
    assert!(stdout.contains(" @options:\n"));
    assert!(stdout.contains("-l, --len"));
    assert!(stdout.contains("length (i32 [=10])"));
    assert!(stdout.contains(" @flags:\n"));
    assert!(stdout.contains("-g, --gzip"));
}

#[test]
fn usage_names_program_after_file() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(&dir, "mytool.yaml", "flags:\n  - long: --dry\n");

    let output = argprobe(&["usage", "--definition", path_arg(&def)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("usage: mytool ...\n"), "unexpected output: {stdout}");
    assert!(stdout.contains(" @flags:\n   --dry"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_good_definition() {
    let dir = TempDir::new().unwrap();
    let def = demo_definition(&dir);

    let output = argprobe(&["validate", "--definition", path_arg(&def)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 flag(s) and 2 option(s)"), "unexpected output: {stdout}");
}

#[test]
fn validate_reports_duplicate_names() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(
        &dir,
        "dup.yaml",
        "flags:\n  - long: --all\n    short: -a\noptions:\n  - long: --after\n    short: -a\n",
    );

    let output = argprobe(&["validate", "--definition", path_arg(&def)]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-a already exists"), "unexpected stderr: {stderr}");
}

#[test]
fn validate_reports_bad_names() {
    let dir = TempDir::new().unwrap();
    let def = write_definition(&dir, "bad.yaml", "flags:\n  - long: --much_too_long\n");

    let output = argprobe(&["validate", "--definition", path_arg(&def)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--much_too_long"));
}

#[test]
fn missing_definition_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.yaml");

    let output = argprobe(&["validate", "--definition", path_arg(&missing)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load definition"));
}
