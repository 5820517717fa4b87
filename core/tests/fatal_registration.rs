//! `add_*` registration errors terminate the process.
//!
//! Each test re-runs this test binary filtered to itself with
//! `CMD_PARSER_CHILD` set; the child performs the failing registration.

use std::process::{Command, Output};

use cmd_parser_core::{CmdParser, OptionDef};

const CHILD_ENV: &str = "CMD_PARSER_CHILD";

fn in_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

fn rerun(test_name: &str) -> Output {
    Command::new(std::env::current_exe().expect("test binary path"))
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("failed to re-run test binary")
}

#[test]
fn duplicate_flag_name_exits_one() {
    if in_child() {
        let mut parser = CmdParser::new();
        parser.add_flag(("--verbose", "-v"), "").add_flag(("--version", "-v"), "");
        return;
    }

    let output = rerun("duplicate_flag_name_exits_one");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cmd-parser error: -v already exists"), "unexpected stderr: {stderr}");
}

#[test]
fn option_clashing_with_flag_exits_one() {
    if in_child() {
        let mut parser = CmdParser::new();
        parser
            .add_flag("--len", "")
            .add_option_def(OptionDef::<i32>::new(("--len", "-l")));
        return;
    }

    let output = rerun("option_clashing_with_flag_exits_one");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cmd-parser error: --len already exists"), "unexpected stderr: {stderr}");
}

#[test]
fn invalid_name_exits_one() {
    if in_child() {
        let mut parser = CmdParser::new();
        parser.add_option::<String>("--far_too_long_name", "", false);
        return;
    }

    let output = rerun("invalid_name_exits_one");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cmd-parser error: invalid long name: --far_too_long_name"),
        "unexpected stderr: {stderr}"
    );
}
