// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::host::{Host, ToolError};
use std::io::Write;

/// Minimal scriptable tool: `echo` prints its arguments, `fail` writes to
/// stderr and exits with the given code.
struct ScriptTool;

impl Tool for ScriptTool {
    fn run(&mut self, host: &mut dyn Host) -> Result<(), ToolError> {
        let args = host.args().to_vec();
        match args.first().map(String::as_str) {
            Some("echo") => {
                let mut out = host.stdout();
                writeln!(out, "{}", args[1..].join(" ")).map_err(anyhow::Error::from)?;
                Ok(())
            }
            Some("fail") => {
                let code = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(1);
                let mut err = host.stderr();
                writeln!(err, "boom").map_err(anyhow::Error::from)?;
                Err(ToolError::Exit(code))
            }
            other => Err(ToolError::Fatal(anyhow::anyhow!(
                "unknown command {other:?}"
            ))),
        }
    }
}

struct Broken;

impl Tool for Broken {
    fn run(&mut self, _host: &mut dyn Host) -> Result<(), ToolError> {
        Err(ToolError::Fatal(anyhow::anyhow!("broken setup")))
    }
}

#[test]
fn matching_transcript_produces_a_clean_report() {
    let dir = tempfile::tempdir().unwrap();
    let (transcript, report) = replay_str(
        "$ echo hi\nhi\n",
        dir.path(),
        &mut ScriptTool,
        Mode::Verify,
    )
    .unwrap();

    assert!(report.is_match());
    assert_eq!(report.invocations.len(), 1);
    assert_eq!(report.invocations[0].line_nr, 1);
    assert_eq!(report.invocations[0].command, " echo hi");
    assert!(transcript.was_replayed);
}

#[test]
fn divergent_output_is_reported_per_field() {
    let dir = tempfile::tempdir().unwrap();
    let (_, report) = replay_str(
        "$ echo hi\nbye\n",
        dir.path(),
        &mut ScriptTool,
        Mode::Verify,
    )
    .unwrap();

    assert!(!report.is_match());
    let mismatches = &report.invocations[0].mismatches;
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].field, "stdout");
    assert_eq!(mismatches[0].expected, "bye\n");
    assert_eq!(mismatches[0].actual, "hi\n");
}

#[test]
fn stderr_and_exit_code_are_captured_and_compared() {
    let dir = tempfile::tempdir().unwrap();
    let (transcript, report) = replay_str(
        "$ fail 3\nexitcode: 3\nstderr:\nboom\n",
        dir.path(),
        &mut ScriptTool,
        Mode::Verify,
    )
    .unwrap();

    assert!(report.is_match());
    let Part::Invocation(inv) = &transcript.parts[0] else {
        panic!("expected an invocation part");
    };
    assert_eq!(inv.actual_exit_code, 3);
    assert_eq!(inv.actual_stderr, "boom\n");
}

#[test]
fn every_invocation_is_replayed_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let text = "# two runs\n$ echo one\none\n$ echo two\ntwo\n";
    let (_, report) = replay_str(text, dir.path(), &mut ScriptTool, Mode::Verify).unwrap();

    assert!(report.is_match());
    let lines: Vec<usize> = report.invocations.iter().map(|r| r.line_nr).collect();
    assert_eq!(lines, [2, 4]);
}

#[test]
fn rewrite_mode_suppresses_mismatches() {
    let dir = tempfile::tempdir().unwrap();
    let (transcript, report) = replay_str(
        "$ echo hi\nstale\n",
        dir.path(),
        &mut ScriptTool,
        Mode::Rewrite,
    )
    .unwrap();

    assert!(report.is_match());
    assert_eq!(transcript.to_actual(), "$ echo hi\nhi\n");
}

#[test]
fn replay_file_rewrites_the_golden_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.retrace");
    std::fs::write(&path, "$ echo new\nstale\n").unwrap();

    let report = replay_file(&path, &mut ScriptTool, Mode::Rewrite).unwrap();
    assert!(report.is_match());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "$ echo new\nnew\n"
    );

    // The regenerated file verifies clean and rewrites to itself.
    let report = replay_file(&path, &mut ScriptTool, Mode::Verify).unwrap();
    assert!(report.is_match());
    let report = replay_file(&path, &mut ScriptTool, Mode::Rewrite).unwrap();
    assert!(report.is_match());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "$ echo new\nnew\n"
    );
}

#[test]
fn verify_mode_never_touches_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.retrace");
    std::fs::write(&path, "$ echo hi\nstale\n").unwrap();

    let report = replay_file(&path, &mut ScriptTool, Mode::Verify).unwrap();
    assert!(!report.is_match());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "$ echo hi\nstale\n"
    );
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = replay_file(
        &dir.path().join("absent.retrace"),
        &mut ScriptTool,
        Mode::Verify,
    )
    .unwrap_err();
    assert!(matches!(err, ReplayError::Read { .. }));
}

#[test]
fn malformed_transcript_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = replay_str("stdin:\nab\n", dir.path(), &mut ScriptTool, Mode::Verify).unwrap_err();
    assert!(matches!(err, ReplayError::Parse(_)));
}

#[test]
fn fatal_tool_failure_aborts_the_replay() {
    let dir = tempfile::tempdir().unwrap();
    let err = replay_str("$ echo hi\nhi\n", dir.path(), &mut Broken, Mode::Verify).unwrap_err();
    assert!(matches!(err, ReplayError::Tool(_)));
}

#[test]
fn comments_and_fixtures_produce_no_invocation_reports() {
    let dir = tempfile::tempdir().unwrap();
    let text = "# note\n/data.txt:\npayload\n$ echo hi\nhi\n";
    let (transcript, report) = replay_str(text, dir.path(), &mut ScriptTool, Mode::Verify).unwrap();

    assert_eq!(transcript.parts.len(), 3);
    assert_eq!(report.invocations.len(), 1);
    assert!(report.is_match());
}
